// Copyright (c) 2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The problem module contains the `Problem` enum: a request to solve one of
//! the three geodetic problems, and its `Solution`.
//!
//! Problems are transient values: constructed for a request, solved once
//! and discarded.

use crate::device::{is_entered, InputSource, Lines, PositionSource};
use crate::{
    solve_direct, solve_inverse, solve_polar_serif, Degrees, Ellipsoid, Error, GeoPoint,
    InverseSolution, Kilometres,
};
use alloc::format;
use alloc::string::ToString;

/// The title of the inverse geodetic problem.
pub const INVERSE_TITLE: &str = "Inverse geodetic problem";
/// The title of the direct geodetic problem.
pub const DIRECT_TITLE: &str = "Direct geodetic problem";
/// The title of the polar serif problem.
pub const POLAR_SERIF_TITLE: &str = "Polar serif problem";

/// A geodetic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Problem {
    /// Find the distance and azimuth from `a` to `b`.
    Inverse { a: GeoPoint, b: GeoPoint },
    /// Find the position at `distance` along `azimuth` from `a`.
    Direct {
        a: GeoPoint,
        azimuth: Degrees,
        distance: Kilometres,
    },
    /// Find the position at `distance` from `a` along the azimuth from `a`
    /// to `b` plus `offset`.
    PolarSerif {
        a: GeoPoint,
        b: GeoPoint,
        offset: Degrees,
        distance: Kilometres,
    },
}

impl Problem {
    /// The title of the problem, as displayed by the device.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Inverse { .. } => INVERSE_TITLE,
            Self::Direct { .. } => DIRECT_TITLE,
            Self::PolarSerif { .. } => POLAR_SERIF_TITLE,
        }
    }

    /// Whether every position of the problem has been entered.
    /// The device only recalculates a problem once it is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self {
            Self::Inverse { a, b } | Self::PolarSerif { a, b, .. } => {
                is_entered(a) && is_entered(b)
            }
            Self::Direct { a, .. } => is_entered(a),
        }
    }

    /// Solve the problem.
    /// * `ellipsoid` - the `Ellipsoid`.
    ///
    /// # Examples
    /// ```
    /// use geosol::{Degrees, GeoPoint, Problem, Solution, EARTH_ELLIPSOID};
    ///
    /// let problem = Problem::Inverse {
    ///     a: GeoPoint::new(Degrees(0.0), Degrees(0.0)),
    ///     b: GeoPoint::new(Degrees(0.0), Degrees(1.0)),
    /// };
    /// match problem.solve(&EARTH_ELLIPSOID) {
    ///     Ok(Solution::Inverse(solution)) => assert!((solution.distance.0 - 111.2).abs() < 0.01),
    ///     _ => unreachable!(),
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// A domain error if an input is invalid, or `Error::NonConvergent` if an
    /// azimuth fails to converge.
    pub fn solve(&self, ellipsoid: &Ellipsoid) -> Result<Solution, Error> {
        match *self {
            Self::Inverse { a, b } => solve_inverse(&a, &b, ellipsoid).map(Solution::Inverse),
            Self::Direct {
                a,
                azimuth,
                distance,
            } => solve_direct(&a, azimuth, distance, ellipsoid).map(Solution::Direct),
            Self::PolarSerif {
                a,
                b,
                offset,
                distance,
            } => solve_polar_serif(&a, &b, offset, distance, ellipsoid).map(Solution::PolarSerif),
        }
    }

    /// Construct an inverse problem from the current position to a target.
    /// * `position` - the source of the current position.
    /// * `b` - the target position.
    ///
    /// returns None if the current position is unavailable.
    pub fn inverse_from_sources<P: PositionSource + ?Sized>(
        position: &mut P,
        b: &GeoPoint,
    ) -> Option<Self> {
        let a = position.current_position()?;
        Some(Self::Inverse { a, b: *b })
    }

    /// Construct a direct problem from the current position and the
    /// dialled distance and angle.
    /// * `position` - the source of the current position.
    /// * `input` - the source of the distance and azimuth.
    ///
    /// returns None if the current position is unavailable.
    pub fn direct_from_sources<P, I>(position: &mut P, input: &mut I) -> Option<Self>
    where
        P: PositionSource + ?Sized,
        I: InputSource + ?Sized,
    {
        let a = position.current_position()?;
        Some(Self::Direct {
            a,
            azimuth: input.current_angle(),
            distance: input.current_distance(),
        })
    }

    /// Construct a polar serif problem from the current position, a
    /// reference position and the dialled distance and offset.
    /// * `position` - the source of the current position.
    /// * `b` - the position that defines the reference azimuth.
    /// * `input` - the source of the distance and offset.
    ///
    /// returns None if the current position is unavailable.
    pub fn polar_serif_from_sources<P, I>(
        position: &mut P,
        b: &GeoPoint,
        input: &mut I,
    ) -> Option<Self>
    where
        P: PositionSource + ?Sized,
        I: InputSource + ?Sized,
    {
        let a = position.current_position()?;
        Some(Self::PolarSerif {
            a,
            b: *b,
            offset: input.current_angle(),
            distance: input.current_distance(),
        })
    }
}

/// The solution of a geodetic `Problem`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Solution {
    /// The distance and azimuth between the positions.
    Inverse(InverseSolution),
    /// The destination of the direct problem.
    Direct(GeoPoint),
    /// The third point of the polar serif problem.
    PolarSerif(GeoPoint),
}

impl Solution {
    /// The title of the solved problem.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Inverse(_) => INVERSE_TITLE,
            Self::Direct(_) => DIRECT_TITLE,
            Self::PolarSerif(_) => POLAR_SERIF_TITLE,
        }
    }

    /// The three display lines of the solution: the title and the solved
    /// values.
    #[must_use]
    pub fn lines(&self) -> Lines {
        match self {
            Self::Inverse(solution) => Lines::new(
                INVERSE_TITLE,
                &format!("Distance {}", solution.distance),
                &format!("Angle {:.3}", solution.azimuth.0),
            ),
            Self::Direct(point) => Lines::new(DIRECT_TITLE, "Point 2", &point.to_string()),
            Self::PolarSerif(point) => Lines::new(POLAR_SERIF_TITLE, "Point 3", &point.to_string()),
        }
    }
}
