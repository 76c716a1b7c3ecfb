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

//! The planar module contains functions for calculating the distance and
//! azimuth between points on a plane.
//!
//! It is a simplified reference model: it ignores the curvature of the Earth.
//! Geographic positions are mapped onto the plane with the longitude as the
//! x (East) axis and the latitude as the y (North) axis, so that azimuths are
//! measured clockwise from North like geographic azimuths.

#![allow(clippy::float_cmp)]

use crate::ellipsoid::normalize_azimuth;
use crate::{Degrees, Ellipsoid, GeoPoint, Radians};
use angle_sc::trig::UnitNegRange;

/// A point on a plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanarPoint {
    /// The East coordinate.
    pub x: f64,
    /// The North coordinate.
    pub y: f64,
}

impl PlanarPoint {
    /// Construct a point from its x and y coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<&GeoPoint> for PlanarPoint {
    /// Map a geographic position onto the plane: x = longitude, y = latitude.
    fn from(a: &GeoPoint) -> Self {
        Self::new(a.lon().0, a.lat().0)
    }
}

/// Calculate the Euclidean distance between a pair of points.
/// * `a`, `b` - the points.
/// # Examples
/// ```
/// use geosol::planar::{calculate_distance, PlanarPoint};
///
/// let a = PlanarPoint::new(1.0, 2.0);
/// let b = PlanarPoint::new(4.0, 6.0);
/// assert_eq!(5.0, calculate_distance(&a, &b));
/// ```
#[must_use]
pub fn calculate_distance(a: &PlanarPoint, b: &PlanarPoint) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    libm::sqrt(dx * dx + dy * dy)
}

/// Calculate the azimuth of the vector from point `a` to point `b`,
/// clockwise from the y axis.
/// * `a`, `b` - the points.
/// * `pi` - the value of π used by the model.
///
/// returns the azimuth in radians, in the range [0, 2π), zero for
/// coincident points.
/// Due South is π and due West is 1.5π. Earlier versions of the device
/// returned zero for both.
#[must_use]
pub fn calculate_azimuth(a: &PlanarPoint, b: &PlanarPoint, pi: f64) -> Radians {
    let distance = calculate_distance(a, b);
    if distance < f64::MIN_POSITIVE {
        return Radians(0.0);
    }

    let (x1, y1, x2, y2) = (a.x, a.y, b.x, b.y);
    let sin_dx = UnitNegRange::clamp(libm::fabs(x1 - x2) / distance);
    let sin_dy = UnitNegRange::clamp(libm::fabs(y1 - y2) / distance);
    Radians(if x1 <= x2 && y1 <= y2 {
        libm::asin(sin_dx.0)
    } else if x1 < x2 && y2 < y1 {
        pi - libm::asin(sin_dx.0)
    } else if x2 < x1 && y2 < y1 {
        pi + libm::asin(sin_dx.0)
    } else if x2 < x1 && y1 < y2 {
        1.5 * pi + libm::asin(sin_dy.0)
    } else if x1 == x2 {
        // due South
        pi
    } else {
        // due West
        1.5 * pi
    })
}

/// Calculate the planar approximation of the azimuth between a pair of
/// geographic positions.
/// * `a`, `b` - the start and finish positions.
/// * `ellipsoid` - the `Ellipsoid`, for its value of π.
///
/// returns the azimuth in the range [0°, 360°).
#[must_use]
pub fn calculate_approximate_azimuth(a: &GeoPoint, b: &GeoPoint, ellipsoid: &Ellipsoid) -> Degrees {
    let azimuth = calculate_azimuth(
        &PlanarPoint::from(a),
        &PlanarPoint::from(b),
        ellipsoid.pi(),
    );
    normalize_azimuth(ellipsoid.rad_to_deg(azimuth))
}
