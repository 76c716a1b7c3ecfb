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

//! The device module contains the interfaces between the geodetic solvers
//! and the hardware of the handheld device: a GPS receiver, the analog dials
//! used to enter distances and angles, and a three line display.
//!
//! The display is slow to redraw, so results are sent to it through a
//! `ChangeFilter` which only forwards lines that have changed.

use crate::problem::{Problem, Solution};
use crate::{Degrees, Ellipsoid, Error, GeoPoint, Kilometres};
use alloc::string::{String, ToString};
use core::fmt;

/// The number of lines on the device display.
pub const LINE_COUNT: usize = 3;

/// The second line displayed when a problem cannot be solved.
pub const NOT_SOLVABLE: &str = "Not solvable";

/// The maximum distance of the coarse distance dial, in kilometres.
const COARSE_DISTANCE_RANGE: f64 = 100.0;
/// The maximum angle of the coarse angle dial, in degrees.
const COARSE_ANGLE_RANGE: f64 = 360.0;
/// The number of steps of the fine dial.
const FINE_STEPS: f64 = 1000.0;

/// A source of the current position, e.g. a GPS receiver.
pub trait PositionSource {
    /// The current position, None if it is unavailable.
    fn current_position(&mut self) -> Option<GeoPoint>;
}

/// A source of manually entered distances and angles.
pub trait InputSource {
    /// The currently dialled distance.
    fn current_distance(&mut self) -> Kilometres;
    /// The currently dialled angle.
    fn current_angle(&mut self) -> Degrees;
}

/// A display for the results.
pub trait ResultSink {
    /// Show the lines.
    fn show(&mut self, lines: &Lines);
}

/// Whether a position has been entered.
/// The device stores positions that have not been entered as the origin:
/// latitude and longitude zero.
#[must_use]
pub fn is_entered(point: &GeoPoint) -> bool {
    point.lat().0 != 0.0 || point.lon().0 != 0.0
}

/// Convert a raw GPS fix to a position.
/// * `lat`, `lon` - the fix coordinates in degrees.
///
/// returns None if the receiver has no fix (it reports the origin) or the
/// fix is out of range.
#[must_use]
pub fn position_from_fix(lat: f64, lon: f64) -> Option<GeoPoint> {
    let point = GeoPoint::try_new(Degrees(lat), Degrees(lon)).ok()?;
    is_entered(&point).then_some(point)
}

/// The lines of text shown on the device display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lines([String; LINE_COUNT]);

impl Lines {
    /// Construct the lines of a display from three strings.
    #[must_use]
    pub fn new(line1: &str, line2: &str, line3: &str) -> Self {
        Self([line1.to_string(), line2.to_string(), line3.to_string()])
    }

    /// The lines shown when a problem cannot be solved.
    /// * `title` - the title of the problem.
    /// * `error` - the reason that it cannot be solved.
    #[must_use]
    pub fn not_solvable(title: &str, error: &Error) -> Self {
        Self::new(title, NOT_SOLVABLE, &error.to_string())
    }

    /// The line at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not less than `LINE_COUNT`.
    #[must_use]
    pub fn line(&self, index: usize) -> &str {
        &self.0[index]
    }

    /// The lines, top to bottom.
    #[must_use]
    pub const fn as_array(&self) -> &[String; LINE_COUNT] {
        &self.0
    }
}

impl fmt::Display for Lines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.0[0], self.0[1], self.0[2])
    }
}

/// A `ResultSink` adaptor that only forwards lines which differ from the
/// last lines that it forwarded.
#[derive(Debug)]
pub struct ChangeFilter<S> {
    sink: S,
    last: Option<Lines>,
}

impl<S: ResultSink> ChangeFilter<S> {
    /// Wrap a sink, which has not been shown any lines yet.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self { sink, last: None }
    }

    /// The wrapped sink.
    #[must_use]
    pub const fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Unwrap the sink.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: ResultSink> ResultSink for ChangeFilter<S> {
    fn show(&mut self, lines: &Lines) {
        if self.last.as_ref() != Some(lines) {
            self.sink.show(lines);
            self.last = Some(lines.clone());
        }
    }
}

/// Solve a problem and show its solution, or that it is not solvable.
/// * `problem` - the problem to solve.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `sink` - the display.
///
/// # Errors
///
/// The error from `Problem::solve`, after it has been shown.
pub fn publish<S: ResultSink + ?Sized>(
    problem: &Problem,
    ellipsoid: &Ellipsoid,
    sink: &mut S,
) -> Result<Solution, Error> {
    match problem.solve(ellipsoid) {
        Ok(solution) => {
            sink.show(&solution.lines());
            Ok(solution)
        }
        Err(error) => {
            log::debug!("{} not solvable: {error}", problem.title());
            sink.show(&Lines::not_solvable(problem.title(), &error));
            Err(error)
        }
    }
}

/// A pair of analog dials: a coarse dial and a fine dial.
/// Each dial reads a value in the range [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnalogDials {
    /// The coarse dial reading.
    pub coarse: f64,
    /// The fine dial reading.
    pub fine: f64,
}

impl AnalogDials {
    /// Construct the dials from their readings in the range [0, 1].
    #[must_use]
    pub const fn new(coarse: f64, fine: f64) -> Self {
        Self { coarse, fine }
    }

    /// The fine dial adds up to one unit in steps of a thousandth.
    fn fine_value(&self) -> f64 {
        libm::trunc(self.fine * FINE_STEPS) / FINE_STEPS
    }
}

impl InputSource for AnalogDials {
    /// Whole kilometres from the coarse dial, fractions from the fine dial.
    fn current_distance(&mut self) -> Kilometres {
        Kilometres(libm::trunc(self.coarse * COARSE_DISTANCE_RANGE) + self.fine_value())
    }

    /// Whole degrees from the coarse dial, fractions from the fine dial.
    fn current_angle(&mut self) -> Degrees {
        Degrees(libm::trunc(self.coarse * COARSE_ANGLE_RANGE) + self.fine_value())
    }
}
