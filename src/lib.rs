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

//! geosol
//!
//! A library for solving the classical geodetic problems on the surface of
//! the Earth, the computational core of the `GeoSol` handheld navigation
//! device.
//!
//! The device lets an operator capture positions from a GPS receiver, dial
//! in distances and angles, and displays the solution of one of three
//! problems:
//!
//! - the *inverse* problem: the distance and initial azimuth between two
//!   positions;
//! - the *direct* problem: the position at a distance and azimuth from a
//!   start position;
//! - the *polar serif* problem: the position at a distance from a start
//!   position, along the azimuth towards a second position rotated by an
//!   angular offset.
//!
//! ## Design
//!
//! Distances and destinations are calculated on a sphere with the mean
//! radius of the Earth, using the spherical law of cosines and the closed
//! form direct formula.
//!
//! Azimuths are calculated on an oblate ellipsoid using
//! [Vincenty's](https://en.wikipedia.org/wiki/Vincenty%27s_formulae) inverse
//! formula on the auxiliary sphere of reduced latitudes.
//! The iteration stops as soon as it has converged, but never exceeds the
//! iteration cap of the `Ellipsoid`: nearly antipodal positions return
//! `Error::NonConvergent` instead of a stale azimuth.
//!
//! The `Ellipsoid` class holds the model parameters: the mean radius,
//! the flattening and the value of π used to convert between degrees and
//! radians. The static `EARTH_ELLIPSOID` is the default model, it is
//! initialised once and never mutated.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Degrees`
//!   and `Radians` and clamp trigonometric values;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used on the device's microcontroller.

#![cfg_attr(not(test), no_std)]

extern crate alloc;
extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod device;
pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod planar;
pub mod problem;
pub mod sphere;

pub use angle_sc::{Degrees, Radians, Validate};
pub use error::Error;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use problem::{Problem, Solution};
pub use unit_sphere::LatLong;

use core::fmt;
use lazy_static::lazy_static;

/// A distance in kilometres.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Kilometres(pub f64);

impl From<Metres> for Kilometres {
    fn from(a: Metres) -> Self {
        Self(a.0 / 1000.0)
    }
}

impl From<Kilometres> for Metres {
    fn from(a: Kilometres) -> Self {
        Self(a.0 * 1000.0)
    }
}

impl From<Kilometres> for NauticalMiles {
    fn from(a: Kilometres) -> Self {
        Self::from(Metres::from(a))
    }
}

impl fmt::Display for Kilometres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} km", self.0)
    }
}

/// A geographic position: a latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// The latitude.
    lat: Degrees,
    /// The longitude.
    lon: Degrees,
}

impl Validate for GeoPoint {
    /// Test whether a `GeoPoint` is valid.
    /// Whether -90° <= `lat` <= 90° and -180° <= `lon` <= 180°.
    fn is_valid(&self) -> bool {
        ellipsoid::is_valid_latitude(self.lat.0) && ellipsoid::is_valid_longitude(self.lon.0)
    }
}

impl GeoPoint {
    /// Construct a `GeoPoint` without checking its range.
    /// * `lat` - the latitude.
    /// * `lon` - the longitude.
    #[must_use]
    pub const fn new(lat: Degrees, lon: Degrees) -> Self {
        Self { lat, lon }
    }

    /// Construct a valid `GeoPoint`.
    /// * `lat` - the latitude.
    /// * `lon` - the longitude.
    ///
    /// # Errors
    ///
    /// `Error::InvalidLatitude` or `Error::InvalidLongitude` if either
    /// coordinate is out of range.
    pub fn try_new(lat: Degrees, lon: Degrees) -> Result<Self, Error> {
        let point = Self::new(lat, lon);
        point.validate()?;
        Ok(point)
    }

    /// The latitude.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.lat
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.lon
    }

    /// Check the range of the `GeoPoint`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidLatitude` or `Error::InvalidLongitude` if either
    /// coordinate is out of range.
    pub fn validate(&self) -> Result<(), Error> {
        if !ellipsoid::is_valid_latitude(self.lat.0) {
            return Err(Error::InvalidLatitude { value: self.lat.0 });
        }
        if !ellipsoid::is_valid_longitude(self.lon.0) {
            return Err(Error::InvalidLongitude { value: self.lon.0 });
        }
        Ok(())
    }
}

impl From<&LatLong> for GeoPoint {
    fn from(a: &LatLong) -> Self {
        Self::new(a.lat(), a.lon())
    }
}

impl From<GeoPoint> for LatLong {
    fn from(a: GeoPoint) -> Self {
        Self::new(a.lat, a.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}  {:.6}", self.lat.0, self.lon.0)
    }
}

/// The parameters of the Earth model.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The mean radius of the model.
    radius: Kilometres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,
    /// The value of π used to convert between degrees and radians.
    pi: f64,

    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The convergence tolerance of the azimuth solver.
    tolerance: Radians,
    /// The iteration cap of the azimuth solver.
    max_iterations: u32,
}

impl Ellipsoid {
    /// Constructor.
    /// * `radius` - the mean radius of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    ///
    /// # Panics
    ///
    /// If the radius is not positive or the flattening is not in [0, 1).
    #[must_use]
    pub fn new(radius: Kilometres, f: f64) -> Self {
        assert!(
            radius.0.is_finite() && 0.0 < radius.0,
            "radius must be positive"
        );
        assert!((0.0..1.0).contains(&f), "flattening must be in [0, 1)");
        Self {
            radius,
            f,
            pi: ellipsoid::earth::PI,
            one_minus_f: 1.0 - f,
            tolerance: ellipsoid::earth::TOLERANCE,
            max_iterations: ellipsoid::earth::MAX_ITERATIONS,
        }
    }

    /// Construct an `Ellipsoid` with the default Earth parameters.
    #[must_use]
    pub fn earth() -> Self {
        Self::new(ellipsoid::earth::R, ellipsoid::earth::F)
    }

    /// Construct an `Ellipsoid` with the Earth parameters and the value
    /// of π used by earlier versions of the device.
    #[must_use]
    pub fn legacy() -> Self {
        Self::earth().with_pi(ellipsoid::earth::LEGACY_PI)
    }

    /// Construct a sphere: an `Ellipsoid` without flattening.
    /// * `radius` - the radius of the sphere.
    #[must_use]
    pub fn sphere(radius: Kilometres) -> Self {
        Self::new(radius, 0.0)
    }

    /// A copy of the `Ellipsoid` with another value of π.
    /// * `pi` - the value of π.
    ///
    /// # Panics
    ///
    /// If `pi` is not positive.
    #[must_use]
    pub fn with_pi(self, pi: f64) -> Self {
        assert!(pi.is_finite() && 0.0 < pi, "pi must be positive");
        Self { pi, ..self }
    }

    /// A copy of the `Ellipsoid` with another convergence tolerance.
    /// * `tolerance` - the convergence tolerance.
    ///
    /// # Panics
    ///
    /// If `tolerance` is not positive.
    #[must_use]
    pub fn with_tolerance(self, tolerance: Radians) -> Self {
        assert!(0.0 < tolerance.0, "tolerance must be positive");
        Self { tolerance, ..self }
    }

    /// A copy of the `Ellipsoid` with another iteration cap.
    /// * `max_iterations` - the iteration cap.
    ///
    /// # Panics
    ///
    /// If `max_iterations` is zero.
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        assert!(0 < max_iterations, "max_iterations must be positive");
        Self {
            max_iterations,
            ..self
        }
    }

    /// The mean radius of the model.
    #[must_use]
    pub const fn radius(&self) -> Kilometres {
        self.radius
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The value of π used to convert between degrees and radians.
    #[must_use]
    pub const fn pi(&self) -> f64 {
        self.pi
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The convergence tolerance of the azimuth solver.
    #[must_use]
    pub const fn tolerance(&self) -> Radians {
        self.tolerance
    }

    /// The iteration cap of the azimuth solver.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Convert degrees to radians with the model's value of π.
    #[must_use]
    pub fn deg_to_rad(&self, deg: Degrees) -> Radians {
        ellipsoid::deg_to_rad(deg, self.pi)
    }

    /// Convert radians to degrees with the model's value of π.
    #[must_use]
    pub fn rad_to_deg(&self, rad: Radians) -> Degrees {
        ellipsoid::rad_to_deg(rad, self.pi)
    }

    /// Convert a geodetic latitude to a reduced latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic latitude.
    #[must_use]
    pub fn calculate_reduced_latitude(&self, lat: Degrees) -> Radians {
        ellipsoid::calculate_reduced_latitude(self.deg_to_rad(lat), self.one_minus_f)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::earth()
    }
}

lazy_static! {
    /// A static instance of the default Earth `Ellipsoid`.
    pub static ref EARTH_ELLIPSOID: Ellipsoid = Ellipsoid::earth();
}

/// The solution of the inverse geodetic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    /// The great circle distance between the positions.
    pub distance: Kilometres,
    /// The initial azimuth from the first position, in [0°, 360°).
    pub azimuth: Degrees,
}

fn validate_angle(angle: Degrees) -> Result<Degrees, Error> {
    if angle.0.is_finite() {
        Ok(angle)
    } else {
        Err(Error::InvalidAngle { value: angle.0 })
    }
}

/// Solve the inverse geodetic problem: calculate the distance and initial
/// azimuth between a pair of positions.
/// * `a`, `b` - the start and finish positions.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Examples
/// ```
/// use geosol::*;
///
/// let istanbul = GeoPoint::new(Degrees(42.0), Degrees(29.0));
/// let washington = GeoPoint::new(Degrees(39.0), Degrees(-77.0));
/// let solution = solve_inverse(&istanbul, &washington, &EARTH_ELLIPSOID).unwrap();
///
/// println!("Istanbul-Washington distance: {}", solution.distance);
/// println!("Istanbul-Washington initial azimuth: {:?}", solution.azimuth.0);
/// ```
///
/// # Errors
///
/// A domain error if either position is out of range, or
/// `Error::NonConvergent` if the azimuth solver fails to converge.
pub fn solve_inverse(
    a: &GeoPoint,
    b: &GeoPoint,
    ellipsoid: &Ellipsoid,
) -> Result<InverseSolution, Error> {
    a.validate()?;
    b.validate()?;

    let distance = sphere::calculate_distance(a, b, ellipsoid);
    let (azimuth, _iterations) = geodesic::calculate_azimuth(a, b, ellipsoid)?;
    Ok(InverseSolution { distance, azimuth })
}

/// Solve the direct geodetic problem: calculate the position at a distance
/// and azimuth from a start position.
/// * `a` - the start position.
/// * `azimuth` - the azimuth at the start position.
/// * `distance` - the distance from the start position.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Errors
///
/// A domain error if the position, azimuth or distance is invalid.
pub fn solve_direct(
    a: &GeoPoint,
    azimuth: Degrees,
    distance: Kilometres,
    ellipsoid: &Ellipsoid,
) -> Result<GeoPoint, Error> {
    a.validate()?;
    let azimuth = validate_angle(azimuth)?;
    sphere::calculate_destination(a, azimuth, distance, ellipsoid)
}

/// Solve the polar serif problem: calculate the position at a distance from
/// a start position, along the azimuth towards a second position rotated
/// by an angular offset.
/// * `a` - the start position.
/// * `b` - the position that defines the reference azimuth.
/// * `offset` - the angle added to the azimuth from `a` to `b`.
/// * `distance` - the distance from the start position.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Errors
///
/// A domain error if an input is invalid, or `Error::NonConvergent` if the
/// azimuth from `a` to `b` fails to converge.
pub fn solve_polar_serif(
    a: &GeoPoint,
    b: &GeoPoint,
    offset: Degrees,
    distance: Kilometres,
    ellipsoid: &Ellipsoid,
) -> Result<GeoPoint, Error> {
    a.validate()?;
    b.validate()?;
    let offset = validate_angle(offset)?;

    let (azimuth, _iterations) = geodesic::calculate_azimuth(a, b, ellipsoid)?;
    let bearing = ellipsoid::normalize_azimuth(Degrees(azimuth.0 + offset.0));
    solve_direct(a, bearing, distance, ellipsoid)
}
