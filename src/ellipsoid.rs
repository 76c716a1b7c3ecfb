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

//! The ellipsoid module contains functions for converting and normalising
//! the angles used by an ellipsoid model, given its value of π and its
//! flattening ratio.

#![allow(clippy::suboptimal_flops)]

pub mod earth;

use angle_sc::{Degrees, Radians};

/// The minimum valid latitude in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// The maximum valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;
/// The minimum valid longitude in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
/// The maximum valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Convert an angle in degrees to radians.
/// * `deg` - the angle in degrees.
/// * `pi` - the value of π used by the model.
/// # Examples
/// ```
/// use geosol::{Degrees, Radians};
/// use geosol::ellipsoid::{deg_to_rad, earth};
///
/// assert_eq!(Radians(earth::PI), deg_to_rad(Degrees(180.0), earth::PI));
/// ```
#[must_use]
pub fn deg_to_rad(deg: Degrees, pi: f64) -> Radians {
    Radians(deg.0 * pi / 180.0)
}

/// Convert an angle in radians to degrees.
/// * `rad` - the angle in radians.
/// * `pi` - the value of π used by the model.
/// # Examples
/// ```
/// use geosol::{Degrees, Radians};
/// use geosol::ellipsoid::{rad_to_deg, earth};
///
/// assert_eq!(Degrees(90.0), rad_to_deg(Radians(earth::PI / 2.0), earth::PI));
/// ```
#[must_use]
pub fn rad_to_deg(rad: Radians, pi: f64) -> Degrees {
    Degrees(rad.0 * 180.0 / pi)
}

/// Normalise an azimuth into the range [0°, 360°).
/// * `azimuth` - the azimuth in degrees.
/// # Examples
/// ```
/// use geosol::Degrees;
/// use geosol::ellipsoid::normalize_azimuth;
///
/// assert_eq!(Degrees(270.0), normalize_azimuth(Degrees(-90.0)));
/// assert_eq!(Degrees(0.0), normalize_azimuth(Degrees(720.0)));
/// ```
#[must_use]
pub fn normalize_azimuth(azimuth: Degrees) -> Degrees {
    let value = azimuth.0 % 360.0;
    // adding zero removes a negative zero
    let value = if value < 0.0 { value + 360.0 } else { value + 0.0 };
    // a tiny negative value rounds up to exactly 360
    Degrees(if value < 360.0 { value } else { 0.0 })
}

/// Normalise a longitude into the range [-180°, 180°).
/// * `lon` - the longitude in degrees.
#[must_use]
pub fn normalize_longitude(lon: Degrees) -> Degrees {
    let value = normalize_azimuth(Degrees(lon.0 + 180.0));
    Degrees(value.0 - 180.0)
}

/// Wrap a longitude difference into the range [-π, π] of the model.
/// * `delta_long` - the difference between two valid longitudes.
/// * `pi` - the value of π used by the model.
#[must_use]
pub fn wrap_longitude_difference(delta_long: Radians, pi: f64) -> Radians {
    if pi < delta_long.0 {
        Radians(delta_long.0 - 2.0 * pi)
    } else if delta_long.0 < -pi {
        Radians(delta_long.0 + 2.0 * pi)
    } else {
        delta_long
    }
}

/// Convert a geodetic latitude to a reduced latitude on the auxiliary sphere.
/// * `lat` - the geodetic latitude in radians.
/// * `one_minus_f` - one minus the flattening ratio.
///
/// The latitude is clamped to [-π/2, π/2], so a pole converted with an
/// approximate value of π stays at the same pole.
#[must_use]
pub fn calculate_reduced_latitude(lat: Radians, one_minus_f: f64) -> Radians {
    let lat = lat.0.clamp(-core::f64::consts::FRAC_PI_2, core::f64::consts::FRAC_PI_2);
    Radians(libm::atan2(one_minus_f * libm::sin(lat), libm::cos(lat)))
}

/// Whether a latitude in degrees lies in the range [-90°, 90°].
#[must_use]
pub fn is_valid_latitude(lat: f64) -> bool {
    (MIN_LATITUDE..=MAX_LATITUDE).contains(&lat)
}

/// Whether a longitude in degrees lies in the range [-180°, 180°].
#[must_use]
pub fn is_valid_longitude(lon: f64) -> bool {
    (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_deg_to_rad_and_rad_to_deg() {
        for pi in [earth::PI, earth::LEGACY_PI] {
            for i in -360..361 {
                let deg = Degrees(f64::from(i));
                let result = rad_to_deg(deg_to_rad(deg, pi), pi);
                assert!(is_within_tolerance(deg.0, result.0, 1e-12));
            }
        }

        assert_eq!(Radians(0.0), deg_to_rad(Degrees(0.0), earth::PI));
        assert_eq!(Radians(earth::LEGACY_PI), deg_to_rad(Degrees(180.0), earth::LEGACY_PI));
        assert_eq!(Degrees(180.0), rad_to_deg(Radians(earth::LEGACY_PI), earth::LEGACY_PI));
    }

    #[test]
    fn test_deg_to_rad_uses_model_pi() {
        let legacy = deg_to_rad(Degrees(1.0), earth::LEGACY_PI);
        let exact = deg_to_rad(Degrees(1.0), earth::PI);
        assert!(legacy.0 != exact.0);
        assert!(is_within_tolerance(exact.0, legacy.0, 1e-9));
    }

    #[test]
    fn test_normalize_azimuth() {
        assert_eq!(Degrees(0.0), normalize_azimuth(Degrees(0.0)));
        assert_eq!(Degrees(0.0), normalize_azimuth(Degrees(-0.0)));
        assert_eq!(Degrees(0.0), normalize_azimuth(Degrees(360.0)));
        assert_eq!(Degrees(359.0), normalize_azimuth(Degrees(-1.0)));
        assert_eq!(Degrees(45.0), normalize_azimuth(Degrees(405.0)));
        assert_eq!(Degrees(180.0), normalize_azimuth(Degrees(-540.0)));

        // a negative value smaller than the precision of 360
        assert_eq!(Degrees(0.0), normalize_azimuth(Degrees(-1e-15)));

        for i in -1000..1000 {
            let result = normalize_azimuth(Degrees(f64::from(i) * 0.77));
            assert!((0.0..360.0).contains(&result.0));
        }
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(Degrees(0.0), normalize_longitude(Degrees(0.0)));
        assert_eq!(Degrees(-170.0), normalize_longitude(Degrees(190.0)));
        assert_eq!(Degrees(170.0), normalize_longitude(Degrees(-190.0)));
        assert_eq!(Degrees(-180.0), normalize_longitude(Degrees(180.0)));
        assert_eq!(Degrees(-180.0), normalize_longitude(Degrees(-180.0)));
        assert_eq!(Degrees(179.5), normalize_longitude(Degrees(179.5)));
    }

    #[test]
    fn test_wrap_longitude_difference() {
        let pi = earth::PI;
        assert_eq!(Radians(1.0), wrap_longitude_difference(Radians(1.0), pi));
        assert_eq!(Radians(-1.0), wrap_longitude_difference(Radians(-1.0), pi));
        assert_eq!(Radians(pi), wrap_longitude_difference(Radians(pi), pi));

        let result = wrap_longitude_difference(Radians(1.5 * pi), pi);
        assert!(is_within_tolerance(-0.5 * pi, result.0, f64::EPSILON));
        let result = wrap_longitude_difference(Radians(-1.5 * pi), pi);
        assert!(is_within_tolerance(0.5 * pi, result.0, f64::EPSILON));
    }

    #[test]
    fn test_calculate_reduced_latitude() {
        let one_minus_f = 1.0 - earth::F;

        assert_eq!(Radians(0.0), calculate_reduced_latitude(Radians(0.0), one_minus_f));

        // the reduced latitude is closer to the equator than the geodetic latitude
        for i in 1..90 {
            let lat = deg_to_rad(Degrees(f64::from(i)), earth::PI);
            let beta = calculate_reduced_latitude(lat, one_minus_f);
            assert!(beta.0 < lat.0);
            let beta = calculate_reduced_latitude(Radians(-lat.0), one_minus_f);
            assert!(-lat.0 < beta.0);
        }

        // a sphere has no flattening
        let lat = Radians(0.75);
        assert!(is_within_tolerance(
            lat.0,
            calculate_reduced_latitude(lat, 1.0).0,
            4.0 * f64::EPSILON
        ));
    }

    #[test]
    fn test_calculate_reduced_latitude_legacy_poles() {
        let one_minus_f = 1.0 - earth::F;

        // the legacy value of π converts 90° to just over π/2
        let north = deg_to_rad(Degrees(90.0), earth::LEGACY_PI);
        assert!(core::f64::consts::FRAC_PI_2 < north.0);
        let beta = calculate_reduced_latitude(north, one_minus_f);
        assert!(0.0 < beta.0);
        assert!(is_within_tolerance(core::f64::consts::FRAC_PI_2, beta.0, 1e-7));

        let south = deg_to_rad(Degrees(-90.0), earth::LEGACY_PI);
        let beta = calculate_reduced_latitude(south, one_minus_f);
        assert!(beta.0 < 0.0);
        assert!(is_within_tolerance(-core::f64::consts::FRAC_PI_2, beta.0, 1e-7));

        // the poles of the default model
        let north = deg_to_rad(Degrees(90.0), earth::PI);
        let beta = calculate_reduced_latitude(north, one_minus_f);
        assert!(is_within_tolerance(core::f64::consts::FRAC_PI_2, beta.0, 1e-15));
    }

    #[test]
    fn test_is_valid_latitude_and_longitude() {
        assert!(is_valid_latitude(90.0));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_latitude(90.000_001));
        assert!(!is_valid_latitude(f64::NAN));

        assert!(is_valid_longitude(180.0));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(-180.5));
        assert!(!is_valid_longitude(f64::INFINITY));
    }
}
