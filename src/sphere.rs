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

//! The sphere module contains functions for calculating great circle
//! distances and destinations on a sphere with the mean radius of the
//! `Ellipsoid`.

#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::normalize_longitude;
use crate::{Degrees, Ellipsoid, Error, GeoPoint, Kilometres, Radians};
use angle_sc::trig::UnitNegRange;

/// The maximum great circle arc of the direct problem: one full turn.
const MAX_ARC_TURNS: f64 = 2.0;

/// Calculate the great circle distance between a pair of positions using the
/// spherical law of cosines.
/// @pre the positions are valid.
/// * `a`, `b` - the positions.
/// * `ellipsoid` - the `Ellipsoid`, its radius scales the distance.
///
/// returns the great circle distance between the positions.
///
/// # Examples
/// ```
/// use geosol::{sphere, Degrees, GeoPoint, EARTH_ELLIPSOID};
///
/// let a = GeoPoint::new(Degrees(0.0), Degrees(0.0));
/// let b = GeoPoint::new(Degrees(0.0), Degrees(1.0));
/// let distance = sphere::calculate_distance(&a, &b, &EARTH_ELLIPSOID);
/// assert!((distance.0 - 111.2).abs() < 0.01);
/// ```
#[must_use]
pub fn calculate_distance(a: &GeoPoint, b: &GeoPoint, ellipsoid: &Ellipsoid) -> Kilometres {
    if a == b {
        return Kilometres(0.0);
    }

    let lat1 = ellipsoid.deg_to_rad(a.lat()).0;
    let lat2 = ellipsoid.deg_to_rad(b.lat()).0;
    let delta_long = ellipsoid.deg_to_rad(Degrees(a.lon().0 - b.lon().0)).0;

    // rounding can take the cosine slightly beyond 1 for nearby positions
    let cos_arc = UnitNegRange::clamp(
        libm::sin(lat1) * libm::sin(lat2)
            + libm::cos(lat1) * libm::cos(lat2) * libm::cos(delta_long),
    );
    Kilometres(libm::acos(cos_arc.0) * ellipsoid.radius().0)
}

/// Calculate the destination of a great circle path, the "direct" problem.
/// @pre the start position and azimuth are valid.
/// * `a` - the start position.
/// * `azimuth` - the azimuth at the start position.
/// * `distance` - the distance along the great circle.
/// * `ellipsoid` - the `Ellipsoid`, its radius scales the distance.
///
/// returns the destination, with its longitude in the range [-180°, 180°).
///
/// # Errors
///
/// `Error::InvalidDistance` if the distance is negative or not finite,
/// `Error::DistanceOutOfRange` if the distance wraps around the sphere more
/// than once.
pub fn calculate_destination(
    a: &GeoPoint,
    azimuth: Degrees,
    distance: Kilometres,
    ellipsoid: &Ellipsoid,
) -> Result<GeoPoint, Error> {
    if !distance.0.is_finite() || distance.0 < 0.0 {
        return Err(Error::InvalidDistance { value: distance.0 });
    }

    let arc = Radians(distance.0 / ellipsoid.radius().0);
    if MAX_ARC_TURNS * ellipsoid.pi() < arc.0 {
        return Err(Error::DistanceOutOfRange { value: distance.0 });
    }

    let lat1 = ellipsoid.deg_to_rad(a.lat()).0;
    let azi = ellipsoid.deg_to_rad(azimuth).0;
    let (sin_lat1, cos_lat1) = (libm::sin(lat1), libm::cos(lat1));
    let (sin_arc, cos_arc) = (libm::sin(arc.0), libm::cos(arc.0));

    let sin_lat2 = UnitNegRange::clamp(sin_lat1 * cos_arc + cos_lat1 * sin_arc * libm::cos(azi));
    let lat2 = Radians(libm::asin(sin_lat2.0));

    // the longitude difference uses the destination latitude
    let delta_long = Radians(libm::atan2(
        libm::sin(azi) * sin_arc * cos_lat1,
        cos_arc - sin_lat1 * libm::sin(lat2.0),
    ));

    let lat = ellipsoid.rad_to_deg(lat2);
    let lon = normalize_longitude(Degrees(a.lon().0 + ellipsoid.rad_to_deg(delta_long).0));
    if lat.0.is_finite() && lon.0.is_finite() {
        Ok(GeoPoint::new(lat, lon))
    } else {
        Err(Error::NonFiniteComputation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EARTH_ELLIPSOID;
    use angle_sc::{is_within_tolerance, Angle};
    use unit_sphere::great_circle;

    #[test]
    fn test_calculate_distance_one_degree() {
        let a = GeoPoint::new(Degrees(0.0), Degrees(0.0));
        let b = GeoPoint::new(Degrees(0.0), Degrees(1.0));

        let result = calculate_distance(&a, &b, &EARTH_ELLIPSOID);
        assert!(is_within_tolerance(111.2, result.0, 0.01));

        let c = GeoPoint::new(Degrees(1.0), Degrees(0.0));
        let result_north = calculate_distance(&a, &c, &EARTH_ELLIPSOID);
        assert!(is_within_tolerance(result.0, result_north.0, 1e-9));
    }

    #[test]
    fn test_calculate_distance_identical_points() {
        for (lat, lon) in [(0.0, 0.0), (10.0, 20.0), (-45.0, 170.0), (90.0, 0.0)] {
            let a = GeoPoint::new(Degrees(lat), Degrees(lon));
            assert_eq!(Kilometres(0.0), calculate_distance(&a, &a, &EARTH_ELLIPSOID));
        }
    }

    #[test]
    fn test_calculate_distance_nearby_points() {
        // about a centimetre apart, where the cosine rounds to 1
        let a = GeoPoint::new(Degrees(10.0), Degrees(20.0));
        let b = GeoPoint::new(Degrees(10.0), Degrees(20.000_000_1));
        let result = calculate_distance(&a, &b, &EARTH_ELLIPSOID);
        assert!(result.0.is_finite());
        assert!(0.0 <= result.0);
        assert!(result.0 < 0.001);
    }

    #[test]
    fn test_calculate_distance_symmetric() {
        let a = GeoPoint::new(Degrees(42.0), Degrees(29.0));
        let b = GeoPoint::new(Degrees(39.0), Degrees(-77.0));
        assert_eq!(
            calculate_distance(&a, &b, &EARTH_ELLIPSOID),
            calculate_distance(&b, &a, &EARTH_ELLIPSOID)
        );
    }

    #[test]
    fn test_calculate_distance_half_circumference() {
        let a = GeoPoint::new(Degrees(0.0), Degrees(0.0));
        let b = GeoPoint::new(Degrees(0.0), Degrees(180.0));
        let result = calculate_distance(&a, &b, &EARTH_ELLIPSOID);
        assert!(is_within_tolerance(
            core::f64::consts::PI * EARTH_ELLIPSOID.radius().0,
            result.0,
            1e-9
        ));

        let north_pole = GeoPoint::new(Degrees(90.0), Degrees(0.0));
        let south_pole = GeoPoint::new(Degrees(-90.0), Degrees(0.0));
        let result = calculate_distance(&north_pole, &south_pole, &EARTH_ELLIPSOID);
        assert!(is_within_tolerance(
            core::f64::consts::PI * EARTH_ELLIPSOID.radius().0,
            result.0,
            1e-9
        ));
    }

    #[test]
    fn test_calculate_distance_matches_great_circle() {
        let a = GeoPoint::new(Degrees(42.0), Degrees(29.0));
        let b = GeoPoint::new(Degrees(39.0), Degrees(-77.0));

        let result = calculate_distance(&a, &b, &EARTH_ELLIPSOID);
        let gc_distance = great_circle::calculate_gc_distance(
            Angle::from(a.lat()),
            Angle::from(b.lat()),
            Angle::from(Degrees(b.lon().0 - a.lon().0)),
        );
        assert!(is_within_tolerance(
            gc_distance.0 * EARTH_ELLIPSOID.radius().0,
            result.0,
            1e-6
        ));
    }

    #[test]
    fn test_calculate_destination() {
        let a = GeoPoint::new(Degrees(0.0), Degrees(0.0));

        // A quarter of a great circle North reaches the pole
        let quarter = Kilometres(0.5 * core::f64::consts::PI * EARTH_ELLIPSOID.radius().0);
        let result = calculate_destination(&a, Degrees(0.0), quarter, &EARTH_ELLIPSOID).unwrap();
        assert!(is_within_tolerance(90.0, result.lat().0, 1e-6));

        // A quarter of a great circle East stays on the Equator
        let result = calculate_destination(&a, Degrees(90.0), quarter, &EARTH_ELLIPSOID).unwrap();
        assert!(is_within_tolerance(0.0, result.lat().0, 1e-9));
        assert!(is_within_tolerance(90.0, result.lon().0, 1e-9));

        // A quarter of a great circle West stays on the Equator
        let result = calculate_destination(&a, Degrees(270.0), quarter, &EARTH_ELLIPSOID).unwrap();
        assert!(is_within_tolerance(0.0, result.lat().0, 1e-9));
        assert!(is_within_tolerance(-90.0, result.lon().0, 1e-9));
    }

    #[test]
    fn test_calculate_destination_half_circumference() {
        let a = GeoPoint::new(Degrees(45.0), Degrees(0.0));
        let half = Kilometres(core::f64::consts::PI * EARTH_ELLIPSOID.radius().0);
        let result = calculate_destination(&a, Degrees(180.0), half, &EARTH_ELLIPSOID).unwrap();
        assert!(is_within_tolerance(-45.0, result.lat().0, 1e-9));
        assert!(is_within_tolerance(180.0, result.lon().0.abs(), 1e-9));
    }

    #[test]
    fn test_calculate_destination_invalid_distances() {
        let a = GeoPoint::new(Degrees(0.0), Degrees(0.0));
        assert_eq!(
            Err(Error::InvalidDistance { value: -0.5 }),
            calculate_destination(&a, Degrees(0.0), Kilometres(-0.5), &EARTH_ELLIPSOID)
        );
        assert!(matches!(
            calculate_destination(&a, Degrees(0.0), Kilometres(f64::NAN), &EARTH_ELLIPSOID),
            Err(Error::InvalidDistance { .. })
        ));

        // almost one full turn is allowed, more than one is not
        let full_turn = 2.0 * core::f64::consts::PI * EARTH_ELLIPSOID.radius().0;
        let result = calculate_destination(
            &a,
            Degrees(90.0),
            Kilometres(full_turn - 1.0),
            &EARTH_ELLIPSOID,
        )
        .unwrap();
        assert!(is_within_tolerance(0.0, result.lat().0, 1e-9));
        assert!(result.lon().0 < 0.0);
        assert!(-0.01 < result.lon().0);

        let too_far = Kilometres(full_turn + 1.0);
        assert_eq!(
            Err(Error::DistanceOutOfRange { value: too_far.0 }),
            calculate_destination(&a, Degrees(90.0), too_far, &EARTH_ELLIPSOID)
        );
    }
}
