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

// extern crate we're testing, same as any other code would do.
extern crate geosol;

use angle_sc::is_within_tolerance;
use geosol::{solve_direct, solve_inverse, Degrees, GeoPoint, Kilometres, EARTH_ELLIPSOID};

const INVERSE_FILENAME: &str = "data/reference_scenarios.csv";
const DIRECT_FILENAME: &str = "data/direct_scenarios.csv";

/// lat1, lon1, lat2, lon2, distance_km, azimuth_deg
type InverseRecord = (f64, f64, f64, f64, f64, f64);

/// lat1, lon1, azimuth_deg, distance_km, lat2, lon2
type DirectRecord = (f64, f64, f64, f64, f64, f64);

/// The smallest angle between a pair of longitudes or azimuths, in degrees.
fn angular_difference(a: f64, b: f64) -> f64 {
    let delta = libm::fabs(a - b) % 360.0;
    delta.min(360.0 - delta)
}

#[test]
fn test_inverse_reference_scenarios() -> Result<(), Box<dyn std::error::Error>> {
    let mut rdr = csv::Reader::from_path(INVERSE_FILENAME)?;

    let mut count = 0;
    for result in rdr.deserialize::<InverseRecord>() {
        let record = result?;

        let a = GeoPoint::new(Degrees(record.0), Degrees(record.1));
        let b = GeoPoint::new(Degrees(record.2), Degrees(record.3));
        let solution = solve_inverse(&a, &b, &EARTH_ELLIPSOID)?;

        let delta_distance = libm::fabs(record.4 - solution.distance.0);
        assert!(
            delta_distance < 1e-6,
            "distance, line: {count} delta: {delta_distance} distance: {:?}",
            solution.distance
        );

        let delta_azimuth = angular_difference(record.5, solution.azimuth.0);
        assert!(
            delta_azimuth < 1e-7,
            "azimuth, line: {count} delta: {delta_azimuth} azimuth: {:?}",
            solution.azimuth
        );
        assert!((0.0..360.0).contains(&solution.azimuth.0));

        count += 1;
    }
    assert_eq!(16, count);

    Ok(())
}

#[test]
fn test_direct_reference_scenarios() -> Result<(), Box<dyn std::error::Error>> {
    let mut rdr = csv::Reader::from_path(DIRECT_FILENAME)?;

    let mut count = 0;
    for result in rdr.deserialize::<DirectRecord>() {
        let record = result?;

        let a = GeoPoint::new(Degrees(record.0), Degrees(record.1));
        let destination = solve_direct(
            &a,
            Degrees(record.2),
            Kilometres(record.3),
            &EARTH_ELLIPSOID,
        )?;

        assert!(
            is_within_tolerance(record.4, destination.lat().0, 1e-9),
            "latitude, line: {count} latitude: {:?}",
            destination.lat()
        );
        assert!(
            angular_difference(record.5, destination.lon().0) < 1e-9,
            "longitude, line: {count} longitude: {:?}",
            destination.lon()
        );
        assert!((-180.0..180.0).contains(&destination.lon().0));

        count += 1;
    }
    assert_eq!(10, count);

    Ok(())
}

#[test]
fn test_one_degree_of_longitude_on_a_sphere() {
    let sphere = geosol::Ellipsoid::sphere(Kilometres(6_371.0));
    let a = GeoPoint::new(Degrees(0.0), Degrees(0.0));
    let b = GeoPoint::new(Degrees(0.0), Degrees(1.0));

    let solution = solve_inverse(&a, &b, &sphere).unwrap();
    assert!(is_within_tolerance(111.2, solution.distance.0, 0.01));
    assert!(is_within_tolerance(90.0, solution.azimuth.0, 1e-12));
}

#[test]
fn test_legacy_device_pi() {
    let legacy = geosol::Ellipsoid::legacy();
    let istanbul = GeoPoint::new(Degrees(42.0), Degrees(29.0));
    let washington = GeoPoint::new(Degrees(39.0), Degrees(-77.0));

    // the device's value of π differs from π by less than 1e-7
    let solution = solve_inverse(&istanbul, &washington, &legacy).unwrap();
    let reference = solve_inverse(&istanbul, &washington, &EARTH_ELLIPSOID).unwrap();
    assert!(is_within_tolerance(reference.distance.0, solution.distance.0, 1e-3));
    assert!(is_within_tolerance(reference.azimuth.0, solution.azimuth.0, 1e-5));
}
