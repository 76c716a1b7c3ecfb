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

//! The geodesic module contains functions for calculating the initial
//! azimuth of the geodesic between two positions on the surface of an
//! ellipsoid, using Vincenty's inverse formula.
//!
//! The longitude difference on the auxiliary sphere is found by fixed point
//! iteration. The iteration stops as soon as the change in the longitude
//! difference is below the `Ellipsoid` tolerance, but never exceeds its
//! iteration cap: nearly antipodal positions, which may never converge,
//! return `Error::NonConvergent`.
//!
//! [Wikipedia Vincenty formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae)

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::{normalize_azimuth, wrap_longitude_difference};
use crate::{Degrees, Ellipsoid, Error, GeoPoint, Radians};

/// Calculate Vincenty's correction term `C`.
/// * `f` - the flattening of the ellipsoid.
/// * `cos_sq_alpha` - the square of the cosine of the azimuth at the Equator.
#[must_use]
fn calculate_correction(f: f64, cos_sq_alpha: f64) -> f64 {
    f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha))
}

/// The sine of the smallest great circle arc between distinct points on the
/// auxiliary sphere. Arcs with a smaller sine are coincident or antipodal.
pub const MIN_SIN_ARC: f64 = 2.0 * f64::EPSILON;

/// Calculate the sine and cosine of the great circle arc between a pair of
/// points on the auxiliary sphere.
/// * `sin_u1`, `cos_u1` - the sine and cosine of the start reduced latitude.
/// * `sin_u2`, `cos_u2` - the sine and cosine of the finish reduced latitude.
/// * `lambda` - the longitude difference on the auxiliary sphere.
#[allow(clippy::similar_names)]
#[must_use]
fn calculate_sin_cos_arc(
    (sin_u1, cos_u1): (f64, f64),
    (sin_u2, cos_u2): (f64, f64),
    lambda: f64,
) -> (f64, f64) {
    let (sin_lambda, cos_lambda) = (libm::sin(lambda), libm::cos(lambda));
    let temp = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
    let sin_sigma = libm::sqrt((cos_u2 * sin_lambda) * (cos_u2 * sin_lambda) + temp * temp);
    let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
    (sin_sigma, cos_sigma)
}

/// Calculate the next longitude difference of the iteration.
/// * `delta_long` - the geodetic longitude difference.
/// * `f` - the flattening of the ellipsoid.
/// * `sin_alpha` - the sine of the azimuth at the Equator.
/// * `(sigma, sin_sigma, cos_sigma)` - the great circle arc.
/// * `cos_2sigma_m` - the cosine of twice the arc to the arc midpoint.
#[must_use]
fn calculate_lambda(
    delta_long: f64,
    f: f64,
    sin_alpha: f64,
    (sigma, sin_sigma, cos_sigma): (f64, f64, f64),
    cos_2sigma_m: f64,
) -> f64 {
    let c = calculate_correction(f, 1.0 - sin_alpha * sin_alpha);
    delta_long
        + (1.0 - c)
            * f
            * sin_alpha
            * (sigma
                + c * sin_sigma
                    * (cos_2sigma_m
                        + c * cos_sigma * (2.0 * cos_2sigma_m * cos_2sigma_m - 1.0)))
}

/// Whether a pair of points are at the same place: the great circle arc
/// between them is too small to define an azimuth.
/// Different longitudes at the same pole are coincident.
/// * `beta1`, `beta2` - the reduced latitudes of the points.
/// * `delta_long` - the longitude difference.
#[must_use]
pub fn is_coincident(beta1: Radians, beta2: Radians, delta_long: Radians) -> bool {
    let (sin_sigma, cos_sigma) = calculate_sin_cos_arc(
        (libm::sin(beta1.0), libm::cos(beta1.0)),
        (libm::sin(beta2.0), libm::cos(beta2.0)),
        delta_long.0,
    );
    sin_sigma < MIN_SIN_ARC && 0.0 < cos_sigma
}

/// Calculate the azimuth at the start of a great circle arc on the
/// auxiliary sphere.
/// * `beta1`, `beta2` - the reduced latitudes of the start and finish points.
/// * `lambda` - the longitude difference on the auxiliary sphere.
///
/// returns the azimuth in radians, in the range [-π, π].
#[allow(clippy::similar_names)]
#[must_use]
pub fn calculate_aux_azimuth(beta1: Radians, beta2: Radians, lambda: Radians) -> Radians {
    let (sin_u1, cos_u1) = (libm::sin(beta1.0), libm::cos(beta1.0));
    let (sin_u2, cos_u2) = (libm::sin(beta2.0), libm::cos(beta2.0));
    Radians(libm::atan2(
        cos_u2 * libm::sin(lambda.0),
        cos_u1 * sin_u2 - sin_u1 * cos_u2 * libm::cos(lambda.0),
    ))
}

/// Find the longitude difference on the auxiliary sphere between a pair of
/// points by fixed point iteration.
/// * `beta1`, `beta2` - the reduced latitudes of the start and finish points.
/// * `delta_long` - the geodetic longitude difference, in the range [-π, π].
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the longitude difference on the auxiliary sphere and the number
/// of iterations taken.
///
/// # Errors
///
/// `Error::NonConvergent` if the iteration cap is reached before the
/// iteration converges, or if the points are antipodal.
/// `Error::NonFiniteComputation` if the iteration diverges to a non-finite
/// value.
#[allow(clippy::similar_names)]
pub fn find_aux_longitude(
    beta1: Radians,
    beta2: Radians,
    delta_long: Radians,
    ellipsoid: &Ellipsoid,
) -> Result<(Radians, u32), Error> {
    let f = ellipsoid.f();
    let max_iterations = ellipsoid.max_iterations();

    let (sin_u1, cos_u1) = (libm::sin(beta1.0), libm::cos(beta1.0));
    let (sin_u2, cos_u2) = (libm::sin(beta2.0), libm::cos(beta2.0));

    let mut lambda = delta_long.0;
    for iteration in 1..=max_iterations {
        let (sin_sigma, cos_sigma) =
            calculate_sin_cos_arc((sin_u1, cos_u1), (sin_u2, cos_u2), lambda);

        // Coincident or antipodal points
        if sin_sigma < MIN_SIN_ARC {
            if 0.0 < cos_sigma {
                return Ok((Radians(lambda), iteration));
            }
            log::warn!("azimuth between antipodal points is undefined");
            return Err(Error::NonConvergent {
                iterations: iteration,
            });
        }

        let sigma = libm::atan2(sin_sigma, cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * libm::sin(lambda) / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // cos_sq_alpha is zero on an equatorial line
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let previous = lambda;
        lambda = calculate_lambda(
            delta_long.0,
            f,
            sin_alpha,
            (sigma, sin_sigma, cos_sigma),
            cos_2sigma_m,
        );
        if !lambda.is_finite() {
            return Err(Error::NonFiniteComputation);
        }

        let delta = libm::fabs(lambda - previous);
        log::trace!("iteration {iteration}: lambda {lambda}, delta {delta}");
        if delta < ellipsoid.tolerance().0 {
            log::debug!("azimuth converged after {iteration} iterations");
            return Ok((Radians(lambda), iteration));
        }
    }

    log::warn!("azimuth did not converge within {max_iterations} iterations");
    Err(Error::NonConvergent {
        iterations: max_iterations,
    })
}

/// Calculate the initial azimuth of the geodesic between a pair of positions.
/// @pre the positions are valid.
/// * `a`, `b` - the start and finish positions.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the azimuth at the start position in the range [0°, 360°) and the
/// number of iterations taken. The azimuth between coincident positions,
/// including different longitudes at the same pole, is zero without any
/// iterations.
///
/// # Examples
/// ```
/// use geosol::{geodesic, Degrees, GeoPoint, EARTH_ELLIPSOID};
///
/// let a = GeoPoint::new(Degrees(0.0), Degrees(0.0));
/// let b = GeoPoint::new(Degrees(0.0), Degrees(1.0));
/// let (azimuth, _iterations) = geodesic::calculate_azimuth(&a, &b, &EARTH_ELLIPSOID).unwrap();
/// assert!((azimuth.0 - 90.0).abs() < 1e-9);
/// ```
///
/// # Errors
///
/// `Error::NonConvergent` if the azimuth fails to converge, see
/// `find_aux_longitude`.
pub fn calculate_azimuth(
    a: &GeoPoint,
    b: &GeoPoint,
    ellipsoid: &Ellipsoid,
) -> Result<(Degrees, u32), Error> {
    let beta1 = ellipsoid.calculate_reduced_latitude(a.lat());
    let beta2 = ellipsoid.calculate_reduced_latitude(b.lat());
    let delta_long = wrap_longitude_difference(
        ellipsoid.deg_to_rad(Degrees(b.lon().0 - a.lon().0)),
        ellipsoid.pi(),
    );

    if is_coincident(beta1, beta2, delta_long) {
        return Ok((Degrees(0.0), 0));
    }

    let (lambda, iterations) = find_aux_longitude(beta1, beta2, delta_long, ellipsoid)?;
    let azimuth = calculate_aux_azimuth(beta1, beta2, lambda);
    Ok((normalize_azimuth(ellipsoid.rad_to_deg(azimuth)), iterations))
}
