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

//! The error module contains the `Error` type returned by the geodetic
//! problem solvers.
//!
//! Rounding errors in the arguments of `acos` and `asin` are not errors:
//! they are clamped where they occur and never reach the caller.

use thiserror::Error;

/// The reasons that a geodetic problem cannot be solved.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// A latitude outside of the range [-90°, 90°].
    #[error("latitude out of range [-90, 90] degrees: {value}")]
    InvalidLatitude { value: f64 },
    /// A longitude outside of the range [-180°, 180°].
    #[error("longitude out of range [-180, 180] degrees: {value}")]
    InvalidLongitude { value: f64 },
    /// A negative or non-finite distance.
    #[error("distance must be finite and not negative, got {value} km")]
    InvalidDistance { value: f64 },
    /// A non-finite azimuth or angular offset.
    #[error("angle must be finite, got {value} degrees")]
    InvalidAngle { value: f64 },
    /// A distance that wraps around the sphere more than once.
    #[error("distance wraps around the sphere more than once: {value} km")]
    DistanceOutOfRange { value: f64 },
    /// The iterative azimuth solver did not converge within its cap.
    #[error("azimuth did not converge within {iterations} iterations")]
    NonConvergent { iterations: u32 },
    /// A calculation with valid inputs produced a non-finite value.
    #[error("geodetic computation produced a non-finite value")]
    NonFiniteComputation,
}

impl Error {
    /// Whether the error was caused by an input outside of its valid range.
    #[must_use]
    pub const fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLatitude { .. }
                | Self::InvalidLongitude { .. }
                | Self::InvalidDistance { .. }
                | Self::InvalidAngle { .. }
                | Self::DistanceOutOfRange { .. }
        )
    }

    /// Whether the error was caused by the azimuth solver failing to converge.
    #[must_use]
    pub const fn is_convergence_error(&self) -> bool {
        matches!(self, Self::NonConvergent { .. })
    }
}
