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

//! The earth module contains the parameters of the default Earth model used
//! by the device: a mean radius sphere for distances and the WGS 84
//! flattening for azimuths.

use crate::{Kilometres, Radians};

/// The mean radius of the Earth in kilometres.
pub const R: Kilometres = Kilometres(6_371.0);

/// The WGS 84 flattening, a ratio.  
/// This is the flattening of the ellipsoid at the poles.
pub const F: f64 = 1.0 / 298.257_223_563;

/// The value of π used to convert between degrees and radians.
pub const PI: f64 = core::f64::consts::PI;

/// The value of π used by earlier versions of the device.
#[allow(clippy::approx_constant)]
pub const LEGACY_PI: f64 = 3.141_592_7;

/// The change in longitude on the auxiliary sphere below which the azimuth
/// solver has converged.
pub const TOLERANCE: Radians = Radians(1e-9);

/// The maximum number of iterations of the azimuth solver.
pub const MAX_ITERATIONS: u32 = 100;
