// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the 3D mathematics primitives used by the simulation.
//!
//! Everything here is `f64`: the stepper compares trajectories against
//! analytic references over thousands of steps, and single precision
//! accumulates too much rounding for that.
//!
//! All angular functions operate in **radians**.

// --- Fundamental Constants ---

/// A small constant for floating-point degeneracy checks.
pub const EPSILON: f64 = 1e-12;

pub use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

// --- Declare Sub-Modules ---

pub mod pose;
pub mod quaternion;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::pose::Pose;
pub use self::quaternion::Quaternion;
pub use self::vector::Vec3;

// --- Utility Functions ---

/// Wraps an angle into the `(-PI, PI]` range.
///
/// # Examples
///
/// ```
/// use gyre_core::math::{wrap_angle, TAU};
/// assert_eq!(wrap_angle(0.5), 0.5);
/// assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Returns `true` when every value is finite (neither NaN nor infinite).
#[inline]
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_wrap_angle_keeps_in_range_values() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert_eq!(wrap_angle(-1.0), -1.0);
        assert_eq!(wrap_angle(PI), PI);
    }

    #[test]
    fn test_wrap_angle_folds_out_of_range_values() {
        assert_abs_diff_eq!(wrap_angle(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(TAU + 0.25), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(-TAU - 0.25), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_all_finite() {
        assert!(all_finite(&[0.0, 1.0, -3.5]));
        assert!(!all_finite(&[0.0, f64::NAN]));
        assert!(!all_finite(&[f64::INFINITY]));
    }
}
