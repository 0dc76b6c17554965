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

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Default fixed step, in seconds.
pub const DEFAULT_STEP_TIME: f64 = 0.001;

/// Default gravity, in m/s².
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, 0.0, -9.8);

/// Physics engine parameters of a world.
///
/// Built once from the world definition and validated at load time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Fixed integration step, in seconds.
    #[serde(default = "default_step_time")]
    pub step_time: f64,
    /// Uniform gravitational acceleration, in m/s².
    #[serde(default = "default_gravity")]
    pub gravity: Vec3,
}

fn default_step_time() -> f64 {
    DEFAULT_STEP_TIME
}

fn default_gravity() -> Vec3 {
    DEFAULT_GRAVITY
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            step_time: DEFAULT_STEP_TIME,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl PhysicsConfig {
    /// Returns the fixed step size (`dt`).
    #[inline]
    pub fn step_time(&self) -> f64 {
        self.step_time
    }
}

/// Tolerance policy of contact resolution.
///
/// These values are tuned policy constants rather than derived solver error
/// bounds. Free motion is limited by integrator truncation error, resting
/// motion by the precision of the contact clamp, hence two regimes.
#[derive(Debug, Clone, Copy)]
pub struct ContactPolicy;

impl ContactPolicy {
    /// Accuracy of free (pre-contact) motion against an analytic trajectory.
    pub const FREE_MOTION_TOLERANCE: f64 = 1e-4;

    /// Accuracy of a resting body against its resting height. A body this
    /// close to a resting surface is reported as in contact.
    pub const RESTING_TOLERANCE: f64 = 1e-5;
}
