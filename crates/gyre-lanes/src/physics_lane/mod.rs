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

//! Physics Lane
//!
//! The physics lanes advance a world by one fixed step. The stepper runs
//! them in a fixed order: integration, contact, joints.

mod contact_lane;
mod integration_lane;
mod joint_lane;

pub use contact_lane::*;
pub use integration_lane::*;
pub use joint_lane::*;

use gyre_core::lane::Lane;
use gyre_data::World;

/// A lane that mutates the world as one phase of a simulation step.
pub trait PhysicsLane: Lane {
    /// Runs this lane's phase over every model of `world`, for a step of `dt`
    /// seconds.
    fn step(&self, world: &mut World, dt: f64);
}
