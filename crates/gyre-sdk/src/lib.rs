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

//! The public-facing Software Development Kit (SDK) for Gyre.
//! This crate provides a simple and stable API to load worlds from their
//! definitions, step them and inspect or restore their state.

mod error;
mod simulation;
mod simulation_world;

pub use error::SimulationError;
pub use simulation::Simulation;
pub use simulation_world::SimulationWorld;

pub mod prelude {
    pub use gyre_agents::physics_agent::{HookId, StepError};
    pub use gyre_core::math::{Pose, Quaternion, Vec3};
    pub use gyre_core::physics::{
        BodyType, CollisionShape, JointKind, PhysicsConfig, StepEvent, StepInfo, StepPhase,
    };
    pub use gyre_data::{
        CollisionState, Entity, JointRef, LinkState, Model, ModelState, World, WorldState,
    };
    pub use gyre_lanes::scene_lane::DefinitionError;

    pub use crate::{Simulation, SimulationError, SimulationWorld};
}
