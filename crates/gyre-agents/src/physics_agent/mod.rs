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

//! Acts as the **[A]gent** for the physics subsystem.
//!
//! The physics agent is the simulation stepper. It owns the physics lanes
//! (integration, contact, joints), runs them in that order for every fixed
//! step, advances the world clock, and notifies observers at well-defined
//! points of each step:
//! - registered hooks, invoked synchronously with a shared view of the world;
//! - channel subscribers, which receive one [`StepEvent`](gyre_core::physics::StepEvent)
//!   per completed step.

mod agent;
mod error;

pub use agent::*;
pub use error::StepError;
