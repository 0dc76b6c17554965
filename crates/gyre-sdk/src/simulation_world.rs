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

//! The `SimulationWorld` facade: a loaded world together with its stepper.

use gyre_agents::physics_agent::{HookId, PhysicsAgent};
use gyre_core::physics::{PhysicsConfig, StepEvent, StepInfo, StepPhase};
use gyre_data::{Model, World, WorldState};

use crate::SimulationError;

/// A loaded world and the agent that steps it.
///
/// Every operation that touches the world borrows the facade, so a step can
/// never interleave with a pose write, a snapshot or a joint query. Distinct
/// `SimulationWorld`s share nothing and can be moved to other threads.
///
/// Mutable access stops at models: simulation time only moves through
/// [`SimulationWorld::step_world`].
///
/// ```compile_fail
/// use gyre_core::physics::PhysicsConfig;
/// use gyre_data::World;
/// use gyre_sdk::SimulationWorld;
///
/// let mut world = SimulationWorld::new(World::new("default", PhysicsConfig::default()));
/// world.world_mut().advance_clock();
/// ```
#[derive(Debug)]
pub struct SimulationWorld {
    world: World,
    agent: PhysicsAgent,
}

impl SimulationWorld {
    /// Wraps `world` with the standard physics pipeline.
    pub fn new(world: World) -> Self {
        Self::with_agent(world, PhysicsAgent::new())
    }

    /// Wraps `world` with a custom agent.
    pub fn with_agent(world: World, agent: PhysicsAgent) -> Self {
        Self { world, agent }
    }

    /// The world name.
    pub fn name(&self) -> &str {
        self.world.name()
    }

    /// Advances the world by `steps` fixed steps.
    ///
    /// `0` does nothing and a negative count fails before any step runs.
    pub fn step_world(&mut self, steps: i64) -> Result<(), SimulationError> {
        self.agent.step_world(&mut self.world, steps)?;
        Ok(())
    }

    /// Simulated time, in seconds.
    pub fn sim_time(&self) -> f64 {
        self.world.sim_time()
    }

    /// Physics parameters of the world.
    pub fn physics(&self) -> &PhysicsConfig {
        self.world.physics()
    }

    /// Looks up a model by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.world.model(name)
    }

    /// Looks up a model by name, mutably.
    pub fn model_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.world.model_mut(name)
    }

    /// Captures the poses of every model, link and collision.
    pub fn state(&self) -> WorldState {
        self.world.state()
    }

    /// Restores poses from a snapshot.
    pub fn set_state(&mut self, state: &WorldState) {
        self.world.set_state(state);
    }

    /// Registers a hook run at `phase` of every step.
    pub fn add_hook<F>(&mut self, phase: StepPhase, hook: F) -> HookId
    where
        F: FnMut(&World, &StepInfo) + Send + 'static,
    {
        self.agent.add_hook(phase, hook)
    }

    /// Unregisters a hook.
    pub fn remove_hook(&mut self, id: HookId) -> bool {
        self.agent.remove_hook(id)
    }

    /// Returns a channel receiving one event per completed step.
    pub fn subscribe(&mut self) -> flume::Receiver<StepEvent> {
        self.agent.subscribe()
    }

    /// The underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }
}
