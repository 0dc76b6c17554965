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

//! Defines the PhysicsAgent, the central orchestrator of a simulation step.

use std::fmt;
use std::time::Instant;

use gyre_core::event::EventBus;
use gyre_core::lane::LaneKind;
use gyre_core::physics::{StepEvent, StepInfo, StepPhase};
use gyre_data::World;
use gyre_lanes::physics_lane::{ContactLane, IntegrationLane, JointLane, PhysicsLane};

use super::StepError;

/// Callback invoked at a fixed phase of every step.
pub type StepHook = Box<dyn FnMut(&World, &StepInfo) + Send>;

/// Handle returned by [`PhysicsAgent::add_hook`], used to remove the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// The agent responsible for stepping a world.
///
/// Each step runs every lane in order, fires the hooks registered for the
/// phase that lane completes, then advances the world clock by exactly one
/// fixed step and publishes a [`StepEvent`].
pub struct PhysicsAgent {
    /// Physics lanes, in execution order.
    lanes: Vec<Box<dyn PhysicsLane>>,
    /// Hooks, in registration order.
    hooks: Vec<(HookId, StepPhase, StepHook)>,
    next_hook: u64,
    /// Per-step notifications.
    events: EventBus<StepEvent>,
}

impl fmt::Debug for PhysicsAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsAgent")
            .field("lanes", &self.lane_names())
            .field("hooks", &self.hooks.len())
            .field("subscribers", &self.events.subscriber_count())
            .finish()
    }
}

impl Default for PhysicsAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsAgent {
    /// Creates an agent with the standard lanes: integration, contact, joints.
    pub fn new() -> Self {
        let lanes: Vec<Box<dyn PhysicsLane>> = vec![
            Box::new(IntegrationLane::new()),
            Box::new(ContactLane::new()),
            Box::new(JointLane::new()),
        ];
        Self::with_lanes(lanes)
    }

    /// Creates an agent running `lanes` in the given order.
    pub fn with_lanes(lanes: Vec<Box<dyn PhysicsLane>>) -> Self {
        Self {
            lanes,
            hooks: Vec::new(),
            next_hook: 0,
            events: EventBus::new(),
        }
    }

    /// Strategy names of the lanes, in execution order.
    pub fn lane_names(&self) -> Vec<&'static str> {
        self.lanes.iter().map(|lane| lane.strategy_name()).collect()
    }

    /// Registers `hook` to run at `phase` of every subsequent step.
    ///
    /// Hooks of the same phase run in registration order.
    pub fn add_hook<F>(&mut self, phase: StepPhase, hook: F) -> HookId
    where
        F: FnMut(&World, &StepInfo) + Send + 'static,
    {
        let id = HookId(self.next_hook);
        self.next_hook += 1;
        self.hooks.push((id, phase, Box::new(hook)));
        id
    }

    /// Unregisters a hook. Returns `false` if it was already removed.
    pub fn remove_hook(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(hook_id, _, _)| *hook_id != id);
        self.hooks.len() != before
    }

    /// Returns a channel receiving one event per completed step.
    pub fn subscribe(&mut self) -> flume::Receiver<StepEvent> {
        self.events.subscribe()
    }

    /// Advances `world` by `steps` fixed steps.
    ///
    /// Zero steps is a no-op. A negative count is rejected before anything
    /// is touched.
    pub fn step_world(&mut self, world: &mut World, steps: i64) -> Result<(), StepError> {
        if steps < 0 {
            return Err(StepError::InvalidStepCount(steps));
        }
        if steps == 0 {
            return Ok(());
        }

        let start = Instant::now();
        for _ in 0..steps {
            self.step_once(world);
        }

        log::debug!(
            "World '{}': {} step(s) to {} in {:.3} ms.",
            world.name(),
            steps,
            world.clock(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    /// Runs exactly one step.
    pub fn step_once(&mut self, world: &mut World) {
        let step_time = world.physics().step_time();
        let iteration = world.clock().iterations();
        log::trace!("World '{}': step #{}.", world.name(), iteration);

        // Indexing keeps the borrow on `self.lanes` separate from `self.hooks`.
        for index in 0..self.lanes.len() {
            let lane = &self.lanes[index];
            lane.step(world, step_time);
            if let Some(phase) = phase_after(lane.lane_kind()) {
                self.fire(phase, world, iteration, step_time);
            }
        }

        world.advance_clock();
        self.fire(StepPhase::PostStep, world, iteration, step_time);
        self.events.publish(StepEvent {
            iterations: world.clock().iterations(),
            sim_time: world.sim_time(),
        });
    }

    fn fire(&mut self, phase: StepPhase, world: &World, iteration: u64, step_time: f64) {
        let info = StepInfo {
            iteration,
            phase,
            step_time,
        };
        for (_, hook_phase, hook) in &mut self.hooks {
            if *hook_phase == phase {
                hook(world, &info);
            }
        }
    }
}

/// The phase a lane of the given kind completes.
fn phase_after(kind: LaneKind) -> Option<StepPhase> {
    match kind {
        LaneKind::Integration => Some(StepPhase::PostIntegration),
        LaneKind::Contact => Some(StepPhase::PostContact),
        LaneKind::Constraint => Some(StepPhase::PostJoint),
        LaneKind::Scene => None,
    }
}
