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

//! The live entity graph.
//!
//! A [`World`] exclusively owns an ordered list of [`Model`]s; each model
//! owns its [`Link`]s and [`Joint`]s; each link owns its [`Collision`]s.
//! Insertion order is significant everywhere: it is the traversal order of
//! state capture and of the stepping lanes.

mod entity;
mod error;
mod joint;
mod link;
mod model;

pub use entity::Entity;
pub use error::WorldError;
pub use joint::{Joint, JointRef, KinematicFrame};
pub use link::{Collision, Link};
pub use model::{JointSpec, Model};

use gyre_core::physics::PhysicsConfig;
use gyre_core::SimTime;

use crate::state::WorldState;

/// Root simulation container owning every model and the simulation clock.
#[derive(Debug, Clone)]
pub struct World {
    name: String,
    physics: PhysicsConfig,
    models: Vec<Model>,
    clock: SimTime,
}

impl World {
    /// Creates an empty world at time zero.
    pub fn new(name: impl Into<String>, physics: PhysicsConfig) -> Self {
        Self {
            name: name.into(),
            clock: SimTime::new(physics.step_time),
            physics,
            models: Vec::new(),
        }
    }

    /// The world's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physics engine parameters (step time, gravity).
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Elapsed simulation time, in seconds.
    pub fn sim_time(&self) -> f64 {
        self.clock.seconds()
    }

    /// The simulation clock.
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    /// Advances the clock by exactly one fixed step.
    ///
    /// Reserved for the stepper: nothing else moves simulation time.
    #[doc(hidden)]
    pub fn advance_clock(&mut self) {
        self.clock.advance();
    }

    /// Appends a model. Model names are unique within a world.
    pub fn add_model(&mut self, model: Model) -> Result<usize, WorldError> {
        if self.model(model.name()).is_some() {
            return Err(WorldError::DuplicateModel(model.name().to_string()));
        }
        self.models.push(model);
        Ok(self.models.len() - 1)
    }

    /// Number of models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// All models, in insertion order.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Mutable access to every model. The slice prevents structural edits.
    pub fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }

    /// Looks a model up by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name() == name)
    }

    /// Looks a model up by name, mutably.
    pub fn model_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.models.iter_mut().find(|m| m.name() == name)
    }

    /// Returns the model at `index`, in insertion order.
    pub fn model_at(&self, index: usize) -> Option<&Model> {
        self.models.get(index)
    }

    /// Total number of links across all models.
    pub fn link_count(&self) -> usize {
        self.models.iter().map(|m| m.link_count()).sum()
    }

    /// Captures the poses of every model, link and collision.
    pub fn state(&self) -> WorldState {
        WorldState::capture(self)
    }

    /// Writes the poses recorded in `state` back onto matching live entities.
    ///
    /// Entities are matched by name. Models or links present on only one
    /// side are left untouched; velocities and the clock are not modified.
    pub fn set_state(&mut self, state: &WorldState) {
        for model_state in state.model_states() {
            let Some(model) = self.model_mut(model_state.name()) else {
                log::warn!(
                    "World '{}': no model named '{}', snapshot entry ignored.",
                    self.name,
                    model_state.name()
                );
                continue;
            };

            if model.link_count() == 0 || model_state.link_state_count() == 0 {
                model.set_world_pose(model_state.pose());
                continue;
            }

            for link_state in model_state.link_states() {
                match model.link_mut(link_state.name()) {
                    Some(link) => link.set_world_pose(link_state.pose()),
                    None => log::warn!(
                        "Model '{}': no link named '{}', snapshot entry ignored.",
                        model_state.name(),
                        link_state.name()
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::math::{Pose, Vec3};
    use gyre_core::physics::{BodyType, CollisionShape, Inertial};

    fn box_model(name: &str, position: Vec3) -> Model {
        let mut model = Model::new(name, Pose::from_position(position));
        let mut link = Link::new("link", BodyType::Dynamic, Inertial::point_mass(1.0));
        link.add_collision(Collision::new(
            "collision",
            Pose::IDENTITY,
            CollisionShape::Box {
                half_extents: Vec3::new(0.5, 0.5, 0.5),
            },
        ))
        .unwrap();
        model.add_link(link, Pose::IDENTITY).unwrap();
        model
    }

    fn sample_world() -> World {
        let mut world = World::new("default", PhysicsConfig::default());
        world.add_model(box_model("box", Vec3::new(0.0, 0.0, 0.5))).unwrap();
        world
            .add_model(box_model("crate", Vec3::new(2.0, 0.0, 0.5)))
            .unwrap();
        world
    }

    #[test]
    fn test_lookup_by_name_and_index() {
        let world = sample_world();
        assert_eq!(world.model_count(), 2);
        assert_eq!(world.model_at(1).map(|m| m.name()), Some("crate"));
        assert!(world.model("box").is_some());
        assert!(world.model("missing").is_none());
        assert!(world.model_at(5).is_none());
    }

    #[test]
    fn test_duplicate_model_name_is_rejected() {
        let mut world = sample_world();
        let err = world.add_model(box_model("box", Vec3::ZERO)).unwrap_err();
        assert_eq!(err, WorldError::DuplicateModel("box".into()));
        assert_eq!(world.model_count(), 2);
    }

    #[test]
    fn test_clock_advances_by_whole_steps() {
        let mut world = sample_world();
        assert_eq!(world.sim_time(), 0.0);
        world.advance_clock();
        world.advance_clock();
        assert_eq!(world.clock().iterations(), 2);
        assert_eq!(world.sim_time(), 2.0 * world.physics().step_time());
    }

    #[test]
    fn test_set_state_ignores_unknown_models() {
        let mut world = sample_world();
        let state = world.state();

        let mut other = World::new("other", PhysicsConfig::default());
        other.add_model(box_model("box", Vec3::new(5.0, 5.0, 5.0))).unwrap();
        other
            .add_model(box_model("stranger", Vec3::new(9.0, 9.0, 9.0)))
            .unwrap();
        other.set_state(&state);

        assert_eq!(
            other.model("box").map(|m| m.world_pose().position),
            Some(Vec3::new(0.0, 0.0, 0.5))
        );
        assert_eq!(
            other.model("stranger").map(|m| m.world_pose().position),
            Some(Vec3::new(9.0, 9.0, 9.0))
        );

        // The source world is unaffected by entries it does not have.
        world.set_state(&other.state());
        assert_eq!(world.model_count(), 2);
        assert_eq!(
            world.model("crate").map(|m| m.world_pose().position),
            Some(Vec3::new(2.0, 0.0, 0.5))
        );
    }
}
