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

//! Pose snapshots of the entity graph.
//!
//! A [`WorldState`] mirrors the World → Model → Link → Collision hierarchy
//! and records names and world poses only. Snapshots are plain values owned
//! by the caller; they hold no reference to the world they came from.

use bincode::config;
use gyre_core::math::Pose;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{Entity, Link, Model, World};

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum StateError {
    /// The snapshot could not be encoded.
    #[error("failed to encode world state: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    /// The bytes are not a valid encoded snapshot.
    #[error("failed to decode world state: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Snapshot of a whole world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    name: String,
    sim_time: f64,
    model_states: Vec<ModelState>,
}

impl WorldState {
    pub(crate) fn capture(world: &World) -> Self {
        Self {
            name: world.name().to_string(),
            sim_time: world.sim_time(),
            model_states: world.models().iter().map(ModelState::capture).collect(),
        }
    }

    /// Name of the captured world.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Simulation time at capture, in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Number of model states.
    pub fn model_state_count(&self) -> usize {
        self.model_states.len()
    }

    /// Model state at `index`, in capture order.
    pub fn model_state(&self, index: usize) -> Option<&ModelState> {
        self.model_states.get(index)
    }

    /// Model state named `name`.
    pub fn model_state_by_name(&self, name: &str) -> Option<&ModelState> {
        self.model_states.iter().find(|m| m.name == name)
    }

    /// All model states, in capture order.
    pub fn model_states(&self) -> &[ModelState] {
        &self.model_states
    }

    /// Encodes the snapshot with bincode's standard configuration.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        Ok(bincode::serde::encode_to_vec(self, config::standard())?)
    }

    /// Decodes a snapshot produced by [`WorldState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let (state, _) = bincode::serde::decode_from_slice(bytes, config::standard())?;
        Ok(state)
    }
}

fn name_and_pose<E: Entity>(entity: &E) -> (String, Pose) {
    (entity.name().to_string(), entity.world_pose())
}

/// Snapshot of one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    name: String,
    pose: Pose,
    link_states: Vec<LinkState>,
}

impl ModelState {
    fn capture(model: &Model) -> Self {
        let (name, pose) = name_and_pose(model);
        Self {
            name,
            pose,
            link_states: model.links().iter().map(LinkState::capture).collect(),
        }
    }

    /// Name of the captured model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World pose of the model frame.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Number of link states.
    pub fn link_state_count(&self) -> usize {
        self.link_states.len()
    }

    /// Link state at `index`.
    pub fn link_state(&self, index: usize) -> Option<&LinkState> {
        self.link_states.get(index)
    }

    /// Link state named `name`.
    pub fn link_state_by_name(&self, name: &str) -> Option<&LinkState> {
        self.link_states.iter().find(|l| l.name == name)
    }

    /// All link states.
    pub fn link_states(&self) -> &[LinkState] {
        &self.link_states
    }
}

/// Snapshot of one link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkState {
    name: String,
    pose: Pose,
    collision_states: Vec<CollisionState>,
}

impl LinkState {
    fn capture(link: &Link) -> Self {
        let (name, pose) = name_and_pose(link);
        Self {
            name,
            pose,
            collision_states: link
                .collisions()
                .iter()
                .map(|collision| CollisionState {
                    name: collision.name().to_string(),
                    pose: collision.world_pose_on(link.pose),
                })
                .collect(),
        }
    }

    /// Name of the captured link.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World pose of the link.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Number of collision states.
    pub fn collision_state_count(&self) -> usize {
        self.collision_states.len()
    }

    /// Collision state at `index`.
    pub fn collision_state(&self, index: usize) -> Option<&CollisionState> {
        self.collision_states.get(index)
    }

    /// Collision state named `name`.
    pub fn collision_state_by_name(&self, name: &str) -> Option<&CollisionState> {
        self.collision_states.iter().find(|c| c.name == name)
    }

    /// All collision states.
    pub fn collision_states(&self) -> &[CollisionState] {
        &self.collision_states
    }
}

/// Snapshot of one collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionState {
    name: String,
    pose: Pose,
}

impl CollisionState {
    /// Name of the captured collision.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World pose of the collision.
    pub fn pose(&self) -> Pose {
        self.pose
    }
}
