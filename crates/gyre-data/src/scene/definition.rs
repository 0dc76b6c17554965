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

//! Defines a stable, human-editable representation of a world using serializable data types.
//!
//! Definitions are plain data: they are validated and turned into a live
//! [`World`](crate::world::World) by the scene lane in one pass.

use gyre_core::math::{Pose, Vec3};
use gyre_core::physics::{BodyType, CollisionShape, Inertial, JointKind, JointLimits, PhysicsConfig};
use serde::{Deserialize, Serialize};

/// Parent name that anchors a joint to the world instead of a link.
pub const WORLD_ANCHOR: &str = "world";

fn default_world_name() -> String {
    "default".to_string()
}

fn default_axis() -> Vec3 {
    Vec3::Z
}

/// A pose written as a position and roll/pitch/yaw angles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseDefinition {
    /// Translation, in metres.
    #[serde(default)]
    pub position: Vec3,
    /// Roll, pitch and yaw, in radians.
    #[serde(default)]
    pub rpy: Vec3,
}

impl PoseDefinition {
    /// Converts to a pose.
    pub fn to_pose(&self) -> Pose {
        Pose::from_xyz_rpy(self.position, self.rpy)
    }
}

/// The root container of a world definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDefinition {
    /// World name, used to look the world up once loaded.
    #[serde(default = "default_world_name")]
    pub name: String,
    /// Physics engine parameters.
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Models, in load order.
    #[serde(default)]
    pub models: Vec<ModelDefinition>,
}

/// A model and everything it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Model name, unique within the world.
    pub name: String,
    /// World pose of the model frame.
    #[serde(default)]
    pub pose: PoseDefinition,
    /// Static models never move; every link becomes [`BodyType::Static`].
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Links; the first one is the root link.
    #[serde(default)]
    pub links: Vec<LinkDefinition>,
    /// Joints between the links.
    #[serde(default)]
    pub joints: Vec<JointDefinition>,
}

/// A link and its collisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDefinition {
    /// Link name, unique within the model.
    pub name: String,
    /// Pose in the model frame.
    #[serde(default)]
    pub pose: PoseDefinition,
    /// Overrides the body type. Defaults to dynamic, or static in a static model.
    #[serde(default)]
    pub body_type: Option<BodyType>,
    /// Mass properties. Defaults to a 1 kg point mass.
    #[serde(default)]
    pub inertial: Inertial,
    /// Collisions, in order.
    #[serde(default)]
    pub collisions: Vec<CollisionDefinition>,
}

impl LinkDefinition {
    /// Body type the link is built with inside a model that is or is not static.
    pub fn resolved_body_type(&self, model_is_static: bool) -> BodyType {
        if model_is_static {
            BodyType::Static
        } else {
            self.body_type.unwrap_or_default()
        }
    }
}

/// A collision shape attached to a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionDefinition {
    /// Collision name, unique within the link.
    pub name: String,
    /// Pose in the link frame.
    #[serde(default)]
    pub pose: PoseDefinition,
    /// Geometry.
    pub shape: CollisionShape,
}

/// A joint between two links of a model, or between a link and the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointDefinition {
    /// Joint name, unique within the model.
    pub name: String,
    /// Constraint kind.
    pub kind: JointKind,
    /// Parent link name, or [`WORLD_ANCHOR`].
    pub parent: String,
    /// Child link name.
    pub child: String,
    /// Anchor point in the child link frame.
    #[serde(default)]
    pub anchor: Vec3,
    /// Axis in the model frame.
    #[serde(default = "default_axis")]
    pub axis: Vec3,
    /// Optional position limits.
    #[serde(default)]
    pub limits: Option<JointLimits>,
}

impl JointDefinition {
    /// Parent link name, or `None` when anchored to the world.
    pub fn parent_link(&self) -> Option<&str> {
        (self.parent != WORLD_ANCHOR).then_some(self.parent.as_str())
    }
}
