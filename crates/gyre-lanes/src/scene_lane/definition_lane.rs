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

//! A loading strategy that reads worlds from their RON definition.

use gyre_core::lane::{Lane, LaneKind};
use gyre_core::math::{all_finite, Pose, Vec3};
use gyre_core::physics::{BodyType, CollisionShape, PhysicsConfig};
use gyre_data::scene::{
    CollisionDefinition, JointDefinition, LinkDefinition, ModelDefinition, PoseDefinition,
    WorldDefinition,
};
use gyre_data::{Collision, JointSpec, Link, Model, World};

use super::DefinitionError;

/// Builds validated worlds from [`WorldDefinition`]s, and writes definitions
/// back as human-readable RON.
#[derive(Debug, Default)]
pub struct DefinitionLane;

impl DefinitionLane {
    /// Creates a new instance of the DefinitionLane.
    pub fn new() -> Self {
        Self
    }

    /// Parses a RON world definition without building it.
    pub fn parse(&self, text: &str) -> Result<WorldDefinition, DefinitionError> {
        Ok(ron::from_str(text)?)
    }

    /// Parses and builds a world in one go.
    pub fn load(&self, text: &str) -> Result<World, DefinitionError> {
        let definition = self.parse(text)?;
        self.build(&definition)
    }

    /// Writes a definition as pretty RON.
    pub fn serialize(&self, definition: &WorldDefinition) -> Result<String, DefinitionError> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(definition, pretty_config)?)
    }

    /// Validates `definition` and assembles a live world from it.
    ///
    /// Nothing escapes on failure: the world under construction is dropped.
    pub fn build(&self, definition: &WorldDefinition) -> Result<World, DefinitionError> {
        if definition.name.is_empty() {
            return Err(DefinitionError::EmptyWorldName);
        }
        validate_physics(&definition.physics)?;

        let mut world = World::new(definition.name.clone(), definition.physics);
        for model in &definition.models {
            world.add_model(build_model(model)?)?;
        }

        log::debug!(
            "Built world '{}' with {} model(s) and {} link(s).",
            world.name(),
            world.model_count(),
            world.link_count()
        );
        Ok(world)
    }
}

impl Lane for DefinitionLane {
    fn strategy_name(&self) -> &'static str {
        "GYRE_DEFINITION_RON_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Scene
    }
}

fn validate_physics(physics: &PhysicsConfig) -> Result<(), DefinitionError> {
    if !(physics.step_time.is_finite() && physics.step_time > 0.0) {
        return Err(DefinitionError::InvalidStepTime(physics.step_time));
    }
    if !physics.gravity.is_finite() {
        return Err(DefinitionError::NonFiniteValue("physics gravity".into()));
    }
    Ok(())
}

fn checked_pose(pose: &PoseDefinition, context: impl FnOnce() -> String) -> Result<Pose, DefinitionError> {
    if pose.position.is_finite() && pose.rpy.is_finite() {
        Ok(pose.to_pose())
    } else {
        Err(DefinitionError::NonFiniteValue(context()))
    }
}

fn build_model(definition: &ModelDefinition) -> Result<Model, DefinitionError> {
    if definition.name.is_empty() {
        return Err(DefinitionError::EmptyName("model"));
    }
    let pose = checked_pose(&definition.pose, || format!("pose of model '{}'", definition.name))?;

    let mut model = Model::new(definition.name.clone(), pose);
    for link in &definition.links {
        let local_pose = checked_pose(&link.pose, || {
            format!("pose of link '{}' in model '{}'", link.name, definition.name)
        })?;
        model.add_link(build_link(definition, link)?, local_pose)?;
    }
    for joint in &definition.joints {
        connect_joint(&mut model, joint)?;
    }
    Ok(model)
}

fn build_link(model: &ModelDefinition, definition: &LinkDefinition) -> Result<Link, DefinitionError> {
    if definition.name.is_empty() {
        return Err(DefinitionError::EmptyName("link"));
    }

    let inertial = definition.inertial;
    let moments = inertial.principal_moments;
    if !all_finite(&[inertial.mass, moments.x, moments.y, moments.z]) {
        return Err(DefinitionError::NonFiniteValue(format!(
            "inertial of link '{}'",
            definition.name
        )));
    }
    let body_type = definition.resolved_body_type(model.is_static);
    let negative_moment = moments.x < 0.0 || moments.y < 0.0 || moments.z < 0.0;
    if (body_type == BodyType::Dynamic && inertial.mass <= 0.0) || negative_moment {
        return Err(DefinitionError::InvalidMass {
            model: model.name.clone(),
            link: definition.name.clone(),
            mass: inertial.mass,
        });
    }

    let mut link = Link::new(definition.name.clone(), body_type, inertial);
    for collision in &definition.collisions {
        link.add_collision(build_collision(&definition.name, collision)?)?;
    }
    Ok(link)
}

fn build_collision(
    link: &str,
    definition: &CollisionDefinition,
) -> Result<Collision, DefinitionError> {
    if definition.name.is_empty() {
        return Err(DefinitionError::EmptyName("collision"));
    }
    let pose = checked_pose(&definition.pose, || {
        format!("pose of collision '{}' on link '{link}'", definition.name)
    })?;

    let invalid = |reason| DefinitionError::InvalidShape {
        link: link.to_string(),
        collision: definition.name.clone(),
        reason,
    };
    let shape = match definition.shape {
        CollisionShape::Box { half_extents } => {
            if !half_extents.is_finite()
                || half_extents.x <= 0.0
                || half_extents.y <= 0.0
                || half_extents.z <= 0.0
            {
                return Err(invalid("box half extents must be positive"));
            }
            definition.shape
        }
        CollisionShape::Sphere { radius } => {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(invalid("sphere radius must be positive"));
            }
            definition.shape
        }
        CollisionShape::Cylinder {
            radius,
            half_length,
        } => {
            if !(all_finite(&[radius, half_length]) && radius > 0.0 && half_length > 0.0) {
                return Err(invalid("cylinder radius and half length must be positive"));
            }
            definition.shape
        }
        CollisionShape::Plane { normal, offset } => {
            if !(normal.is_finite() && offset.is_finite()) {
                return Err(invalid("plane normal and offset must be finite"));
            }
            let normal = normal.normalize();
            if normal == Vec3::ZERO {
                return Err(invalid("plane normal must not be zero"));
            }
            CollisionShape::Plane { normal, offset }
        }
    };
    log::trace!(
        "Collision '{}' on link '{link}': {}.",
        definition.name,
        shape.kind_name()
    );
    Ok(Collision::new(definition.name.clone(), pose, shape))
}

fn connect_joint(model: &mut Model, definition: &JointDefinition) -> Result<(), DefinitionError> {
    if definition.name.is_empty() {
        return Err(DefinitionError::EmptyName("joint"));
    }
    if !(definition.anchor.is_finite() && definition.axis.is_finite()) {
        return Err(DefinitionError::NonFiniteValue(format!(
            "anchor or axis of joint '{}'",
            definition.name
        )));
    }
    if let Some(limits) = definition.limits {
        if !all_finite(&[limits.lower, limits.upper]) || limits.lower > limits.upper {
            return Err(DefinitionError::InvalidLimits(definition.name.clone()));
        }
    }

    model.connect(JointSpec {
        name: &definition.name,
        kind: definition.kind,
        parent: definition.parent_link(),
        child: &definition.child,
        anchor: definition.anchor,
        axis: definition.axis,
        limits: definition.limits,
    })?;
    Ok(())
}
