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

use gyre_core::math::{Pose, Vec3};
use gyre_core::physics::{BodyType, CollisionShape, Inertial};

use super::{Entity, WorldError};

/// A geometric shape attached to a link at a fixed local pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    name: String,
    local_pose: Pose,
    shape: CollisionShape,
}

impl Collision {
    /// Creates a collision at `local_pose` relative to its link.
    pub fn new(name: impl Into<String>, local_pose: Pose, shape: CollisionShape) -> Self {
        Self {
            name: name.into(),
            local_pose,
            shape,
        }
    }

    /// The collision's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pose relative to the owning link.
    pub fn local_pose(&self) -> Pose {
        self.local_pose
    }

    /// The collision geometry.
    pub fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    /// World pose, given the world pose of the owning link.
    #[inline]
    pub fn world_pose_on(&self, link_pose: Pose) -> Pose {
        link_pose * self.local_pose
    }
}

/// A rigid body: mass properties, live kinematic state and collisions.
///
/// The link frame origin is the centre of mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    name: String,
    body_type: BodyType,
    inertial: Inertial,
    collisions: Vec<Collision>,

    /// World pose of the link frame.
    pub pose: Pose,
    /// Linear velocity of the centre of mass, world frame.
    pub linear_velocity: Vec3,
    /// Angular velocity, world frame.
    pub angular_velocity: Vec3,
    /// External force accumulated for the next step, world frame.
    pub force: Vec3,
    /// External torque accumulated for the next step, world frame.
    pub torque: Vec3,
    /// Whether the link rested on a surface during the last step.
    pub in_contact: bool,

    constrained: bool,
}

impl Link {
    /// Creates a link at the identity pose, at rest.
    pub fn new(name: impl Into<String>, body_type: BodyType, inertial: Inertial) -> Self {
        Self {
            name: name.into(),
            body_type,
            inertial,
            collisions: Vec::new(),
            pose: Pose::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            in_contact: false,
            constrained: false,
        }
    }

    /// Attaches a collision. Collision names are unique per link.
    pub fn add_collision(&mut self, collision: Collision) -> Result<usize, WorldError> {
        if self.collision(collision.name()).is_some() {
            return Err(WorldError::DuplicateCollision {
                link: self.name.clone(),
                collision: collision.name,
            });
        }
        self.collisions.push(collision);
        Ok(self.collisions.len() - 1)
    }

    /// The link's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the link takes part in the simulation.
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Shorthand for `body_type() == BodyType::Dynamic`.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Mass properties.
    pub fn inertial(&self) -> &Inertial {
        &self.inertial
    }

    /// Whether the link is the child of a joint.
    ///
    /// Constrained links are positioned by their joint, not by free-body
    /// integration.
    pub fn is_constrained(&self) -> bool {
        self.constrained
    }

    pub(crate) fn mark_constrained(&mut self) {
        self.constrained = true;
    }

    /// Number of collisions.
    pub fn collision_count(&self) -> usize {
        self.collisions.len()
    }

    /// All collisions, in insertion order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Looks a collision up by name.
    pub fn collision(&self, name: &str) -> Option<&Collision> {
        self.collisions.iter().find(|c| c.name() == name)
    }

    /// Teleports the link. Velocities are left untouched.
    pub fn set_world_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Accumulates a world-frame force through the centre of mass.
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Accumulates a world-frame torque.
    pub fn add_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    /// Clears the force and torque accumulators.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    /// Velocity of a world point rigidly attached to this link.
    #[inline]
    pub fn velocity_at(&self, point: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(point - self.pose.position)
    }
}

impl Entity for Link {
    fn name(&self) -> &str {
        &self.name
    }

    fn world_pose(&self) -> Pose {
        self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_collision_is_rejected() {
        let mut link = Link::new("link", BodyType::Dynamic, Inertial::default());
        let sphere = CollisionShape::Sphere { radius: 0.5 };
        link.add_collision(Collision::new("c", Pose::IDENTITY, sphere))
            .unwrap();
        let err = link
            .add_collision(Collision::new("c", Pose::IDENTITY, sphere))
            .unwrap_err();
        assert!(matches!(err, WorldError::DuplicateCollision { .. }));
        assert_eq!(link.collision_count(), 1);
    }

    #[test]
    fn test_collision_follows_link() {
        let offset = Pose::from_position(Vec3::new(0.0, 0.0, 1.0));
        let collision = Collision::new("c", offset, CollisionShape::Sphere { radius: 0.1 });
        let link_pose = Pose::from_position(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(
            collision.world_pose_on(link_pose).position,
            Vec3::new(2.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_accumulators() {
        let mut link = Link::new("link", BodyType::Dynamic, Inertial::default());
        link.add_force(Vec3::X);
        link.add_force(Vec3::X);
        link.add_torque(Vec3::Z);
        assert_eq!(link.force, Vec3::new(2.0, 0.0, 0.0));
        link.clear_accumulators();
        assert_eq!(link.force, Vec3::ZERO);
        assert_eq!(link.torque, Vec3::ZERO);
    }

    #[test]
    fn test_velocity_of_attached_point() {
        let mut link = Link::new("link", BodyType::Dynamic, Inertial::default());
        link.angular_velocity = Vec3::new(0.0, 0.0, 1.0);
        // Point one metre along +X spins towards +Y.
        assert_eq!(link.velocity_at(Vec3::X), Vec3::Y);
    }
}
