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

//! Joint kinematics.
//!
//! A joint stores only its fixed geometry: anchor and axis in the parent
//! frame, and the reference pose of the child in the parent frame at joint
//! position zero. The joint position and rate are always derived from the
//! current poses and velocities of the two links.

use gyre_core::math::{Pose, Quaternion, Vec3};
use gyre_core::physics::{JointKind, JointLimits};

use super::Link;

/// Pose and velocity of a joint frame: a parent link or the world anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicFrame {
    /// World pose.
    pub pose: Pose,
    /// Linear velocity of the frame origin.
    pub linear_velocity: Vec3,
    /// Angular velocity.
    pub angular_velocity: Vec3,
}

impl KinematicFrame {
    /// The fixed world frame.
    pub const WORLD: Self = Self {
        pose: Pose::IDENTITY,
        linear_velocity: Vec3::ZERO,
        angular_velocity: Vec3::ZERO,
    };

    /// The frame of `link`.
    pub fn of(link: &Link) -> Self {
        Self {
            pose: link.pose,
            linear_velocity: link.linear_velocity,
            angular_velocity: link.angular_velocity,
        }
    }

    /// Velocity of a world point rigidly attached to this frame.
    #[inline]
    pub fn velocity_at(&self, point: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(point - self.pose.position)
    }
}

/// A constraint between a parent link (or the world) and a child link.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    name: String,
    kind: JointKind,
    parent: Option<usize>,
    child: usize,
    anchor: Vec3,
    axis: Vec3,
    reference: Pose,
    limits: Option<JointLimits>,
}

impl Joint {
    /// Creates a joint. `anchor` and `axis` are expressed in the parent frame;
    /// `axis` must be unit length; `reference` is the child pose in the parent
    /// frame at position zero.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        kind: JointKind,
        parent: Option<usize>,
        child: usize,
        anchor: Vec3,
        axis: Vec3,
        reference: Pose,
        limits: Option<JointLimits>,
    ) -> Self {
        Self {
            name,
            kind,
            parent,
            child,
            anchor,
            axis,
            reference,
            limits,
        }
    }

    /// The joint's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The joint kind.
    pub fn kind(&self) -> JointKind {
        self.kind
    }

    /// Index of the parent link, or `None` for the world anchor.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Index of the child link.
    pub fn child(&self) -> usize {
        self.child
    }

    /// Anchor point, parent frame.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Unit axis, parent frame.
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Child pose in the parent frame at position zero.
    pub fn reference(&self) -> Pose {
        self.reference
    }

    /// Position limits, if any.
    pub fn limits(&self) -> Option<JointLimits> {
        self.limits
    }

    /// Frame of the parent link, or the world frame.
    pub fn parent_frame(&self, links: &[Link]) -> KinematicFrame {
        self.parent
            .and_then(|index| links.get(index))
            .map(KinematicFrame::of)
            .unwrap_or(KinematicFrame::WORLD)
    }

    /// World-frame axis for the given parent pose.
    #[inline]
    pub fn world_axis(&self, parent: &Pose) -> Vec3 {
        parent.transform_vector(self.axis)
    }

    /// World-frame anchor for the given parent pose.
    #[inline]
    pub fn world_anchor(&self, parent: &Pose) -> Vec3 {
        parent.transform_point(self.anchor)
    }

    /// Joint position (radians or metres) of `child` relative to `parent`.
    pub fn position(&self, parent: &Pose, child: &Pose) -> f64 {
        let relative = parent.inverse() * *child;
        match self.kind {
            JointKind::Revolute => (relative.rotation * self.reference.rotation.inverse())
                .normalize()
                .twist_angle(self.axis),
            JointKind::Prismatic => (relative.position - self.reference.position).dot(self.axis),
            JointKind::Fixed => 0.0,
        }
    }

    /// Joint rate (rad/s or m/s) of `child` relative to `parent`.
    pub fn rate(&self, parent: &KinematicFrame, child: &KinematicFrame) -> f64 {
        let axis = self.world_axis(&parent.pose);
        match self.kind {
            JointKind::Revolute => (child.angular_velocity - parent.angular_velocity).dot(axis),
            JointKind::Prismatic => {
                let carried = parent.velocity_at(child.pose.position);
                (child.linear_velocity - carried).dot(axis)
            }
            JointKind::Fixed => 0.0,
        }
    }

    /// Child pose in the parent frame at the given joint position.
    pub fn relative_pose_at(&self, position: f64) -> Pose {
        match self.kind {
            JointKind::Revolute => {
                let rotation = Quaternion::from_axis_angle(self.axis, position);
                Pose::new(
                    self.anchor + rotation * (self.reference.position - self.anchor),
                    (rotation * self.reference.rotation).normalize(),
                )
            }
            JointKind::Prismatic => Pose::new(
                self.reference.position + self.axis * position,
                self.reference.rotation,
            ),
            JointKind::Fixed => self.reference,
        }
    }

    /// World pose of the child at the given joint position.
    #[inline]
    pub fn child_pose_at(&self, parent: &Pose, position: f64) -> Pose {
        *parent * self.relative_pose_at(position)
    }
}

/// Read-only view of a joint bound to the links of its model.
#[derive(Debug, Clone, Copy)]
pub struct JointRef<'a> {
    joint: &'a Joint,
    links: &'a [Link],
}

impl<'a> JointRef<'a> {
    pub(crate) fn new(joint: &'a Joint, links: &'a [Link]) -> Self {
        Self { joint, links }
    }

    /// The joint's name.
    pub fn name(&self) -> &'a str {
        self.joint.name()
    }

    /// The underlying joint.
    pub fn joint(&self) -> &'a Joint {
        self.joint
    }

    /// Number of axes the joint exposes.
    pub fn axis_count(&self) -> usize {
        self.joint.kind().axis_count()
    }

    /// Position along axis `index`, derived from the current link poses.
    ///
    /// Returns `None` if the joint has no such axis.
    pub fn angle(&self, index: usize) -> Option<f64> {
        if index >= self.axis_count() {
            return None;
        }
        let child = self.links.get(self.joint.child())?;
        let parent = self.joint.parent_frame(self.links);
        Some(self.joint.position(&parent.pose, &child.pose))
    }

    /// Rate along axis `index`, derived from the current link velocities.
    pub fn velocity(&self, index: usize) -> Option<f64> {
        if index >= self.axis_count() {
            return None;
        }
        let child = self.links.get(self.joint.child())?;
        let parent = self.joint.parent_frame(self.links);
        Some(self.joint.rate(&parent, &KinematicFrame::of(child)))
    }
}
