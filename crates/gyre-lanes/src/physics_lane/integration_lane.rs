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

use gyre_core::lane::{Lane, LaneKind};
use gyre_core::math::{Pose, Quaternion, Vec3};
use gyre_core::physics::BodyType;
use gyre_data::{Link, Model, World};

use super::PhysicsLane;

/// Semi-implicit Euler integration of free bodies.
///
/// Velocities are updated first and the new velocities move the poses.
/// Links constrained by a joint only have their velocities integrated; their
/// poses are carried rigidly by their joint parent and later projected by
/// the joint lane.
#[derive(Debug, Default)]
pub struct IntegrationLane;

impl IntegrationLane {
    /// Creates a new `IntegrationLane`.
    pub fn new() -> Self {
        Self
    }

    fn integrate_link(link: &mut Link, gravity: Vec3, dt: f64) {
        match link.body_type() {
            BodyType::Static => {}
            BodyType::Kinematic => {
                if !link.is_constrained() {
                    Self::integrate_pose(link, dt);
                }
            }
            BodyType::Dynamic => {
                // v = v + a*dt
                let acceleration = gravity + link.force * link.inertial().inverse_mass();
                link.linear_velocity += acceleration * dt;

                let rotation = link.pose.rotation;
                let local_torque = rotation.inverse() * link.torque;
                let angular_acceleration =
                    rotation * link.inertial().angular_acceleration(local_torque);
                link.angular_velocity += angular_acceleration * dt;

                if !link.is_constrained() {
                    Self::integrate_pose(link, dt);
                }
            }
        }
        link.clear_accumulators();
    }

    fn integrate_pose(link: &mut Link, dt: f64) {
        link.pose.position += link.linear_velocity * dt;

        // dq = exp(w * dt) * q
        if link.angular_velocity != Vec3::ZERO {
            let delta = Quaternion::from_scaled_axis(link.angular_velocity * dt);
            link.pose.rotation = (delta * link.pose.rotation).normalize();
        }
    }

    /// Moves every constrained link with the motion its parent just made,
    /// keeping joint positions unchanged through integration.
    fn carry_constrained_links(model: &mut Model, before: &[Pose]) {
        let (joints, order, links) = model.joint_system_mut();
        for &index in order {
            let joint = &joints[index];
            let Some(parent) = joint.parent() else {
                continue;
            };
            let parent_now = links[parent].pose;
            if parent_now == before[parent] {
                continue;
            }
            let relative = before[parent].inverse() * before[joint.child()];
            links[joint.child()].pose = parent_now * relative;
        }
    }
}

impl Lane for IntegrationLane {
    fn strategy_name(&self) -> &'static str {
        "GYRE_SEMI_IMPLICIT_EULER"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Integration
    }
}

impl PhysicsLane for IntegrationLane {
    fn step(&self, world: &mut World, dt: f64) {
        let gravity = world.physics().gravity;
        for model in world.models_mut() {
            let before: Vec<Pose> = if model.joint_count() > 0 {
                model.links().iter().map(|link| link.pose).collect()
            } else {
                Vec::new()
            };

            for link in model.links_mut() {
                Self::integrate_link(link, gravity, dt);
            }

            if !before.is_empty() {
                Self::carry_constrained_links(model, &before);
            }
        }
    }
}
