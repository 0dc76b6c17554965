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
use gyre_core::math::{Vec3, EPSILON};
use gyre_core::physics::{JointKind, JointLimits};
use gyre_data::{Joint, KinematicFrame, Link, World};

use super::PhysicsLane;

/// Enforces joint constraints by reduced-coordinate projection.
///
/// For each joint, in solve order, the child's free velocity is projected
/// onto the joint's single degree of freedom, the joint coordinate is
/// advanced by the resulting rate, and the child is placed back on the
/// constraint manifold with consistent velocities. The parent acts as a
/// moving frame and is not affected by its children.
#[derive(Debug, Default)]
pub struct JointLane;

impl JointLane {
    /// Creates a new `JointLane`.
    pub fn new() -> Self {
        Self
    }

    /// Advances a joint coordinate, stopping at the limits.
    fn advance(position: f64, rate: f64, dt: f64, limits: Option<JointLimits>) -> (f64, f64) {
        let next = position + rate * dt;
        match limits.map(|limits| limits.clamp(next)) {
            Some((clamped, true)) => (clamped, 0.0),
            _ => (next, rate),
        }
    }

    /// Rate of a revolute joint that best preserves the child's momentum.
    ///
    /// Mass-weighted projection of the child's linear and angular velocity,
    /// relative to the parent, onto the joint's rotational degree of freedom.
    fn revolute_rate(parent: &KinematicFrame, child: &Link, axis: Vec3, pivot: Vec3) -> f64 {
        let relative_linear = child.linear_velocity - parent.velocity_at(child.pose.position);
        let relative_angular = child.angular_velocity - parent.angular_velocity;

        let lever = (child.pose.position - pivot).reject_from(axis);
        let tangent = axis.cross(lever);
        let mass = child.inertial().mass;
        let moment = child
            .inertial()
            .moment_about(child.pose.rotation.inverse() * axis);

        let effective_inertia = mass * lever.length_squared() + moment;
        if effective_inertia <= EPSILON {
            return relative_angular.dot(axis);
        }
        (mass * relative_linear.dot(tangent) + moment * relative_angular.dot(axis))
            / effective_inertia
    }

    fn solve(joint: &Joint, parent: &KinematicFrame, child: &mut Link, dt: f64) {
        let axis = joint.world_axis(&parent.pose);
        let position = joint.position(&parent.pose, &child.pose);

        match joint.kind() {
            JointKind::Revolute => {
                let pivot = joint.world_anchor(&parent.pose);
                let rate = Self::revolute_rate(parent, child, axis, pivot);
                let (position, rate) = Self::advance(position, rate, dt, joint.limits());

                child.pose = joint.child_pose_at(&parent.pose, position);
                child.angular_velocity = parent.angular_velocity + axis * rate;
                child.linear_velocity = parent.velocity_at(child.pose.position)
                    + axis.cross(child.pose.position - pivot) * rate;
            }
            JointKind::Prismatic => {
                let carried = parent.velocity_at(child.pose.position);
                let rate = (child.linear_velocity - carried).dot(axis);
                let (position, rate) = Self::advance(position, rate, dt, joint.limits());

                child.pose = joint.child_pose_at(&parent.pose, position);
                child.angular_velocity = parent.angular_velocity;
                child.linear_velocity = parent.velocity_at(child.pose.position) + axis * rate;
            }
            JointKind::Fixed => {
                child.pose = joint.child_pose_at(&parent.pose, 0.0);
                child.angular_velocity = parent.angular_velocity;
                child.linear_velocity = parent.velocity_at(child.pose.position);
            }
        }
    }
}

impl Lane for JointLane {
    fn strategy_name(&self) -> &'static str {
        "GYRE_JOINT_PROJECTION"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Constraint
    }
}

impl PhysicsLane for JointLane {
    fn step(&self, world: &mut World, dt: f64) {
        for model in world.models_mut() {
            let (joints, order, links) = model.joint_system_mut();
            for &index in order {
                let joint = &joints[index];
                let parent = joint.parent_frame(links);
                let Some(child) = links.get_mut(joint.child()) else {
                    continue;
                };
                if !child.is_dynamic() {
                    continue;
                }
                Self::solve(joint, &parent, child, dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use gyre_core::math::{Pose, FRAC_PI_2};
    use gyre_core::physics::{BodyType, Inertial, PhysicsConfig};
    use gyre_data::{JointSpec, Model};

    use crate::physics_lane::IntegrationLane;

    const DT: f64 = 0.001;

    /// A 1 kg point mass on a massless rod of `length`, pinned to the world.
    fn pendulum(kind: JointKind, limits: Option<JointLimits>) -> World {
        let mut world = World::new(
            "default",
            PhysicsConfig {
                step_time: DT,
                gravity: Vec3::new(0.0, 0.0, -9.81),
            },
        );
        let mut model = Model::new("pendulum", Pose::IDENTITY);
        model
            .add_link(
                Link::new("bob", BodyType::Dynamic, Inertial::point_mass(1.0)),
                Pose::from_position(Vec3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();
        model
            .connect(JointSpec {
                name: "pin",
                kind,
                parent: None,
                child: "bob",
                anchor: Vec3::new(-1.0, 0.0, 0.0),
                axis: if kind == JointKind::Prismatic { Vec3::Z } else { Vec3::Y },
                limits,
            })
            .unwrap();
        world.add_model(model).unwrap();
        world
    }

    fn run(world: &mut World, steps: usize) {
        for _ in 0..steps {
            IntegrationLane::new().step(world, DT);
            JointLane::new().step(world, DT);
        }
    }

    fn angle(world: &World) -> f64 {
        world
            .model("pendulum")
            .and_then(|m| m.joint("pin"))
            .and_then(|j| j.angle(0))
            .unwrap()
    }

    fn bob(world: &World) -> &Link {
        world.model("pendulum").and_then(|m| m.link("bob")).unwrap()
    }

    #[test]
    fn test_bob_stays_on_the_circle() {
        let mut world = pendulum(JointKind::Revolute, None);
        run(&mut world, 500);

        let bob = bob(&world);
        assert_abs_diff_eq!(bob.pose.position.length(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bob.pose.position.y, 0.0, epsilon = 1e-12);
        // Velocity is tangent to the circle.
        assert_abs_diff_eq!(bob.linear_velocity.dot(bob.pose.position), 0.0, epsilon = 1e-9);
        assert!(angle(&world) > 0.0);
    }

    #[test]
    fn test_first_step_matches_symplectic_euler() {
        let mut world = pendulum(JointKind::Revolute, None);
        run(&mut world, 1);
        // theta'' = g cos(theta) / L at theta = 0.
        let rate = 9.81 * DT;
        assert_abs_diff_eq!(angle(&world), rate * DT, epsilon = 1e-15);
    }

    #[test]
    fn test_limits_stop_the_swing() {
        let limits = JointLimits {
            lower: -0.1,
            upper: 0.1,
        };
        let mut world = pendulum(JointKind::Revolute, Some(limits));
        run(&mut world, 1000);

        assert_abs_diff_eq!(angle(&world), 0.1, epsilon = 1e-12);
        let velocity = world
            .model("pendulum")
            .and_then(|m| m.joint("pin"))
            .and_then(|j| j.velocity(0))
            .unwrap();
        assert_abs_diff_eq!(velocity, 0.0);
    }

    #[test]
    fn test_swing_reaches_bottom_near_quarter_period() {
        let mut world = pendulum(JointKind::Revolute, None);
        // Released horizontally, the bob passes under the pivot before
        // it has swung for a full second.
        let mut passed = false;
        for _ in 0..1000 {
            run(&mut world, 1);
            if angle(&world) > FRAC_PI_2 {
                passed = true;
                break;
            }
        }
        assert!(passed);
    }

    #[test]
    fn test_prismatic_slides_along_axis_only() {
        let mut world = pendulum(JointKind::Prismatic, None);
        run(&mut world, 100);

        let bob = bob(&world);
        assert_eq!(bob.pose.position.x, 1.0);
        assert_abs_diff_eq!(bob.pose.position.z, angle(&world), epsilon = 1e-12);
        assert!(angle(&world) < 0.0);
        assert_abs_diff_eq!(bob.linear_velocity.z, -9.81 * 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_joint_holds_the_child() {
        let mut world = pendulum(JointKind::Fixed, None);
        run(&mut world, 100);
        let bob = bob(&world);
        assert_eq!(bob.pose.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(bob.linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_children_follow_a_moving_parent() {
        let mut world = World::new(
            "default",
            PhysicsConfig {
                step_time: DT,
                gravity: Vec3::ZERO,
            },
        );
        let mut model = Model::new("cart", Pose::IDENTITY);
        model
            .add_link(
                Link::new("body", BodyType::Kinematic, Inertial::point_mass(1.0)),
                Pose::IDENTITY,
            )
            .unwrap();
        model
            .add_link(
                Link::new("wheel", BodyType::Dynamic, Inertial::solid_sphere(1.0, 0.2)),
                Pose::from_position(Vec3::new(0.5, 0.0, 0.0)),
            )
            .unwrap();
        model
            .connect(JointSpec {
                name: "axle",
                kind: JointKind::Revolute,
                parent: Some("body"),
                child: "wheel",
                anchor: Vec3::ZERO,
                axis: Vec3::Y,
                limits: None,
            })
            .unwrap();
        if let Some(body) = model.link_mut("body") {
            body.linear_velocity = Vec3::new(2.0, 0.0, 0.0);
        }
        world.add_model(model).unwrap();

        for _ in 0..100 {
            IntegrationLane::new().step(&mut world, DT);
            JointLane::new().step(&mut world, DT);
        }

        let model = world.model("cart").unwrap();
        let wheel = model.link("wheel").unwrap();
        assert_abs_diff_eq!(wheel.pose.position.x, 0.5 + 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(wheel.linear_velocity.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            model.joint("axle").and_then(|j| j.angle(0)).unwrap(),
            0.0,
            epsilon = 1e-12
        );
    }
}
