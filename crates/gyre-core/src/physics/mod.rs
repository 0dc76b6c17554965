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

//! # Physics Abstractions
//!
//! Plain physics types shared by the entity graph and the stepping lanes:
//! body kinds, mass properties, collision shapes, joint kinds, the engine
//! configuration and the contact tolerance policy.

mod config;
mod shape;
mod step;

pub use config::*;
pub use shape::*;
pub use step::*;

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Defines how a link takes part in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyType {
    /// Responds to gravity, forces, contacts and joints.
    #[default]
    Dynamic,
    /// Fixed in place, does not move.
    Static,
    /// Moves with its own velocity only; not affected by gravity or contacts.
    Kinematic,
}

/// Mass properties of a link.
///
/// The link frame origin is the centre of mass and its axes are the
/// principal axes, so inertia reduces to three principal moments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inertial {
    /// Mass, in kilograms.
    pub mass: f64,
    /// Principal moments of inertia about the link axes, in kg·m².
    #[serde(default)]
    pub principal_moments: Vec3,
}

impl Inertial {
    /// A point mass with no rotational inertia.
    pub const fn point_mass(mass: f64) -> Self {
        Self {
            mass,
            principal_moments: Vec3::ZERO,
        }
    }

    /// Solid box inertia from its full side lengths.
    pub fn solid_box(mass: f64, size: Vec3) -> Self {
        let k = mass / 12.0;
        Self {
            mass,
            principal_moments: Vec3::new(
                k * (size.y * size.y + size.z * size.z),
                k * (size.x * size.x + size.z * size.z),
                k * (size.x * size.x + size.y * size.y),
            ),
        }
    }

    /// Solid sphere inertia.
    pub fn solid_sphere(mass: f64, radius: f64) -> Self {
        let i = 0.4 * mass * radius * radius;
        Self {
            mass,
            principal_moments: Vec3::new(i, i, i),
        }
    }

    /// Inverse mass, zero for massless links.
    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Moment of inertia about a unit axis given in the link frame.
    #[inline]
    pub fn moment_about(&self, local_axis: Vec3) -> f64 {
        let m = self.principal_moments;
        m.x * local_axis.x * local_axis.x
            + m.y * local_axis.y * local_axis.y
            + m.z * local_axis.z * local_axis.z
    }

    /// Applies the inverse inertia to a body-frame torque.
    ///
    /// Axes with a zero moment receive no angular acceleration.
    pub fn angular_acceleration(&self, local_torque: Vec3) -> Vec3 {
        let inv = |moment: f64, t: f64| if moment > 0.0 { t / moment } else { 0.0 };
        let m = self.principal_moments;
        Vec3::new(
            inv(m.x, local_torque.x),
            inv(m.y, local_torque.y),
            inv(m.z, local_torque.z),
        )
    }
}

impl Default for Inertial {
    fn default() -> Self {
        Self::point_mass(1.0)
    }
}

/// The kind of constraint a joint enforces between two links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointKind {
    /// One rotational degree of freedom about the joint axis.
    Revolute,
    /// One translational degree of freedom along the joint axis.
    Prismatic,
    /// No relative motion.
    Fixed,
}

impl JointKind {
    /// Number of axes (degrees of freedom) the joint exposes.
    pub fn axis_count(&self) -> usize {
        match self {
            JointKind::Revolute | JointKind::Prismatic => 1,
            JointKind::Fixed => 0,
        }
    }
}

/// Position limits of a one-degree-of-freedom joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    /// Lowest allowed joint position (radians or metres).
    pub lower: f64,
    /// Highest allowed joint position (radians or metres).
    pub upper: f64,
}

impl JointLimits {
    /// Clamps `position` into the limits, reporting whether it was clamped.
    #[inline]
    pub fn clamp(&self, position: f64) -> (f64, bool) {
        if position < self.lower {
            (self.lower, true)
        } else if position > self.upper {
            (self.upper, true)
        } else {
            (position, false)
        }
    }
}
