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

//! Rigid 3D poses (position + orientation).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

use super::{Quaternion, Vec3};

/// A rigid transform: a rotation followed by a translation.
///
/// Poses compose like frames: `parent * local` expresses `local` (given in the
/// parent frame) in the frame the parent is expressed in.
///
/// # Example
///
/// ```rust
/// use gyre_core::math::{Pose, Quaternion, Vec3};
///
/// let link = Pose::new(Vec3::new(0.0, 0.0, 0.5), Quaternion::IDENTITY);
/// let offset = Pose::from_position(Vec3::new(1.0, 0.0, 0.0));
/// assert_eq!((link * offset).position, Vec3::new(1.0, 0.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Translation component, in metres.
    pub position: Vec3,
    /// Orientation component.
    pub rotation: Quaternion,
}

impl Pose {
    /// The identity pose.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
    };

    /// Creates a pose from a position and a rotation.
    #[inline]
    pub const fn new(position: Vec3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Creates a pure translation.
    #[inline]
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quaternion::IDENTITY,
        }
    }

    /// Creates a pose from a position and roll/pitch/yaw angles.
    #[inline]
    pub fn from_xyz_rpy(position: Vec3, rpy: Vec3) -> Self {
        Self {
            position,
            rotation: Quaternion::from_euler(rpy.x, rpy.y, rpy.z),
        }
    }

    /// Returns the inverse transform.
    #[inline]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            position: -(rotation * self.position),
            rotation,
        }
    }

    /// Transforms a point from this pose's local frame.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Rotates a direction from this pose's local frame (no translation).
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Returns `true` if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}

impl Mul<Pose> for Pose {
    type Output = Pose;
    /// Composes two poses (`self` is the parent frame).
    #[inline]
    fn mul(self, rhs: Pose) -> Self::Output {
        Pose {
            position: self.transform_point(rhs.position),
            rotation: self.rotation * rhs.rotation,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rpy = self.rotation.to_euler();
        write!(
            f,
            "[{:.6} {:.6} {:.6} | {:.6} {:.6} {:.6}]",
            self.position.x, self.position.y, self.position.z, rpy.x, rpy.y, rpy.z
        )
    }
}
