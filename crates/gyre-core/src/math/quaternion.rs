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

//! Provides a Quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};

use super::{wrap_angle, Vec3, EPSILON};
use std::ops::{Mul, MulAssign, Neg};

/// Represents a unit quaternion used as a body orientation.
///
/// Stored as `(x, y, z, w)`, where `[x, y, z]` is the vector part and `w` the
/// scalar part. Rotation helpers assume unit length; integrators renormalize
/// after every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f64,
    /// The y component of the vector part.
    pub y: f64,
    /// The z component of the vector part.
    pub z: f64,
    /// The scalar (real) part.
    pub w: f64,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a rotation of `angle_radians` around `axis`.
    ///
    /// The axis is normalized first; a degenerate axis yields the identity.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f64) -> Self {
        let normalized_axis = axis.normalize();
        if normalized_axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half_angle = angle_radians * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();
        Self {
            x: normalized_axis.x * s,
            y: normalized_axis.y * s,
            z: normalized_axis.z * s,
            w: c,
        }
    }

    /// Creates a rotation from a rotation vector (axis scaled by angle).
    ///
    /// This is the exponential map used to integrate an angular velocity
    /// over a timestep: `from_scaled_axis(omega * dt)`.
    #[inline]
    pub fn from_scaled_axis(v: Vec3) -> Self {
        let angle = v.length();
        if angle <= EPSILON {
            return Self::IDENTITY;
        }
        Self::from_axis_angle(v / angle, angle)
    }

    /// Creates a rotation from roll (X), pitch (Y) and yaw (Z) angles.
    ///
    /// Applied in the fixed-axis order roll, then pitch, then yaw.
    pub fn from_euler(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();
        Self {
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
            w: cr * cp * cy + sr * sp * sy,
        }
    }

    /// Returns the `(roll, pitch, yaw)` angles of this rotation.
    pub fn to_euler(&self) -> Vec3 {
        let q = self.normalize();
        let sinr_cosp = 2.0 * (q.w * q.x + q.y * q.z);
        let cosr_cosp = 1.0 - 2.0 * (q.x * q.x + q.y * q.y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        let sinp = 2.0 * (q.w * q.y - q.z * q.x);
        let pitch = if sinp.abs() >= 1.0 {
            super::FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (q.w * q.z + q.x * q.y);
        let cosy_cosp = 1.0 - 2.0 * (q.y * q.y + q.z * q.z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        Vec3::new(roll, pitch, yaw)
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    /// If the quaternion has a near-zero magnitude, it returns the identity quaternion.
    pub fn normalize(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq > EPSILON {
            let inv_mag = 1.0 / mag_sq.sqrt();
            Self {
                x: self.x * inv_mag,
                y: self.y * inv_mag,
                z: self.z * inv_mag,
                w: self.w * inv_mag,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Computes the inverse rotation. For a unit quaternion this is the conjugate.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate()
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Rotates a 3D vector by this quaternion.
    #[inline]
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Signed angle of the twist component of this rotation about `axis`.
    ///
    /// Decomposes the rotation into a swing and a twist around the unit
    /// `axis` and returns the twist angle, wrapped into `(-PI, PI]`.
    pub fn twist_angle(&self, axis: Vec3) -> f64 {
        let projection = Vec3::new(self.x, self.y, self.z).dot(axis);
        wrap_angle(2.0 * projection.atan2(self.w))
    }

    /// Returns `true` if all components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product (`self` after `rhs`).
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl MulAssign<Quaternion> for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vec3(rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components. Represents the same rotation.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
