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

use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// Supported collision shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    /// Box with half-extents along the local axes.
    Box {
        /// Half the side lengths.
        half_extents: Vec3,
    },
    /// Sphere centred on the collision frame.
    Sphere {
        /// Radius, in metres.
        radius: f64,
    },
    /// Cylinder whose axis is the local Z axis.
    Cylinder {
        /// Radius, in metres.
        radius: f64,
        /// Half of the cylinder length.
        half_length: f64,
    },
    /// Infinite plane `normal · p = offset` (in the collision frame).
    Plane {
        /// Unit normal pointing out of the solid half-space.
        normal: Vec3,
        /// Signed distance of the plane from the frame origin along `normal`.
        #[serde(default)]
        offset: f64,
    },
}

impl CollisionShape {
    /// Distance from the shape centre to its furthest point along `direction`.
    ///
    /// `rotation` is the world orientation of the collision frame and
    /// `direction` a unit world vector. Planes are unbounded and return `None`.
    pub fn support_extent(&self, rotation: Quaternion, direction: Vec3) -> Option<f64> {
        let local = rotation.inverse() * direction;
        match *self {
            CollisionShape::Box { half_extents } => Some(
                local.x.abs() * half_extents.x
                    + local.y.abs() * half_extents.y
                    + local.z.abs() * half_extents.z,
            ),
            CollisionShape::Sphere { radius } => Some(radius),
            CollisionShape::Cylinder {
                radius,
                half_length,
            } => {
                let along = local.z.abs().min(1.0);
                let across = (1.0 - along * along).max(0.0).sqrt();
                Some(radius * across + half_length * along)
            }
            CollisionShape::Plane { .. } => None,
        }
    }

    /// Returns `true` for shapes that can act as resting surfaces.
    #[inline]
    pub fn is_surface(&self) -> bool {
        matches!(self, CollisionShape::Plane { .. })
    }

    /// Short human-readable kind name, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CollisionShape::Box { .. } => "box",
            CollisionShape::Sphere { .. } => "sphere",
            CollisionShape::Cylinder { .. } => "cylinder",
            CollisionShape::Plane { .. } => "plane",
        }
    }
}
