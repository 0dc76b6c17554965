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
use gyre_core::math::Vec3;
use gyre_core::physics::{BodyType, CollisionShape, ContactPolicy};
use gyre_data::{Link, World};

use super::PhysicsLane;

/// A resting surface in world coordinates: the plane `normal · p = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestingSurface {
    /// Unit normal pointing away from the solid side.
    pub normal: Vec3,
    /// Signed distance of the plane from the origin along `normal`.
    pub offset: f64,
}

impl RestingSurface {
    /// Collects every plane collision of every static link in `world`.
    pub fn collect(world: &World) -> Vec<Self> {
        let mut surfaces = Vec::new();
        for model in world.models() {
            for link in model.links() {
                if link.body_type() != BodyType::Static {
                    continue;
                }
                for collision in link.collisions().iter().filter(|c| c.shape().is_surface()) {
                    if let CollisionShape::Plane { normal, offset } = *collision.shape() {
                        let pose = collision.world_pose_on(link.pose);
                        let normal = pose.transform_vector(normal).normalize();
                        surfaces.push(Self {
                            normal,
                            offset: offset + normal.dot(pose.position),
                        });
                    }
                }
            }
        }
        surfaces
    }

    /// How far `link` sinks below this surface; negative when clear of it.
    ///
    /// Returns `None` when the link has no bounded collision shape.
    pub fn penetration(&self, link: &Link) -> Option<f64> {
        link.collisions()
            .iter()
            .filter_map(|collision| {
                let pose = collision.world_pose_on(link.pose);
                let extent = collision.shape().support_extent(pose.rotation, -self.normal)?;
                Some(self.offset - (pose.position.dot(self.normal) - extent))
            })
            .reduce(f64::max)
    }
}

/// Keeps dynamic links from passing through resting surfaces.
///
/// A link whose integrated pose crossed a surface is translated back onto it
/// along the surface normal and loses its velocity into the surface.
#[derive(Debug, Default)]
pub struct ContactLane;

impl ContactLane {
    /// Creates a new `ContactLane`.
    pub fn new() -> Self {
        Self
    }

    fn resolve(link: &mut Link, surfaces: &[RestingSurface]) {
        link.in_contact = false;
        for surface in surfaces {
            let Some(depth) = surface.penetration(link) else {
                continue;
            };
            if depth > 0.0 {
                link.pose.position += surface.normal * depth;
                let into = link.linear_velocity.dot(surface.normal);
                if into < 0.0 {
                    link.linear_velocity -= surface.normal * into;
                }
                if !link.in_contact {
                    log::trace!("Link '{}' resting after {:.3e} m correction.", link.name(), depth);
                }
                link.in_contact = true;
            } else if -depth <= ContactPolicy::RESTING_TOLERANCE {
                link.in_contact = true;
            }
        }
    }
}

impl Lane for ContactLane {
    fn strategy_name(&self) -> &'static str {
        "GYRE_RESTING_CONTACT"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Contact
    }
}

impl PhysicsLane for ContactLane {
    fn step(&self, world: &mut World, _dt: f64) {
        let surfaces = RestingSurface::collect(world);
        if surfaces.is_empty() {
            return;
        }
        for model in world.models_mut() {
            for link in model.links_mut().iter_mut().filter(|link| link.is_dynamic()) {
                Self::resolve(link, &surfaces);
            }
        }
    }
}
