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
use gyre_core::physics::{BodyType, JointKind, JointLimits};

use super::{Entity, Joint, JointRef, Link, WorldError};

/// Parameters for connecting two links of a model with a joint.
#[derive(Debug, Clone, Copy)]
pub struct JointSpec<'a> {
    /// Joint name, unique within the model.
    pub name: &'a str,
    /// Kind of constraint.
    pub kind: JointKind,
    /// Parent link name, or `None` to anchor the child to the world.
    pub parent: Option<&'a str>,
    /// Child link name.
    pub child: &'a str,
    /// Anchor point in the child link frame.
    pub anchor: Vec3,
    /// Joint axis in the model frame. Ignored by fixed joints.
    pub axis: Vec3,
    /// Optional position limits.
    pub limits: Option<JointLimits>,
}

/// A named group of links connected by joints.
///
/// The first link added is the root link; the model's world pose follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    pose: Pose,
    root_offset: Pose,
    links: Vec<Link>,
    joints: Vec<Joint>,
    solve_order: Vec<usize>,
}

impl Model {
    /// Creates an empty model at `pose`.
    pub fn new(name: impl Into<String>, pose: Pose) -> Self {
        Self {
            name: name.into(),
            pose,
            root_offset: Pose::IDENTITY,
            links: Vec::new(),
            joints: Vec::new(),
            solve_order: Vec::new(),
        }
    }

    /// The model's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` when no link of the model can move.
    pub fn is_static(&self) -> bool {
        self.links
            .iter()
            .all(|link| link.body_type() == BodyType::Static)
    }

    /// World pose of the model frame.
    ///
    /// Derived from the root link, or stored directly when the model has no
    /// links.
    pub fn world_pose(&self) -> Pose {
        match self.links.first() {
            Some(root) => root.pose * self.root_offset.inverse(),
            None => self.pose,
        }
    }

    /// Moves the whole model rigidly so its frame lands on `pose`.
    pub fn set_world_pose(&mut self, pose: Pose) {
        let to_model = self.world_pose().inverse();
        for link in &mut self.links {
            link.pose = pose * (to_model * link.pose);
        }
        self.pose = pose;
    }

    /// Adds a link placed at `local_pose` in the model frame.
    pub fn add_link(&mut self, mut link: Link, local_pose: Pose) -> Result<usize, WorldError> {
        if self.link(link.name()).is_some() {
            return Err(WorldError::DuplicateLink {
                model: self.name.clone(),
                link: link.name().to_string(),
            });
        }
        let model_pose = self.world_pose();
        if self.links.is_empty() {
            self.root_offset = local_pose;
        }
        link.pose = model_pose * local_pose;
        self.links.push(link);
        Ok(self.links.len() - 1)
    }

    /// Connects two links with a joint.
    ///
    /// The joint's reference pose is the current relative pose of the child,
    /// so the joint position is zero in the configuration the links are in
    /// when connected.
    pub fn connect(&mut self, spec: JointSpec<'_>) -> Result<usize, WorldError> {
        let joint_name = spec.name.to_string();
        if self.joints.iter().any(|j| j.name() == spec.name) {
            return Err(WorldError::DuplicateJoint {
                model: self.name.clone(),
                joint: joint_name,
            });
        }

        let unknown = |link: &str| WorldError::UnknownLink {
            joint: joint_name.clone(),
            link: link.to_string(),
        };
        let child = self.link_index(spec.child).ok_or_else(|| unknown(spec.child))?;
        let parent = match spec.parent {
            Some(name) => Some(self.link_index(name).ok_or_else(|| unknown(name))?),
            None => None,
        };

        if parent == Some(child) {
            return Err(WorldError::SelfJoint(joint_name));
        }
        if self.links[child].is_constrained() {
            return Err(WorldError::OverConstrainedLink {
                joint: joint_name,
                link: spec.child.to_string(),
            });
        }
        if let Some(parent) = parent {
            if self.ancestors(parent).any(|link| link == child) {
                return Err(WorldError::JointCycle(joint_name));
            }
        }

        let parent_pose = parent.map_or(Pose::IDENTITY, |index| self.links[index].pose);
        let child_pose = self.links[child].pose;
        let to_parent = parent_pose.inverse();

        let reference = to_parent * child_pose;
        let anchor = reference.transform_point(spec.anchor);
        let axis = match spec.kind {
            JointKind::Fixed => Vec3::ZERO,
            JointKind::Revolute | JointKind::Prismatic => {
                let world_axis = self.world_pose().transform_vector(spec.axis);
                let axis = to_parent.transform_vector(world_axis).normalize();
                if axis == Vec3::ZERO {
                    return Err(WorldError::ZeroAxis(joint_name));
                }
                axis
            }
        };

        self.joints.push(Joint::new(
            joint_name,
            spec.kind,
            parent,
            child,
            anchor,
            axis,
            reference,
            spec.limits,
        ));
        self.links[child].mark_constrained();
        self.rebuild_solve_order();
        Ok(self.joints.len() - 1)
    }

    /// Links walked from `link` up through its joint parents, excluding
    /// `link` itself.
    fn ancestors(&self, link: usize) -> impl Iterator<Item = usize> + '_ {
        let mut current = Some(link);
        std::iter::from_fn(move || {
            let index = current?;
            current = self
                .joints
                .iter()
                .find(|joint| joint.child() == index)
                .and_then(Joint::parent);
            current
        })
    }

    /// Orders joints so that every parent link is solved before its children.
    fn rebuild_solve_order(&mut self) {
        let depth = |joint: &Joint| self.ancestors(joint.child()).count();
        let mut order: Vec<usize> = (0..self.joints.len()).collect();
        order.sort_by_key(|&index| depth(&self.joints[index]));
        self.solve_order = order;
    }

    /// Number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// All links, in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Mutable access to every link.
    pub fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    /// Index of the link named `name`.
    pub fn link_index(&self, name: &str) -> Option<usize> {
        self.links.iter().position(|l| l.name() == name)
    }

    /// Looks a link up by name.
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name() == name)
    }

    /// Looks a link up by name, mutably.
    pub fn link_mut(&mut self, name: &str) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.name() == name)
    }

    /// Number of joints.
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// All joints, in insertion order.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Looks a joint up by name.
    pub fn joint(&self, name: &str) -> Option<JointRef<'_>> {
        self.joints
            .iter()
            .find(|j| j.name() == name)
            .map(|joint| JointRef::new(joint, &self.links))
    }

    /// Joint indices, parents before children.
    pub fn solve_order(&self) -> &[usize] {
        &self.solve_order
    }

    /// Splits the model into its joints, their solve order and its links.
    pub fn joint_system_mut(&mut self) -> (&[Joint], &[usize], &mut [Link]) {
        (&self.joints, &self.solve_order, &mut self.links)
    }
}

impl Entity for Model {
    fn name(&self) -> &str {
        &self.name
    }

    fn world_pose(&self) -> Pose {
        Model::world_pose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use gyre_core::physics::Inertial;

    fn link(name: &str, body_type: BodyType) -> Link {
        Link::new(name, body_type, Inertial::point_mass(1.0))
    }

    fn revolute<'a>(name: &'a str, parent: Option<&'a str>, child: &'a str) -> JointSpec<'a> {
        JointSpec {
            name,
            kind: JointKind::Revolute,
            parent,
            child,
            anchor: Vec3::ZERO,
            axis: Vec3::Y,
            limits: None,
        }
    }

    fn chain() -> Model {
        let mut model = Model::new("chain", Pose::from_position(Vec3::new(0.0, 0.0, 5.0)));
        model
            .add_link(link("base", BodyType::Static), Pose::IDENTITY)
            .unwrap();
        model
            .add_link(link("upper", BodyType::Dynamic), Pose::from_position(Vec3::X))
            .unwrap();
        model
            .add_link(
                link("lower", BodyType::Dynamic),
                Pose::from_position(Vec3::new(2.0, 0.0, 0.0)),
            )
            .unwrap();
        model
    }

    #[test]
    fn test_links_are_placed_in_model_frame() {
        let model = chain();
        assert_eq!(
            model.link("lower").map(|l| l.pose.position),
            Some(Vec3::new(2.0, 0.0, 5.0))
        );
        assert_eq!(model.world_pose().position, Vec3::new(0.0, 0.0, 5.0));
        assert!(!model.is_static());
    }

    #[test]
    fn test_model_pose_follows_offset_root_link() {
        let mut model = Model::new("m", Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        model
            .add_link(link("root", BodyType::Dynamic), Pose::from_position(Vec3::Z))
            .unwrap();
        assert_eq!(model.world_pose().position, Vec3::new(1.0, 0.0, 0.0));

        model.set_world_pose(Pose::from_position(Vec3::new(4.0, 4.0, 0.0)));
        assert_eq!(
            model.link("root").map(|l| l.pose.position),
            Some(Vec3::new(4.0, 4.0, 1.0))
        );
    }

    #[test]
    fn test_set_world_pose_without_links() {
        let mut model = Model::new("empty", Pose::IDENTITY);
        let target = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        model.set_world_pose(target);
        assert_eq!(model.world_pose(), target);
    }

    #[test]
    fn test_connect_derives_reference_and_anchor() {
        let mut model = chain();
        let spec = JointSpec {
            anchor: Vec3::new(-1.0, 0.0, 0.0),
            ..revolute("shoulder", Some("base"), "upper")
        };
        model.connect(spec).unwrap();

        let joint = model.joint("shoulder").unwrap();
        assert_eq!(joint.joint().anchor(), Vec3::ZERO);
        assert_eq!(joint.joint().axis(), Vec3::Y);
        assert_abs_diff_eq!(joint.angle(0).unwrap(), 0.0);
        assert_eq!(joint.angle(1), None);
        assert!(model.link("upper").unwrap().is_constrained());
    }

    #[test]
    fn test_solve_order_puts_parents_first() {
        let mut model = chain();
        model.connect(revolute("elbow", Some("upper"), "lower")).unwrap();
        model.connect(revolute("shoulder", Some("base"), "upper")).unwrap();
        // "shoulder" was added second but must be solved first.
        assert_eq!(model.solve_order(), &[1, 0]);
    }

    #[test]
    fn test_connect_rejects_invalid_topologies() {
        let mut model = chain();
        assert_eq!(
            model.connect(revolute("j", Some("base"), "missing")),
            Err(WorldError::UnknownLink {
                joint: "j".into(),
                link: "missing".into()
            })
        );
        assert_eq!(
            model.connect(revolute("j", Some("upper"), "upper")),
            Err(WorldError::SelfJoint("j".into()))
        );

        model.connect(revolute("a", Some("upper"), "lower")).unwrap();
        assert!(matches!(
            model.connect(revolute("b", Some("base"), "lower")),
            Err(WorldError::OverConstrainedLink { .. })
        ));
        assert_eq!(
            model.connect(revolute("c", Some("lower"), "upper")),
            Err(WorldError::JointCycle("c".into()))
        );
        assert!(matches!(
            model.connect(revolute("a", None, "base")),
            Err(WorldError::DuplicateJoint { .. })
        ));
        assert_eq!(
            model.connect(JointSpec {
                axis: Vec3::ZERO,
                ..revolute("d", None, "base")
            }),
            Err(WorldError::ZeroAxis("d".into()))
        );
        assert_eq!(model.joint_count(), 1);
    }

    #[test]
    fn test_fixed_joint_has_no_axes() {
        let mut model = chain();
        model
            .connect(JointSpec {
                kind: JointKind::Fixed,
                ..revolute("weld", Some("base"), "upper")
            })
            .unwrap();
        let joint = model.joint("weld").unwrap();
        assert_eq!(joint.axis_count(), 0);
        assert_eq!(joint.angle(0), None);
    }
}
