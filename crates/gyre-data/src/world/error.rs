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

use thiserror::Error;

/// Structural errors raised while assembling the entity graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A model with this name already exists in the world.
    #[error("duplicate model name '{0}'")]
    DuplicateModel(String),

    /// A link with this name already exists in the model.
    #[error("duplicate link name '{link}' in model '{model}'")]
    DuplicateLink {
        /// Owning model.
        model: String,
        /// Offending link name.
        link: String,
    },

    /// A collision with this name already exists on the link.
    #[error("duplicate collision name '{collision}' on link '{link}'")]
    DuplicateCollision {
        /// Owning link.
        link: String,
        /// Offending collision name.
        collision: String,
    },

    /// A joint with this name already exists in the model.
    #[error("duplicate joint name '{joint}' in model '{model}'")]
    DuplicateJoint {
        /// Owning model.
        model: String,
        /// Offending joint name.
        joint: String,
    },

    /// A joint references a link the model does not have.
    #[error("joint '{joint}' references unknown link '{link}'")]
    UnknownLink {
        /// Joint being connected.
        joint: String,
        /// Missing link name.
        link: String,
    },

    /// A joint connects a link to itself.
    #[error("joint '{0}' connects a link to itself")]
    SelfJoint(String),

    /// The child link is already the child of another joint.
    #[error("link '{link}' is already constrained by another joint (joint '{joint}')")]
    OverConstrainedLink {
        /// Joint being connected.
        joint: String,
        /// Child link.
        link: String,
    },

    /// Connecting the joint would close a kinematic loop.
    #[error("joint '{0}' closes a kinematic loop")]
    JointCycle(String),

    /// A revolute or prismatic joint was given a zero-length axis.
    #[error("joint '{0}' has a zero-length axis")]
    ZeroAxis(String),
}
