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

use gyre_data::WorldError;
use thiserror::Error;

/// An error that can occur while loading or saving a world definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The text is not a valid RON world definition.
    #[error("invalid world definition: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The definition could not be written as RON.
    #[error("failed to write world definition: {0}")]
    Serialize(#[from] ron::Error),

    /// The world has an empty name.
    #[error("world name must not be empty")]
    EmptyWorldName,

    /// An entity has an empty name.
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// The fixed step must be finite and strictly positive.
    #[error("invalid step time {0}: must be finite and > 0")]
    InvalidStepTime(f64),

    /// A numeric field is NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFiniteValue(String),

    /// A dynamic link must have a strictly positive mass.
    #[error("link '{link}' of model '{model}' has invalid mass {mass}")]
    InvalidMass {
        /// Owning model.
        model: String,
        /// Offending link.
        link: String,
        /// Declared mass.
        mass: f64,
    },

    /// A collision shape has non-positive dimensions or a zero normal.
    #[error("collision '{collision}' on link '{link}': {reason}")]
    InvalidShape {
        /// Owning link.
        link: String,
        /// Offending collision.
        collision: String,
        /// What is wrong with the shape.
        reason: &'static str,
    },

    /// Joint limits with `lower > upper`.
    #[error("joint '{0}' has a lower limit above its upper limit")]
    InvalidLimits(String),

    /// The entity graph rejected the definition (duplicate names, unknown
    /// links, zero axes, over-constrained links, joint loops).
    #[error(transparent)]
    Structure(#[from] WorldError),
}
