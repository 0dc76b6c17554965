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

use std::path::PathBuf;

use gyre_agents::physics_agent::StepError;
use gyre_lanes::scene_lane::DefinitionError;
use thiserror::Error;

/// An error raised by the SDK surface.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The world definition could not be parsed or validated.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// A step request was rejected.
    #[error(transparent)]
    Step(#[from] StepError),

    /// A world file could not be read.
    #[error("failed to read world file '{path}': {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A world with this name is already loaded.
    #[error("a world named '{0}' is already loaded")]
    DuplicateWorld(String),

    /// No loaded world has this name.
    #[error("no world named '{0}' is loaded")]
    UnknownWorld(String),
}
