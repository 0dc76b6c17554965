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

//! # Lane Abstraction
//!
//! The base trait for all lane types of the stepper.
//!
//! A **Lane** is a swappable processing strategy. Agents own lanes and run
//! them in a fixed order; each lane encapsulates one algorithmic concern of
//! a simulation step (free-body integration, contact resolution, joint
//! constraints) or of world construction (definition loading).
//!
//! ## Architecture
//!
//! 1. **`Lane`** (this trait) — identity and classification shared by all
//!    lanes.
//! 2. **Domain-specific traits** — extend `Lane` with an execution method
//!    over the concrete world type, e.g. `PhysicsLane: Lane` in `gyre-lanes`.
//!
//! ## Usage
//!
//! ```rust
//! use gyre_core::lane::{Lane, LaneKind};
//!
//! struct DampingLane;
//!
//! impl Lane for DampingLane {
//!     fn strategy_name(&self) -> &'static str { "Damping" }
//!     fn lane_kind(&self) -> LaneKind { LaneKind::Integration }
//! }
//!
//! assert_eq!(DampingLane.lane_kind().to_string(), "Integration");
//! ```

use std::fmt;

/// Classification of lane types, used for ordering and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaneKind {
    /// Free-body integration of velocities and poses.
    Integration,
    /// Contact detection and resolution.
    Contact,
    /// Joint constraint enforcement.
    Constraint,
    /// World construction from a definition.
    Scene,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Integration => write!(f, "Integration"),
            LaneKind::Contact => write!(f, "Contact"),
            LaneKind::Constraint => write!(f, "Constraint"),
            LaneKind::Scene => write!(f, "Scene"),
        }
    }
}

/// Common interface shared by every lane.
pub trait Lane: Send + Sync {
    /// Unique, human-readable name of the strategy (used in logs).
    fn strategy_name(&self) -> &'static str;

    /// Which concern of the step this lane handles.
    fn lane_kind(&self) -> LaneKind;
}
