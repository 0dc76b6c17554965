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

use std::fmt;

/// Well-defined points of a simulation step where observers are notified.
///
/// Variants are listed in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepPhase {
    /// Free-body integration of every link is done.
    PostIntegration,
    /// Contacts have been resolved.
    PostContact,
    /// Joint constraints have been enforced.
    PostJoint,
    /// The clock has advanced; the step is complete.
    PostStep,
}

impl StepPhase {
    /// All phases, in execution order.
    pub const ALL: [StepPhase; 4] = [
        StepPhase::PostIntegration,
        StepPhase::PostContact,
        StepPhase::PostJoint,
        StepPhase::PostStep,
    ];
}

impl fmt::Display for StepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepPhase::PostIntegration => write!(f, "PostIntegration"),
            StepPhase::PostContact => write!(f, "PostContact"),
            StepPhase::PostJoint => write!(f, "PostJoint"),
            StepPhase::PostStep => write!(f, "PostStep"),
        }
    }
}

/// Describes the step a hook is being invoked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo {
    /// Zero-based index of the step within the world's lifetime.
    pub iteration: u64,
    /// Phase being reported.
    pub phase: StepPhase,
    /// Fixed step size, in seconds.
    pub step_time: f64,
}

/// Notification published once a step is complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// Number of completed steps after this one.
    pub iterations: u64,
    /// Simulation time after this step, in seconds.
    pub sim_time: f64,
}
