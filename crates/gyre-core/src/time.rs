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

//! The fixed-step simulation clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation clock counting whole fixed-size steps.
///
/// Time is never accumulated as a float sum: it is always
/// `iterations * step_time`, so after `n` steps from zero the clock reads
/// exactly `n as f64 * step_time`. The clock can only move forward, one
/// whole step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    iterations: u64,
    step_time: f64,
}

impl SimTime {
    /// Creates a clock at time zero for the given fixed step size.
    pub fn new(step_time: f64) -> Self {
        Self {
            iterations: 0,
            step_time,
        }
    }

    /// Number of completed steps.
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The fixed step size, in seconds.
    #[inline]
    pub fn step_time(&self) -> f64 {
        self.step_time
    }

    /// Elapsed simulated time, in seconds.
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.iterations as f64 * self.step_time
    }

    /// Advances the clock by exactly one step.
    #[inline]
    pub fn advance(&mut self) {
        self.iterations += 1;
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s (#{})", self.seconds(), self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let t = SimTime::new(0.001);
        assert_eq!(t.iterations(), 0);
        assert_eq!(t.seconds(), 0.0);
    }

    #[test]
    fn test_time_is_iterations_times_step() {
        let mut t = SimTime::new(0.001);
        for _ in 0..1500 {
            t.advance();
        }
        assert_eq!(t.iterations(), 1500);
        assert_eq!(t.seconds(), 1500.0 * 0.001);
    }

    #[test]
    fn test_display() {
        let mut t = SimTime::new(0.5);
        t.advance();
        assert_eq!(t.to_string(), "0.500000s (#1)");
    }
}
