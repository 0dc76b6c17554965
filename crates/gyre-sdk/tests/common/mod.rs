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

//! Helpers shared by the SDK integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use gyre_sdk::{Simulation, SimulationWorld};

/// Routes `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Path of a world shipped under `assets/worlds`.
pub fn world_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../assets/worlds")
        .join(file)
}

/// Loads a shipped world into `simulation` and returns it.
pub fn load<'a>(simulation: &'a mut Simulation, file: &str) -> &'a mut SimulationWorld {
    init_logging();
    match simulation.load_world_file(world_path(file)) {
        Ok(world) => world,
        Err(e) => panic!("failed to load '{file}': {e}"),
    }
}

/// Advances an ideal pendulum `(theta, omega)` by `duration` seconds with
/// fixed-step RK4, using steps no larger than `step`.
///
/// Integrates `theta'' = (g / l) * sin(theta)`. With `g < 0` the pendulum
/// swings about `theta = 0`, the hanging position.
pub fn pendulum_advance(
    g: f64,
    l: f64,
    (theta, omega): (f64, f64),
    duration: f64,
    step: f64,
) -> (f64, f64) {
    let accel = |theta: f64| g / l * theta.sin();

    let steps = (duration / step).ceil().max(1.0) as u64;
    let h = duration / steps as f64;
    let (mut theta, mut omega) = (theta, omega);
    for _ in 0..steps {
        let k1 = (omega, accel(theta));
        let k2 = (omega + 0.5 * h * k1.1, accel(theta + 0.5 * h * k1.0));
        let k3 = (omega + 0.5 * h * k2.1, accel(theta + 0.5 * h * k2.0));
        let k4 = (omega + h * k3.1, accel(theta + h * k3.0));
        theta += h / 6.0 * (k1.0 + 2.0 * k2.0 + 2.0 * k3.0 + k4.0);
        omega += h / 6.0 * (k1.1 + 2.0 * k2.1 + 2.0 * k3.1 + k4.1);
    }
    (theta, omega)
}

/// Angle from the vertical of an ideal pendulum at time `t`.
pub fn pendulum_angle(g: f64, l: f64, theta0: f64, omega0: f64, t: f64, step: f64) -> f64 {
    pendulum_advance(g, l, (theta0, omega0), t, step).0
}
