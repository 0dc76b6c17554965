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

// Loads a world, steps it and logs where every model ends up.
// Run with: cargo run -p sandbox -- assets/worlds/drop_test.ron --steps 1500

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gyre_sdk::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "sandbox", version, about = "Step a Gyre world and report model poses")]
struct Opts {
    /// Path to a RON world definition.
    #[arg(default_value = "assets/worlds/drop_test.ron")]
    world: PathBuf,

    /// Number of fixed steps to run.
    #[arg(long, default_value_t = 1000)]
    steps: i64,

    /// Log poses every N steps (0 logs only the final poses).
    #[arg(long, default_value_t = 0)]
    report_every: i64,

    /// Write the final world state to this file.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn log_entity(depth: usize, entity: &dyn Entity) {
    log::info!("{:indent$}{:<16} {}", "", entity.name(), entity.world_pose(), indent = depth * 2);
}

fn log_poses(world: &SimulationWorld) {
    log::info!("t = {:.3} s", world.sim_time());
    for model in world.world().models() {
        log_entity(1, model);
        for link in model.links().iter().filter(|link| link.is_dynamic()) {
            log_entity(2, link);
        }
        for joint in model.joints() {
            if let Some(angle) = model.joint(joint.name()).and_then(|j| j.angle(0)) {
                log::info!("    joint {:<10} {:+.6}", joint.name(), angle);
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let mut simulation = Simulation::new();
    let world = simulation
        .load_world_file(&opts.world)
        .with_context(|| format!("loading {}", opts.world.display()))?;
    log_poses(world);

    let chunk = if opts.report_every > 0 {
        opts.report_every
    } else {
        opts.steps.max(0)
    };
    let mut remaining = opts.steps;
    while remaining > 0 {
        let n = chunk.min(remaining);
        world
            .step_world(n)
            .with_context(|| format!("stepping {n} step(s)"))?;
        remaining -= n;
        log_poses(world);
    }
    if opts.steps < 0 {
        world.step_world(opts.steps).context("invalid --steps")?;
    }

    if let Some(path) = &opts.snapshot {
        let bytes = world.state().to_bytes().context("encoding world state")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        log::info!("Wrote snapshot to {}.", path.display());
    }

    simulation.shutdown();
    Ok(())
}
