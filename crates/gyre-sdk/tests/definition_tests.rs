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

mod common;

use anyhow::Result;
use gyre_data::WorldError;
use gyre_lanes::scene_lane::DefinitionLane;
use gyre_sdk::prelude::*;
use tempfile::tempdir;

use common::{init_logging, world_path};

fn rejects(text: &str) -> DefinitionError {
    init_logging();
    let mut simulation = Simulation::new();
    let error = match simulation.load_world_str(text) {
        Ok(world) => panic!("world '{}' should have been rejected", world.name()),
        Err(SimulationError::Definition(error)) => error,
        Err(other) => panic!("unexpected error: {other}"),
    };
    assert!(simulation.world_names().is_empty());
    error
}

#[test]
fn test_every_shipped_world_loads() -> Result<()> {
    init_logging();
    let mut simulation = Simulation::new();
    for file in [
        "empty.ron",
        "shapes.ron",
        "drop_test.ron",
        "simple_pendulums.ron",
    ] {
        let name = simulation.load_world_file(world_path(file))?.name().to_string();
        simulation.unload(&name)?;
    }
    simulation.shutdown();
    Ok(())
}

#[test]
fn test_saved_definition_loads_back() -> Result<()> {
    init_logging();
    let lane = DefinitionLane::new();
    let definition = lane.parse(&std::fs::read_to_string(world_path("simple_pendulums.ron"))?)?;

    let dir = tempdir()?;
    let path = dir.path().join("saved.ron");
    std::fs::write(&path, lane.serialize(&definition)?)?;

    let mut simulation = Simulation::new();
    let world = simulation.load_world_file(&path)?;
    assert_eq!(world.model("model_1").map(|m| m.joint_count()), Some(1));
    assert_eq!(world.physics().gravity, Vec3::new(0.0, 0.0, -9.81));
    Ok(())
}

#[test]
fn test_rejects_unknown_joint_link() {
    let error = rejects(
        r#"(
            models: [(
                name: "arm",
                links: [(name: "upper")],
                joints: [(name: "elbow", kind: Revolute, parent: "upper", child: "lower")],
            )],
        )"#,
    );
    assert!(matches!(
        error,
        DefinitionError::Structure(WorldError::UnknownLink { .. })
    ));
}

#[test]
fn test_rejects_zero_axis() {
    let error = rejects(
        r#"(
            models: [(
                name: "arm",
                links: [(name: "upper")],
                joints: [(
                    name: "shoulder",
                    kind: Revolute,
                    parent: "world",
                    child: "upper",
                    axis: (x: 0.0, y: 0.0, z: 0.0),
                )],
            )],
        )"#,
    );
    assert!(matches!(
        error,
        DefinitionError::Structure(WorldError::ZeroAxis(_))
    ));
}

#[test]
fn test_rejects_link_with_two_parents() {
    let error = rejects(
        r#"(
            models: [(
                name: "arm",
                links: [(name: "upper"), (name: "lower")],
                joints: [
                    (name: "a", kind: Fixed, parent: "world", child: "lower"),
                    (name: "b", kind: Fixed, parent: "upper", child: "lower"),
                ],
            )],
        )"#,
    );
    assert!(matches!(
        error,
        DefinitionError::Structure(WorldError::OverConstrainedLink { .. })
    ));
}

#[test]
fn test_rejects_duplicate_links_and_bad_numbers() {
    let error = rejects(
        r#"(
            models: [(name: "twin", links: [(name: "link"), (name: "link")])],
        )"#,
    );
    assert!(matches!(
        error,
        DefinitionError::Structure(WorldError::DuplicateLink { .. })
    ));

    let error = rejects(r#"(physics: (step_time: -0.001))"#);
    assert!(matches!(error, DefinitionError::InvalidStepTime(_)));

    let error = rejects(r#"(models: [(name: "m", links: [(name: "l", inertial: (mass: -1.0))])])"#);
    assert!(matches!(error, DefinitionError::InvalidMass { .. }));

    let error = rejects("not a world");
    assert!(matches!(error, DefinitionError::Parse(_)));
}
