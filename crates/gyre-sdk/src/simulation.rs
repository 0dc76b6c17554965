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

//! The `Simulation` context, owner of every loaded world.

use std::fs;
use std::path::Path;

use gyre_lanes::scene_lane::DefinitionLane;

use crate::{SimulationError, SimulationWorld};

/// An explicit registry of loaded worlds.
///
/// There is no global simulation: callers create one with [`Simulation::new`],
/// pass it where it is needed and end its life with [`Simulation::shutdown`].
/// World names are unique within a simulation.
#[derive(Debug, Default)]
pub struct Simulation {
    loader: DefinitionLane,
    /// Loaded worlds, in load order.
    worlds: Vec<SimulationWorld>,
}

impl Simulation {
    /// Creates a simulation with no worlds loaded.
    pub fn new() -> Self {
        log::info!("Simulation started.");
        Self {
            loader: DefinitionLane::new(),
            worlds: Vec::new(),
        }
    }

    /// Loads a world from RON definition text and returns it.
    ///
    /// The world is only registered if the whole definition is valid.
    pub fn load_world_str(&mut self, text: &str) -> Result<&mut SimulationWorld, SimulationError> {
        let world = self.loader.load(text)?;
        if self.world(world.name()).is_some() {
            return Err(SimulationError::DuplicateWorld(world.name().to_string()));
        }

        log::info!(
            "Loaded world '{}' ({} model(s), step time {} s).",
            world.name(),
            world.model_count(),
            world.physics().step_time()
        );
        let index = self.worlds.len();
        self.worlds.push(SimulationWorld::new(world));
        Ok(&mut self.worlds[index])
    }

    /// Reads a RON world file and loads it.
    pub fn load_world_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<&mut SimulationWorld, SimulationError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read world file '{}'.", path.display());
        self.load_world_str(&text)
    }

    /// Looks up a loaded world by name.
    pub fn world(&self, name: &str) -> Option<&SimulationWorld> {
        self.worlds.iter().find(|world| world.name() == name)
    }

    /// Looks up a loaded world by name, mutably.
    pub fn world_mut(&mut self, name: &str) -> Option<&mut SimulationWorld> {
        self.worlds.iter_mut().find(|world| world.name() == name)
    }

    /// Names of the loaded worlds, in load order.
    pub fn world_names(&self) -> Vec<&str> {
        self.worlds.iter().map(SimulationWorld::name).collect()
    }

    /// Removes a world and hands it back to the caller.
    pub fn unload(&mut self, name: &str) -> Result<SimulationWorld, SimulationError> {
        let index = self
            .worlds
            .iter()
            .position(|world| world.name() == name)
            .ok_or_else(|| SimulationError::UnknownWorld(name.to_string()))?;
        let world = self.worlds.remove(index);
        log::info!(
            "Unloaded world '{}' at t = {} s.",
            world.name(),
            world.sim_time()
        );
        Ok(world)
    }

    /// Unloads every world and ends the simulation.
    ///
    /// Returns how many worlds were still loaded.
    pub fn shutdown(mut self) -> usize {
        let count = self.worlds.len();
        for world in self.worlds.drain(..) {
            log::info!(
                "Unloaded world '{}' at t = {} s.",
                world.name(),
                world.sim_time()
            );
        }
        log::info!("Simulation shut down.");
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"(
        name: "default",
        models: [(
            name: "ground",
            static: true,
            links: [(
                name: "link",
                collisions: [(name: "plane", shape: Plane(normal: (x: 0.0, y: 0.0, z: 1.0)))],
            )],
        )],
    )"#;

    #[test]
    fn test_load_and_lookup() {
        let mut simulation = Simulation::new();
        simulation.load_world_str(WORLD).unwrap();

        assert_eq!(simulation.world_names(), vec!["default"]);
        assert!(simulation.world("default").is_some());
        assert!(simulation.world("missing").is_none());
        assert!(simulation.world_mut("default").is_some());
    }

    #[test]
    fn test_duplicate_world_is_rejected() {
        let mut simulation = Simulation::new();
        simulation.load_world_str(WORLD).unwrap();
        assert!(matches!(
            simulation.load_world_str(WORLD),
            Err(SimulationError::DuplicateWorld(name)) if name == "default"
        ));
        assert_eq!(simulation.world_names().len(), 1);
    }

    #[test]
    fn test_unload() {
        let mut simulation = Simulation::new();
        simulation.load_world_str(WORLD).unwrap();

        let world = simulation.unload("default").unwrap();
        assert_eq!(world.name(), "default");
        assert!(simulation.world("default").is_none());
        assert!(matches!(
            simulation.unload("default"),
            Err(SimulationError::UnknownWorld(_))
        ));
    }

    #[test]
    fn test_shutdown_unloads_every_world() {
        let mut simulation = Simulation::new();
        simulation.load_world_str(WORLD).unwrap();
        simulation
            .load_world_str(&WORLD.replace("\"default\"", "\"second\""))
            .unwrap();
        simulation.unload("default").unwrap();
        simulation
            .load_world_str(&WORLD.replace("\"default\"", "\"third\""))
            .unwrap();

        assert_eq!(simulation.world_names(), vec!["second", "third"]);
        assert_eq!(simulation.shutdown(), 2);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let mut simulation = Simulation::new();
        let result = simulation.load_world_file("does/not/exist.ron");
        assert!(matches!(result, Err(SimulationError::Io { .. })));
    }

    #[test]
    fn test_invalid_definition_registers_nothing() {
        let mut simulation = Simulation::new();
        let result = simulation.load_world_str("(name: \"\")");
        assert!(matches!(result, Err(SimulationError::Definition(_))));
        assert!(simulation.world_names().is_empty());
        simulation.shutdown();
    }
}
