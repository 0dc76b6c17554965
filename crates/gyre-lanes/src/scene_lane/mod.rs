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

//! Turns world definitions into live worlds.
//!
//! Loading is all-or-nothing: a definition is fully validated while a fresh
//! world is assembled, and the world is only handed out once every model,
//! link, collision and joint has been accepted.

mod definition_lane;
mod error;

pub use definition_lane::DefinitionLane;
pub use error::DefinitionError;
