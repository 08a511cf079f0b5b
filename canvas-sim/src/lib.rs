// Copyright 2025 John Brosnihan
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
//! # Canvas Sim
//!
//! A minimal entity-component simulation. A canvas holds objects; each object
//! carries a position and a registry of optional components (a physics body,
//! a collider, a render shape, and custom behaviour). Every tick the active
//! components mutate their owner, chiefly the physics body, which turns
//! accumulated force into velocity and position.
//!
//! ## Features
//!
//! - **Component registry**: one component per category, strict activation
//!   state transitions, overwrite on request
//! - **Rigid-body integration**: gravity, force accumulation, explicit Euler
//! - **Deterministic ticking**: insertion-ordered updates on a pluggable clock
//! - **Extension points**: renderer, collision resolver and custom components
//!
//! ## Example
//!
//! ```rust
//! use canvas_sim::config::Settings;
//! use canvas_sim::ecs::{SimObject, Simulation, Vector};
//! use canvas_sim::ecs::components::BodyKind;
//!
//! let mut sim = Simulation::fixed_step(Settings::default().with_gravity(10.0), 0.1).unwrap();
//!
//! let mut ball = SimObject::new(Vector::new(0.0, 0.0), None);
//! ball.add_physics_body(BodyKind::Rigid, 2.0, false).unwrap();
//! let id = sim.add_object(ball);
//!
//! sim.tick();
//! let ball = sim.get(id).unwrap();
//! assert!((ball.position().y - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

/// Entity-component data model and simulation driver
pub mod ecs;

/// Physics integration step
pub mod integration;

/// Frame clock and time sources
pub mod clock;

/// Simulation settings
pub mod config;

/// Renderer and collision extension points
pub mod collab;

/// Error types
pub mod error;

pub use ecs::{SimObject, Simulation};
pub use error::{ComponentError, ComponentResult};
