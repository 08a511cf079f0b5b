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
//! Extension points for external collaborators
//!
//! Drawing and collision geometry live outside the core. The simulation
//! hands its state to implementations of these traits; no implementation is
//! shipped here.

use crate::config::Settings;
use crate::ecs::components::{Collider, RenderShape};
use crate::ecs::{ObjectId, Vector};

/// Drawing backend driven once per frame
pub trait Renderer {
    /// Prepare a frame, typically clearing to `settings.background`
    fn begin_frame(&mut self, settings: &Settings);

    /// Draw one render component at its owner's position
    ///
    /// Called in object insertion order, which is also the draw order.
    fn draw(&mut self, object: ObjectId, position: Vector, shape: &RenderShape);
}

/// An active collider as seen by a [`CollisionResolver`]
#[derive(Debug, Clone, Copy)]
pub struct ColliderView<'a> {
    /// Owner of the collider
    pub object: ObjectId,
    /// Owner's position
    pub position: Vector,
    /// Collision geometry
    pub collider: &'a Collider,
}

/// Position correction requested by a resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    /// Object to move
    pub object: ObjectId,
    /// Offset added to its position
    pub offset: Vector,
}

/// Collision detection and response
///
/// Receives every active collider, in insertion order, and returns the
/// position corrections to apply.
pub trait CollisionResolver {
    /// Resolve contacts between the given colliders
    fn resolve(&mut self, colliders: &[ColliderView<'_>]) -> Vec<Correction>;
}
