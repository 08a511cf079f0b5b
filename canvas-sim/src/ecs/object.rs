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
//! Simulation objects
//!
//! A [`SimObject`] is a position plus the registry of components that act on
//! it. Objects are identified by an [`ObjectId`] once they are added to a
//! [`Simulation`](crate::ecs::Simulation).

use crate::config::Settings;
use crate::ecs::component::{Component, ComponentKind, UpdateContext};
use crate::ecs::components::{BodyKind, Collider, Color, PhysicsBody, RenderShape, Shape, Visual};
use crate::ecs::registry::ComponentRegistry;
use crate::ecs::Vector;
use crate::error::{ComponentError, ComponentResult};
use std::fmt;

/// Identifier assigned to an object by the simulation that owns it
///
/// Identifiers increase monotonically and are never reused within a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Create an ObjectId from a raw u64 value
    pub fn new(id: u64) -> Self {
        ObjectId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// An entity of the simulation: a position and its components
///
/// # Examples
///
/// ```
/// use canvas_sim::ecs::{ComponentKind, SimObject, Vector};
/// use canvas_sim::ecs::components::BodyKind;
///
/// let mut ball = SimObject::new(Vector::new(200.0, 50.0), None);
/// ball.add_physics_body(BodyKind::Rigid, 2.0, false).unwrap();
/// ball.add_force(Vector::new(30.0, 0.0)).unwrap();
/// assert!(ball.has_component(ComponentKind::PhysicsBody));
/// ```
#[derive(Debug, Clone)]
pub struct SimObject {
    position: Vector,
    components: ComponentRegistry,
}

impl SimObject {
    /// Create an object at `position`
    ///
    /// When a preset registry is given, its components are deep-copied; the
    /// preset stays untouched and can seed any number of further objects.
    pub fn new(position: Vector, preset: Option<&ComponentRegistry>) -> Self {
        SimObject {
            position,
            components: preset.cloned().unwrap_or_default(),
        }
    }

    /// Current position
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Move the object
    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    /// Shift the object by an offset
    pub fn translate(&mut self, offset: Vector) {
        self.position.add(offset);
    }

    /// The object's components
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// The object's components, mutably
    pub fn components_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.components
    }

    /// Run every active component once, in attachment order
    pub fn update(&mut self, delta: f64, settings: &Settings) {
        let SimObject { position, components } = self;
        let mut ctx = UpdateContext {
            position,
            delta,
            settings,
        };
        for component in components.all_active_mut() {
            component.update(&mut ctx);
        }
    }

    /// Attach an already constructed component
    pub fn add_component(&mut self, component: impl Into<Component>, overwrite: bool) -> ComponentResult<()> {
        self.components.add(component, overwrite)
    }

    /// Construct and attach a physics body
    ///
    /// Fails with `InvalidComponentArgs` for a non-positive mass, without
    /// touching the registry.
    pub fn add_physics_body(&mut self, kind: BodyKind, mass: f64, overwrite: bool) -> ComponentResult<()> {
        let body = PhysicsBody::new(kind, mass)?;
        self.components.add(body, overwrite)
    }

    /// Construct and attach a collider
    pub fn add_collider(&mut self, shape: Shape, overwrite: bool) -> ComponentResult<()> {
        let collider = Collider::new(shape)?;
        self.components.add(collider, overwrite)
    }

    /// Construct and attach a render component
    pub fn add_render_shape(
        &mut self,
        visual: Visual,
        color: Option<Color>,
        overwrite: bool,
    ) -> ComponentResult<()> {
        let shape = RenderShape::new(visual, color)?;
        self.components.add(shape, overwrite)
    }

    /// Detach a component
    pub fn remove_component(&mut self, kind: ComponentKind) -> ComponentResult<Component> {
        self.components.remove(kind)
    }

    /// Check if a component of the category is attached
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components.contains(kind)
    }

    /// Activate a component
    pub fn activate_component(&mut self, kind: ComponentKind) -> ComponentResult<()> {
        self.components.activate(kind)
    }

    /// Deactivate a component
    pub fn deactivate_component(&mut self, kind: ComponentKind) -> ComponentResult<()> {
        self.components.deactivate(kind)
    }

    /// The physics body, if attached
    pub fn physics_body(&self) -> Option<&PhysicsBody> {
        self.components.physics_body()
    }

    /// Push the object: accumulate a force into its physics body
    ///
    /// The force stays pending until the body's next active update consumes it.
    /// Fails with `ComponentNotFound` without a body and with
    /// `InvalidComponentArgs` for a non-finite force.
    pub fn add_force(&mut self, force: Vector) -> ComponentResult<()> {
        let body = self
            .components
            .physics_body_mut()
            .ok_or(ComponentError::ComponentNotFound {
                kind: ComponentKind::PhysicsBody,
            })?;
        body.add_force(force)
    }
}
