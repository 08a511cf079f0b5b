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
//! Component taxonomy
//!
//! A [`Component`] is a closed, tagged union over the categories an object can
//! carry: one physics body, one collider, one render shape, and any number of
//! uniquely named custom components. The category of a component is its
//! [`ComponentKind`], derived from the variant tag rather than from the
//! concrete type, so a rigid body and a soft body both occupy the single
//! `PhysicsBody` slot of a registry.
//!
//! # Custom components
//!
//! User behaviour plugs in through [`CustomComponent`]. Custom components
//! declare the component API version they were written against; registries
//! reject incompatible versions using semantic versioning rules:
//!
//! - Major version must match
//! - For 0.x versions the minor version must match as well
//! - Otherwise the component's minor version must not exceed the crate's

use crate::config::Settings;
use crate::ecs::components::{Collider, PhysicsBody, RenderShape};
use crate::ecs::Vector;
use semver::Version;
use std::any::Any;
use std::fmt;

/// Version of the custom component API
///
/// Format: MAJOR.MINOR.PATCH following semantic versioning.
pub const COMPONENT_API_VERSION: &str = "0.1.0";

/// Category of a component; at most one component per category per object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Rigid or soft physics body
    PhysicsBody,
    /// Collision shape
    Collider,
    /// Drawable shape, sprite or text
    RenderShape,
    /// User-defined component, keyed by its name
    Custom(&'static str),
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::PhysicsBody => write!(f, "PhysicsBody"),
            ComponentKind::Collider => write!(f, "Collider"),
            ComponentKind::RenderShape => write!(f, "RenderShape"),
            ComponentKind::Custom(name) => write!(f, "Custom({})", name),
        }
    }
}

/// Mutable view of the owning object handed to components during an update
pub struct UpdateContext<'a> {
    /// Position of the object being updated
    pub position: &'a mut Vector,
    /// Seconds since the previous tick
    pub delta: f64,
    /// Simulation settings (gravity, integration scheme, canvas)
    pub settings: &'a Settings,
}

/// User-defined behaviour attached to an object
///
/// # Example
///
/// ```
/// use canvas_sim::ecs::{CustomComponent, UpdateContext};
/// use std::any::Any;
///
/// #[derive(Debug, Clone)]
/// struct Drift { dx: f64 }
///
/// impl CustomComponent for Drift {
///     fn name(&self) -> &'static str { "drift" }
///     fn update(&mut self, ctx: &mut UpdateContext<'_>) {
///         ctx.position.translate(self.dx * ctx.delta, 0.0);
///     }
///     fn clone_box(&self) -> Box<dyn CustomComponent> { Box::new(self.clone()) }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait CustomComponent: fmt::Debug {
    /// Unique name; two custom components with the same name collide in a registry
    fn name(&self) -> &'static str;

    /// Component API version this component was built against
    fn api_version(&self) -> &str {
        COMPONENT_API_VERSION
    }

    /// Per-tick behaviour
    fn update(&mut self, ctx: &mut UpdateContext<'_>);

    /// Deep copy into a new box; used when registries are cloned as presets
    fn clone_box(&self) -> Box<dyn CustomComponent>;

    /// Allow downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Allow mutable downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn CustomComponent> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A behaviour unit owned by exactly one object's registry
#[derive(Debug, Clone)]
pub enum Component {
    /// Force integration; moves the owning object
    PhysicsBody(PhysicsBody),
    /// Collision shape; geometry is resolved by an external collaborator
    Collider(Collider),
    /// Drawable; drawing is done by an external renderer
    RenderShape(RenderShape),
    /// User-defined behaviour
    Custom(Box<dyn CustomComponent>),
}

impl Component {
    /// Category used for registry slotting
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::PhysicsBody(_) => ComponentKind::PhysicsBody,
            Component::Collider(_) => ComponentKind::Collider,
            Component::RenderShape(_) => ComponentKind::RenderShape,
            Component::Custom(custom) => ComponentKind::Custom(custom.name()),
        }
    }

    /// Name of the concrete component (e.g. `RigidBody`, `CircleCollider`)
    pub fn name(&self) -> &'static str {
        match self {
            Component::PhysicsBody(body) => body.name(),
            Component::Collider(collider) => collider.name(),
            Component::RenderShape(shape) => shape.name(),
            Component::Custom(custom) => custom.name(),
        }
    }

    /// Run this component's per-tick behaviour against its owner
    ///
    /// Colliders and render shapes do nothing here; their work belongs to
    /// the collaborators in [`crate::collab`].
    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        match self {
            Component::PhysicsBody(body) => body.update(ctx),
            Component::Collider(_) | Component::RenderShape(_) => {}
            Component::Custom(custom) => custom.update(ctx),
        }
    }
}

impl From<PhysicsBody> for Component {
    fn from(body: PhysicsBody) -> Self {
        Component::PhysicsBody(body)
    }
}

impl From<Collider> for Component {
    fn from(collider: Collider) -> Self {
        Component::Collider(collider)
    }
}

impl From<RenderShape> for Component {
    fn from(shape: RenderShape) -> Self {
        Component::RenderShape(shape)
    }
}

impl From<Box<dyn CustomComponent>> for Component {
    fn from(custom: Box<dyn CustomComponent>) -> Self {
        Component::Custom(custom)
    }
}

/// Check if a custom component API version is compatible with this crate
pub(crate) fn is_api_compatible(component_version: &str) -> bool {
    is_version_compatible(component_version, COMPONENT_API_VERSION)
}

fn is_version_compatible(component_version: &str, crate_version: &str) -> bool {
    let component_ver = match Version::parse(component_version) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let crate_ver = match Version::parse(crate_version) {
        Ok(v) => v,
        Err(_) => return false,
    };

    if component_ver.major != crate_ver.major {
        return false;
    }

    if component_ver.major != 0 {
        component_ver.minor <= crate_ver.minor
    } else {
        // 0.x minors are breaking
        component_ver.minor == crate_ver.minor
    }
}
