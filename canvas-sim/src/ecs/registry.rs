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
//! Per-object component registry
//!
//! The registry owns an object's components in a flat list kept in
//! attachment order, plus an index from [`ComponentKind`] to list position
//! that serves as the typed slots. The index is maintained together with the
//! list on every mutation, so both views always describe the same set:
//!
//! - At most one component per category (`PhysicsBody`, `Collider`,
//!   `RenderShape`, and each distinct custom name)
//! - Every indexed slot points at an entry of that category, and every entry
//!   is indexed
//!
//! State transitions are strict: activating an active component or
//! deactivating an inactive one is an error, not a no-op.

use crate::ecs::component::{is_api_compatible, Component, ComponentKind, CustomComponent};
use crate::ecs::components::{Collider, PhysicsBody, RenderShape};
use crate::ecs::COMPONENT_API_VERSION;
use crate::error::{ComponentError, ComponentResult};
use std::collections::HashMap;

/// A component together with its category tag and activation flag
#[derive(Debug, Clone)]
pub struct AttachedComponent {
    kind: ComponentKind,
    active: bool,
    component: Component,
}

impl AttachedComponent {
    /// Category tag
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Whether the component takes part in updates
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The component itself
    pub fn component(&self) -> &Component {
        &self.component
    }
}

/// Store of an object's components, at most one per category
///
/// Cloning a registry deep-copies every component, so a registry can be
/// used as a preset for many objects without sharing state between them.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    /// Attached components in attachment order
    entries: Vec<AttachedComponent>,
    /// Category to position in `entries`
    slots: HashMap<ComponentKind, usize>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        ComponentRegistry {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Attach a component
    ///
    /// # Errors
    ///
    /// - `DuplicateComponent` if the category is occupied and `overwrite` is false
    /// - `IncompatibleComponent` if a custom component targets another API version
    ///
    /// With `overwrite`, the previous component of the category is detached
    /// first and the new one is appended at the end of the list, active.
    pub fn add(&mut self, component: impl Into<Component>, overwrite: bool) -> ComponentResult<()> {
        let component = component.into();
        let kind = component.kind();

        if let Component::Custom(custom) = &component {
            if !is_api_compatible(custom.api_version()) {
                return Err(ComponentError::IncompatibleComponent {
                    name: custom.name(),
                    api_version: custom.api_version().to_string(),
                    supported: COMPONENT_API_VERSION,
                });
            }
        }

        if self.slots.contains_key(&kind) {
            if !overwrite {
                return Err(ComponentError::DuplicateComponent { kind });
            }
            let replaced = self.detach(kind);
            log::debug!(
                "overwriting {} component {:?}",
                kind,
                replaced.as_ref().map(Component::name)
            );
        }

        log::debug!("attaching {} as {}", component.name(), kind);
        self.slots.insert(kind, self.entries.len());
        self.entries.push(AttachedComponent {
            kind,
            active: true,
            component,
        });

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Detach and return the component of a category
    ///
    /// # Errors
    ///
    /// `ComponentNotFound` if nothing of that category is attached.
    pub fn remove(&mut self, kind: ComponentKind) -> ComponentResult<Component> {
        let component = self
            .detach(kind)
            .ok_or(ComponentError::ComponentNotFound { kind })?;
        log::debug!("detached {} component {}", kind, component.name());
        Ok(component)
    }

    /// Check if a component of the category is attached
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Mark a component active
    ///
    /// # Errors
    ///
    /// `ComponentNotFound` if absent, `AlreadyActive` if already active.
    pub fn activate(&mut self, kind: ComponentKind) -> ComponentResult<()> {
        let entry = self.entry_mut(kind)?;
        if entry.active {
            return Err(ComponentError::AlreadyActive { kind });
        }
        entry.active = true;
        log::debug!("activated {} component", kind);
        Ok(())
    }

    /// Mark a component inactive; inactive components are skipped by updates
    ///
    /// # Errors
    ///
    /// `ComponentNotFound` if absent, `AlreadyInactive` if already inactive.
    pub fn deactivate(&mut self, kind: ComponentKind) -> ComponentResult<()> {
        let entry = self.entry_mut(kind)?;
        if !entry.active {
            return Err(ComponentError::AlreadyInactive { kind });
        }
        entry.active = false;
        log::debug!("deactivated {} component", kind);
        Ok(())
    }

    /// Activation flag of a category, or `None` if nothing is attached
    pub fn is_active(&self, kind: ComponentKind) -> Option<bool> {
        self.slots.get(&kind).map(|&index| self.entries[index].active)
    }

    /// Component of a category
    pub fn get(&self, kind: ComponentKind) -> Option<&Component> {
        let index = *self.slots.get(&kind)?;
        Some(&self.entries[index].component)
    }

    /// Mutable component of a category
    pub fn get_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        let index = *self.slots.get(&kind)?;
        Some(&mut self.entries[index].component)
    }

    /// The physics body slot
    pub fn physics_body(&self) -> Option<&PhysicsBody> {
        match self.get(ComponentKind::PhysicsBody)? {
            Component::PhysicsBody(body) => Some(body),
            _ => None,
        }
    }

    /// The physics body slot, mutably
    pub fn physics_body_mut(&mut self) -> Option<&mut PhysicsBody> {
        match self.get_mut(ComponentKind::PhysicsBody)? {
            Component::PhysicsBody(body) => Some(body),
            _ => None,
        }
    }

    /// The collider slot
    pub fn collider(&self) -> Option<&Collider> {
        match self.get(ComponentKind::Collider)? {
            Component::Collider(collider) => Some(collider),
            _ => None,
        }
    }

    /// The render slot
    pub fn render_shape(&self) -> Option<&RenderShape> {
        match self.get(ComponentKind::RenderShape)? {
            Component::RenderShape(shape) => Some(shape),
            _ => None,
        }
    }

    /// The render slot, mutably
    pub fn render_shape_mut(&mut self) -> Option<&mut RenderShape> {
        match self.get_mut(ComponentKind::RenderShape)? {
            Component::RenderShape(shape) => Some(shape),
            _ => None,
        }
    }

    /// Custom component by name
    pub fn custom(&self, name: &'static str) -> Option<&dyn CustomComponent> {
        match self.get(ComponentKind::Custom(name))? {
            Component::Custom(custom) => Some(&**custom),
            _ => None,
        }
    }

    /// Custom component by name, mutably
    pub fn custom_mut(&mut self, name: &'static str) -> Option<&mut (dyn CustomComponent + 'static)> {
        match self.get_mut(ComponentKind::Custom(name))? {
            Component::Custom(custom) => Some(&mut **custom),
            _ => None,
        }
    }

    /// Custom components in attachment order
    pub fn custom_components(&self) -> impl Iterator<Item = &dyn CustomComponent> + '_ {
        self.entries.iter().filter_map(|entry| match &entry.component {
            Component::Custom(custom) => Some(&**custom),
            _ => None,
        })
    }

    /// Active components in attachment order
    pub fn all_active(&self) -> impl Iterator<Item = &Component> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| &entry.component)
    }

    /// Active components in attachment order, mutably
    pub fn all_active_mut(&mut self) -> impl Iterator<Item = &mut Component> + '_ {
        self.entries
            .iter_mut()
            .filter(|entry| entry.active)
            .map(|entry| &mut entry.component)
    }

    /// Every attached component with its tag and flag, in attachment order
    pub fn iter(&self) -> impl Iterator<Item = &AttachedComponent> + '_ {
        self.entries.iter()
    }

    /// Categories in attachment order
    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.entries.iter().map(|entry| entry.kind).collect()
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is attached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, kind: ComponentKind) -> ComponentResult<&mut AttachedComponent> {
        let index = *self
            .slots
            .get(&kind)
            .ok_or(ComponentError::ComponentNotFound { kind })?;
        Ok(&mut self.entries[index])
    }

    /// Remove a category from both views, preserving the order of the rest
    fn detach(&mut self, kind: ComponentKind) -> Option<Component> {
        let index = self.slots.remove(&kind)?;
        let entry = self.entries.remove(index);

        // Entries after the removed one shifted down by one
        for later in &self.entries[index..] {
            if let Some(slot) = self.slots.get_mut(&later.kind) {
                *slot -= 1;
            }
        }

        debug_assert!(self.is_consistent());
        Some(entry.component)
    }

    fn is_consistent(&self) -> bool {
        self.slots.len() == self.entries.len()
            && self
                .slots
                .iter()
                .all(|(kind, &index)| self.entries.get(index).map(|e| e.kind) == Some(*kind))
    }
}
