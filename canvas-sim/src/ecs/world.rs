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
//! Simulation driver
//!
//! The Simulation owns every object and the clock, and advances them once
//! per external frame tick.

use crate::clock::Clock;
use crate::collab::{ColliderView, CollisionResolver, Renderer};
use crate::config::Settings;
use crate::ecs::component::ComponentKind;
use crate::ecs::{ObjectId, SimObject};
use crate::error::ConfigError;

/// An owned object together with the identifier the simulation gave it
///
/// The id lives here rather than on the object, so replacing an object
/// through [`Simulation::get_mut`] cannot disturb lookup order.
#[derive(Debug)]
struct Slot {
    id: ObjectId,
    object: SimObject,
}

/// Ordered collection of objects plus the clock that steps them
///
/// Objects are updated and drawn in insertion order.
pub struct Simulation {
    settings: Settings,
    clock: Clock,
    slots: Vec<Slot>,
    next_object_id: u64,
}

impl Simulation {
    /// Create an empty simulation driven by the wall clock
    ///
    /// Fails if the settings do not pass [`Settings::validate`].
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let clock = Clock::monotonic(settings.fps);
        Self::with_clock(settings, clock)
    }

    /// Create an empty simulation on a caller-supplied clock
    pub fn with_clock(settings: Settings, clock: Clock) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Simulation {
            settings,
            clock,
            slots: Vec::new(),
            next_object_id: 0,
        })
    }

    /// Create an empty simulation whose ticks are exactly `step_seconds` long
    ///
    /// Fails for invalid settings or a step that is not positive and finite.
    pub fn fixed_step(settings: Settings, step_seconds: f64) -> Result<Self, ConfigError> {
        let clock = Clock::fixed(step_seconds, settings.fps)?;
        Self::with_clock(settings, clock)
    }

    /// Take ownership of an object and return its new identifier
    pub fn add_object(&mut self, object: SimObject) -> ObjectId {
        let id = ObjectId::new(self.next_object_id);
        self.next_object_id += 1;

        self.slots.push(Slot { id, object });
        log::debug!("added {} ({} objects)", id, self.slots.len());
        id
    }

    /// Remove an object, preserving the order of the rest
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SimObject> {
        let index = self.index_of(id)?;
        let slot = self.slots.remove(index);
        log::debug!("removed {} ({} objects)", id, self.slots.len());
        Some(slot.object)
    }

    /// Object by identifier
    pub fn get(&self, id: ObjectId) -> Option<&SimObject> {
        self.index_of(id).map(|index| &self.slots[index].object)
    }

    /// Object by identifier, mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SimObject> {
        let index = self.index_of(id)?;
        Some(&mut self.slots[index].object)
    }

    /// Objects with their identifiers, in insertion order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SimObject)> + '_ {
        self.slots.iter().map(|slot| (slot.id, &slot.object))
    }

    /// Identifiers in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the simulation holds no objects
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance the clock once and update every object
    ///
    /// Returns the delta, in seconds, the objects were stepped with.
    pub fn tick(&mut self) -> f64 {
        let delta = self.clock.advance();

        for Slot { id, object } in &mut self.slots {
            object.update(delta, &self.settings);
            if !object.position().is_valid() {
                log::warn!(
                    "{} has a non-finite position {} after tick {}",
                    id,
                    object.position(),
                    self.clock.total_frames()
                );
            }
        }

        log::trace!(
            "tick {} dt={} objects={}",
            self.clock.total_frames(),
            delta,
            self.slots.len()
        );
        delta
    }

    /// Tick, then render the resulting frame
    pub fn tick_with<R: Renderer>(&mut self, renderer: &mut R) -> f64 {
        let delta = self.tick();
        self.render(renderer);
        delta
    }

    /// Draw every active render component in insertion order
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        renderer.begin_frame(&self.settings);
        for (id, object) in self.objects() {
            let components = object.components();
            if components.is_active(ComponentKind::RenderShape) != Some(true) {
                continue;
            }
            if let Some(shape) = components.render_shape() {
                renderer.draw(id, object.position(), shape);
            }
        }
    }

    /// Let a resolver inspect active colliders and apply its corrections
    ///
    /// Corrections naming unknown objects are ignored. Returns the number of
    /// corrections applied.
    pub fn resolve_collisions<C: CollisionResolver>(&mut self, resolver: &mut C) -> usize {
        let corrections = {
            let views: Vec<ColliderView<'_>> = self
                .objects()
                .filter(|(_, object)| object.components().is_active(ComponentKind::Collider) == Some(true))
                .filter_map(|(id, object)| {
                    Some(ColliderView {
                        object: id,
                        position: object.position(),
                        collider: object.components().collider()?,
                    })
                })
                .collect();
            resolver.resolve(&views)
        };

        let mut applied = 0;
        for correction in corrections {
            match self.get_mut(correction.object) {
                Some(object) => {
                    object.translate(correction.offset);
                    applied += 1;
                }
                None => log::debug!("ignoring correction for unknown {}", correction.object),
            }
        }
        applied
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        // Ids are assigned in increasing order and removal keeps order, so slots stay sorted.
        self.slots.binary_search_by_key(&id, |slot| slot.id).ok()
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("settings", &self.settings)
            .field("clock", &self.clock)
            .field("objects", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::BodyKind;
    use crate::ecs::Vector;

    fn still_world() -> Simulation {
        Simulation::fixed_step(Settings::default().with_gravity(0.0), 0.1).unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(Settings::default()).unwrap();
        assert!(sim.is_empty());
        assert_eq!(sim.clock().total_frames(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut sim = still_world();
        let a = sim.add_object(SimObject::new(Vector::zero(), None));
        let b = sim.add_object(SimObject::new(Vector::zero(), None));
        assert_ne!(a, b);

        assert!(sim.remove_object(a).is_some());
        assert!(sim.remove_object(a).is_none());
        let c = sim.add_object(SimObject::new(Vector::zero(), None));
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(sim.len(), 2);
        assert!(sim.get(c).is_some());
        assert_eq!(sim.ids().collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn test_replacing_object_keeps_lookup() {
        let mut sim = still_world();
        let a = sim.add_object(SimObject::new(Vector::new(1.0, 0.0), None));
        let b = sim.add_object(SimObject::new(Vector::new(2.0, 0.0), None));
        let c = sim.add_object(SimObject::new(Vector::new(3.0, 0.0), None));

        *sim.get_mut(b).unwrap() = SimObject::new(Vector::new(20.0, 0.0), None);

        assert_eq!(sim.len(), 3);
        assert_eq!(sim.get(a).unwrap().position(), Vector::new(1.0, 0.0));
        assert_eq!(sim.get(b).unwrap().position(), Vector::new(20.0, 0.0));
        assert_eq!(sim.get(c).unwrap().position(), Vector::new(3.0, 0.0));
        assert_eq!(sim.ids().collect::<Vec<_>>(), vec![a, b, c]);
        assert!(sim.remove_object(a).is_some());
        assert!(sim.get(c).is_some());
    }

    #[test]
    fn test_tick_returns_delta() {
        let mut sim = Simulation::fixed_step(Settings::default(), 0.25).unwrap();
        assert_eq!(sim.tick(), 0.25);
        assert_eq!(sim.clock().total_frames(), 1);
    }

    #[test]
    fn test_fixed_step_tick_uses_exact_delta() {
        let dt = 1.0 / 60.0;
        let gravity = 9.81;
        let mut sim = Simulation::fixed_step(Settings::default().with_gravity(gravity), dt).unwrap();
        let mut ball = SimObject::new(Vector::zero(), None);
        ball.add_physics_body(BodyKind::Rigid, 1.0, false).unwrap();
        let id = sim.add_object(ball);

        assert_eq!(sim.tick(), dt);
        let velocity = sim.get(id).unwrap().physics_body().unwrap().velocity();
        assert_eq!(velocity.y, gravity * dt);
    }

    #[test]
    fn test_invalid_step_rejected() {
        for step in [-0.1, 0.0, f64::NAN] {
            let err = Simulation::fixed_step(Settings::default(), step).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimestep { .. }));
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let nan_gravity = Settings::default().with_gravity(f64::NAN);
        assert!(matches!(
            Simulation::new(nan_gravity.clone()),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(Simulation::fixed_step(nan_gravity, 0.1).is_err());
        assert!(Simulation::fixed_step(Settings::default().with_fps(0), 0.1).is_err());

        let clock = Clock::fixed(0.1, 60).unwrap();
        let mut zero_width = Settings::default();
        zero_width.width = 0;
        assert!(Simulation::with_clock(zero_width, clock).is_err());
    }
}
