//! Entity-component core
//!
//! This module provides the simulation's data model:
//! - `Vector`, the shared 2D value type
//! - The component taxonomy and concrete components
//! - Per-object component registries
//! - Simulation objects and the `Simulation` driver

mod vector;
mod component;
pub mod components;
mod registry;
mod object;
mod world;

pub use vector::Vector;
pub use component::{Component, ComponentKind, CustomComponent, UpdateContext, COMPONENT_API_VERSION};
pub use registry::{AttachedComponent, ComponentRegistry};
pub use object::{ObjectId, SimObject};
pub use world::Simulation;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::fixed_step(Settings::default(), 1.0 / 60.0).unwrap();
        assert_eq!(sim.len(), 0);
    }

    #[test]
    fn test_object_creation() {
        let mut sim = Simulation::fixed_step(Settings::default(), 1.0 / 60.0).unwrap();
        let id = sim.add_object(SimObject::new(Vector::zero(), None));
        assert_eq!(sim.len(), 1);
        assert!(sim.get(id).is_some());
    }
}
