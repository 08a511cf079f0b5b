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
//! Integration scenarios for physics bodies
//!
//! Checks the per-tick integration order through the public object and
//! simulation APIs with a fixed time step.

use canvas_sim::config::Settings;
use canvas_sim::ecs::components::{BodyKind, PhysicsBody};
use canvas_sim::ecs::{ComponentKind, SimObject, Simulation, Vector};
use canvas_sim::integration::IntegrationScheme;
use canvas_sim::ComponentError;

const EPSILON: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn body_at(position: Vector, mass: f64) -> SimObject {
    let mut object = SimObject::new(position, None);
    object.add_physics_body(BodyKind::Rigid, mass, false).unwrap();
    object
}

#[test]
fn test_force_consumed_by_one_update() {
    let gravity = 9.81;
    let mass = 3.0;
    let force = Vector::new(6.0, -1.5);
    let settings = Settings::default().with_gravity(gravity);

    let mut object = body_at(Vector::zero(), mass);
    object.add_force(force).unwrap();
    object.update(0.016, &settings);

    let body = object.physics_body().unwrap();
    assert!(body.force().is_zero());
    assert!(approx(body.acceleration().x, force.x / mass));
    assert!(approx(body.acceleration().y, (force.y + gravity * mass) / mass));
}

#[test]
fn test_single_tick_from_rest() {
    let gravity = 10.0;
    let dt = 0.02;
    let mut sim = Simulation::fixed_step(Settings::default().with_gravity(gravity), dt).unwrap();
    let id = sim.add_object(body_at(Vector::new(100.0, 40.0), 5.0));

    let used = sim.tick();
    assert!(approx(used, dt));

    let object = sim.get(id).unwrap();
    let body = object.physics_body().unwrap();
    assert!(approx(body.velocity().y, gravity * dt));
    assert!(approx(body.velocity().x, 0.0));
    assert!(approx(object.position().y, 40.0 + gravity * dt));
    assert!(approx(object.position().x, 100.0));
}

#[test]
fn test_upward_force_cancels_gravity() {
    let mut sim = Simulation::fixed_step(Settings::default().with_gravity(10.0), 0.1).unwrap();
    let mut object = body_at(Vector::zero(), 2.0);
    object.add_force(Vector::new(0.0, -20.0)).unwrap();
    let id = sim.add_object(object);

    sim.tick();

    let object = sim.get(id).unwrap();
    let body = object.physics_body().unwrap();
    assert!(body.acceleration().is_zero());
    assert!(body.velocity().is_zero());
    assert_eq!(object.position(), Vector::zero());
}

#[test]
fn test_sideways_kick_persists_as_velocity() {
    let mut sim = Simulation::fixed_step(Settings::default().with_gravity(0.0), 0.5).unwrap();
    let mut object = body_at(Vector::zero(), 1.0);
    object.add_force(Vector::new(4.0, 0.0)).unwrap();
    let id = sim.add_object(object);

    sim.tick();
    sim.tick();
    sim.tick();

    // One kick: v = 4 * 0.5 = 2 per tick thereafter, applied to position each tick
    let object = sim.get(id).unwrap();
    assert!(approx(object.physics_body().unwrap().velocity().x, 2.0));
    assert!(approx(object.position().x, 6.0));
}

#[test]
fn test_parity_position_accumulates_velocity_directly() {
    let gravity = 10.0;
    let dt = 0.1;
    let mut sim = Simulation::fixed_step(Settings::default().with_gravity(gravity), dt).unwrap();
    let id = sim.add_object(body_at(Vector::zero(), 1.0));

    let ticks = 5;
    for _ in 0..ticks {
        sim.tick();
    }

    // v_n = n*g*dt, y_n = sum(v_k) = g*dt*n(n+1)/2
    let n = ticks as f64;
    let object = sim.get(id).unwrap();
    assert!(approx(object.physics_body().unwrap().velocity().y, n * gravity * dt));
    assert!(approx(object.position().y, gravity * dt * n * (n + 1.0) / 2.0));
}

#[test]
fn test_time_scaled_scheme() {
    let gravity = 10.0;
    let dt = 0.1;
    let settings = Settings::default()
        .with_gravity(gravity)
        .with_integration(IntegrationScheme::TimeScaled);
    let mut sim = Simulation::fixed_step(settings, dt).unwrap();
    let id = sim.add_object(body_at(Vector::zero(), 1.0));

    sim.tick();
    sim.tick();

    // y = dt * (g*dt + 2*g*dt)
    let object = sim.get(id).unwrap();
    assert!(approx(object.position().y, dt * 3.0 * gravity * dt));
}

#[test]
fn test_mass_does_not_change_free_fall() {
    let mut sim = Simulation::fixed_step(Settings::default().with_gravity(9.81), 1.0 / 60.0).unwrap();
    let light = sim.add_object(body_at(Vector::zero(), 0.5));
    let heavy = sim.add_object(body_at(Vector::zero(), 500.0));

    for _ in 0..30 {
        sim.tick();
    }

    let light_y = sim.get(light).unwrap().position().y;
    let heavy_y = sim.get(heavy).unwrap().position().y;
    assert!(approx(light_y, heavy_y));
    assert!(light_y > 0.0);
}

#[test]
fn test_second_body_without_overwrite_rejected() {
    let mut object = body_at(Vector::zero(), 1.0);
    let err = object.add_physics_body(BodyKind::Soft, 9.0, false).unwrap_err();
    assert_eq!(err, ComponentError::DuplicateComponent { kind: ComponentKind::PhysicsBody });

    let body = object.physics_body().unwrap();
    assert_eq!(body.kind(), BodyKind::Rigid);
    assert_eq!(body.mass(), 1.0);
    assert_eq!(object.components().len(), 1);
}

#[test]
fn test_overwritten_body_starts_fresh() {
    let mut sim = Simulation::fixed_step(Settings::default().with_gravity(0.0), 1.0).unwrap();
    let mut object = body_at(Vector::zero(), 1.0);
    object.add_force(Vector::new(1.0, 0.0)).unwrap();
    object.add_component(PhysicsBody::soft(2.0).unwrap(), true).unwrap();
    let id = sim.add_object(object);

    sim.tick();

    let object = sim.get(id).unwrap();
    assert!(object.physics_body().unwrap().velocity().is_zero());
    assert_eq!(object.position(), Vector::zero());
}
