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
//! Falling boxes demo
//!
//! Populates a canvas with a handful of objects, kicks one sideways, and
//! steps the simulation for a second of fixed 60 FPS frames, printing a text
//! "render" of each object's position.
//!
//! Run with `RUST_LOG=debug` to see registry and tick logging, and set
//! `CANVAS_SIM_GRAVITY` / `CANVAS_SIM_INTEGRATION` to change the physics.

use canvas_sim::collab::Renderer;
use canvas_sim::config::Settings;
use canvas_sim::ecs::components::{BodyKind, Color, PhysicsBody, RenderShape};
use canvas_sim::ecs::{ComponentKind, ComponentRegistry, ObjectId, SimObject, Simulation, Vector};
use std::error::Error;

struct TextRenderer {
    frame: u64,
}

impl Renderer for TextRenderer {
    fn begin_frame(&mut self, settings: &Settings) {
        self.frame += 1;
        println!(
            "-- frame {} ({}x{} canvas) --",
            self.frame, settings.width, settings.height
        );
    }

    fn draw(&mut self, object: ObjectId, position: Vector, shape: &RenderShape) {
        println!("  {} {:<12} at ({:>7.2}, {:>7.2})", object, shape.name(), position.x, position.y);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings = Settings::from_env()?;
    println!("Canvas Sim - Falling Boxes");
    println!("==========================");
    println!("gravity: {}, integration: {}\n", settings.gravity, settings.integration);

    let mut sim = Simulation::fixed_step(settings, 1.0 / 60.0)?;

    // One preset, deep-copied into each box
    let mut crate_preset = ComponentRegistry::new();
    crate_preset.add(PhysicsBody::rigid(2.0)?, false)?;
    crate_preset.add(RenderShape::rect(20.0, 20.0, Some(Color::rgb(160, 82, 45)))?, false)?;

    for i in 0..3 {
        let position = Vector::new(100.0 + 100.0 * i as f64, 40.0);
        sim.add_object(SimObject::new(position, Some(&crate_preset)));
    }

    let mut ball = SimObject::new(Vector::new(50.0, 200.0), None);
    ball.add_physics_body(BodyKind::Soft, 1.0, false)?;
    ball.add_component(RenderShape::circle(10.0, None)?, false)?;
    ball.add_force(Vector::new(300.0, -600.0))?;
    let ball = sim.add_object(ball);

    let mut label = SimObject::new(Vector::new(10.0, 10.0), None);
    label.add_component(RenderShape::text("falling boxes")?, false)?;
    sim.add_object(label);

    // A second body is refused unless overwrite is requested
    if let Some(object) = sim.get_mut(ball) {
        if let Err(err) = object.add_physics_body(BodyKind::Rigid, 5.0, false) {
            println!("expected refusal: {}\n", err);
        }
    }

    let mut renderer = TextRenderer { frame: 0 };
    for tick in 0..60 {
        if tick == 30 {
            if let Some(object) = sim.get_mut(ball) {
                object.deactivate_component(ComponentKind::PhysicsBody)?;
                println!("ball frozen at frame {}", tick);
            }
        }

        sim.tick();
        if tick % 15 == 14 {
            sim.render(&mut renderer);
        }
    }

    Ok(())
}
