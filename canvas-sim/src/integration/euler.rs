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
//! Explicit Euler step for a single physics body

use crate::ecs::components::PhysicsBody;
use crate::ecs::Vector;
use crate::integration::IntegrationScheme;

/// Advance `body` by one tick and move `position` accordingly
///
/// Order is fixed: apply gravity, derive acceleration, integrate velocity,
/// integrate position, reset force. Forces added before the call are
/// consumed by it.
///
/// # Arguments
///
/// * `body` - Body to integrate; its mass is positive by construction
/// * `position` - Position of the owning object
/// * `dt` - Seconds since the previous tick
/// * `gravity` - Gravity constant; the body receives `gravity * mass` on y
/// * `scheme` - Position integration rule
pub fn step(
    body: &mut PhysicsBody,
    position: &mut Vector,
    dt: f64,
    gravity: f64,
    scheme: IntegrationScheme,
) {
    body.apply_gravity(gravity);
    body.update_acceleration();
    body.update_velocity(dt);

    let displacement = match scheme {
        IntegrationScheme::Parity => body.velocity(),
        IntegrationScheme::TimeScaled => body.velocity() * dt,
    };
    position.add(displacement);

    body.reset_force();

    log::trace!(
        "{} step dt={} a={} v={} pos={}",
        body.name(),
        dt,
        body.acceleration(),
        body.velocity(),
        position
    );
}
