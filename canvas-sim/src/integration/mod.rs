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
//! Numerical integration for physics bodies
//!
//! Each tick a body runs a fixed sequence: gravity is added to the
//! accumulated force, acceleration is derived from force and mass, velocity
//! is advanced by explicit Euler over the tick's delta, the owner's position
//! is advanced by the velocity, and the force is cleared.
//!
//! # Schemes
//!
//! - **Parity** (default): `position += velocity`. The velocity is already
//!   time-scaled, and the position step deliberately applies no second
//!   `dt` factor. Trajectories therefore depend on the frame rate.
//! - **TimeScaled**: `position += velocity * dt`, the dimensionally
//!   consistent form. Opt in through [`Settings`](crate::config::Settings).

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

mod euler;

pub use euler::step;

/// Rule used to advance positions from velocities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegrationScheme {
    /// `position += velocity`
    #[default]
    Parity,
    /// `position += velocity * dt`
    TimeScaled,
}

impl IntegrationScheme {
    /// Stable name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            IntegrationScheme::Parity => "parity",
            IntegrationScheme::TimeScaled => "time-scaled",
        }
    }
}

impl fmt::Display for IntegrationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntegrationScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parity" => Ok(IntegrationScheme::Parity),
            "time-scaled" | "time_scaled" | "timescaled" => Ok(IntegrationScheme::TimeScaled),
            _ => Err(ConfigError::UnknownScheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parity() {
        assert_eq!(IntegrationScheme::default(), IntegrationScheme::Parity);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for scheme in [IntegrationScheme::Parity, IntegrationScheme::TimeScaled] {
            assert_eq!(scheme.name().parse::<IntegrationScheme>(), Ok(scheme));
        }
        assert_eq!(
            "TIME_SCALED".parse::<IntegrationScheme>(),
            Ok(IntegrationScheme::TimeScaled)
        );
        assert_eq!(
            "verlet".parse::<IntegrationScheme>(),
            Err(ConfigError::UnknownScheme("verlet".to_string()))
        );
    }
}
