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
//! Simulation settings
//!
//! Canvas dimensions, background colour, the gravity constant, the frame
//! rate used for clock bookkeeping and the integration scheme. Defaults can
//! be overridden from the environment:
//!
//! ```bash
//! export CANVAS_SIM_WIDTH=800
//! export CANVAS_SIM_HEIGHT=600
//! export CANVAS_SIM_GRAVITY=10
//! export CANVAS_SIM_FPS=30
//! export CANVAS_SIM_INTEGRATION=time-scaled
//! ```

use crate::ecs::components::Color;
use crate::error::ConfigError;
use crate::integration::IntegrationScheme;
use std::str::FromStr;

/// Default downward gravity in canvas units per second squared
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// Default frame rate; the clock's frame counter wraps at this value
pub const DEFAULT_FPS: u32 = 60;

/// Environment variable overriding [`Settings::width`]
pub const ENV_WIDTH: &str = "CANVAS_SIM_WIDTH";
/// Environment variable overriding [`Settings::height`]
pub const ENV_HEIGHT: &str = "CANVAS_SIM_HEIGHT";
/// Environment variable overriding [`Settings::gravity`]
pub const ENV_GRAVITY: &str = "CANVAS_SIM_GRAVITY";
/// Environment variable overriding [`Settings::fps`]
pub const ENV_FPS: &str = "CANVAS_SIM_FPS";
/// Environment variable overriding [`Settings::integration`]
pub const ENV_INTEGRATION: &str = "CANVAS_SIM_INTEGRATION";

/// Configuration shared by the simulation, its clock and the physics step
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Colour the renderer clears the canvas with each frame
    pub background: Color,
    /// Gravity constant applied to every physics body (force = gravity * mass)
    pub gravity: f64,
    /// Frames per second; bounds the clock's wrapping frame counter
    pub fps: u32,
    /// Position integration rule
    pub integration: IntegrationScheme,
}

impl Settings {
    /// Load settings, applying any environment overrides on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup
    ///
    /// `from_env` is this function over `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(raw) = lookup(ENV_WIDTH) {
            settings.width = parse_value(ENV_WIDTH, &raw)?;
        }
        if let Some(raw) = lookup(ENV_HEIGHT) {
            settings.height = parse_value(ENV_HEIGHT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_GRAVITY) {
            settings.gravity = parse_value(ENV_GRAVITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FPS) {
            settings.fps = parse_value(ENV_FPS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_INTEGRATION) {
            settings.integration = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_INTEGRATION,
                value: raw.clone(),
                reason: "expected 'parity' or 'time-scaled'",
            })?;
        }

        settings.validate()?;
        log::debug!("loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Builder-style gravity override
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder-style frame rate override
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Builder-style integration scheme override
    pub fn with_integration(mut self, integration: IntegrationScheme) -> Self {
        self.integration = integration;
        self
    }

    /// Check that every field is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(invalid(ENV_WIDTH, self.width, "canvas width must be positive"));
        }
        if self.height == 0 {
            return Err(invalid(ENV_HEIGHT, self.height, "canvas height must be positive"));
        }
        if self.fps == 0 {
            return Err(invalid(ENV_FPS, self.fps, "frame rate must be positive"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid(ENV_GRAVITY, self.gravity, "gravity must be finite"));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: 400,
            height: 400,
            background: Color::grey(220),
            gravity: DEFAULT_GRAVITY,
            fps: DEFAULT_FPS,
            integration: IntegrationScheme::default(),
        }
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: "not a valid number",
    })
}

fn invalid(key: &'static str, value: impl ToString, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.width, 400);
        assert_eq!(settings.height, 400);
        assert_eq!(settings.fps, DEFAULT_FPS);
        assert_eq!(settings.gravity, DEFAULT_GRAVITY);
        assert_eq!(settings.integration, IntegrationScheme::Parity);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let settings = Settings::from_lookup(lookup_from(&[
            (ENV_WIDTH, "800"),
            (ENV_GRAVITY, " 10 "),
            (ENV_FPS, "30"),
            (ENV_INTEGRATION, "time-scaled"),
        ]))
        .unwrap();

        assert_eq!(settings.width, 800);
        assert_eq!(settings.height, 400);
        assert_eq!(settings.gravity, 10.0);
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.integration, IntegrationScheme::TimeScaled);
    }

    #[test]
    fn test_malformed_value_rejected() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_GRAVITY, "heavy")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_GRAVITY, .. }));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_FPS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_FPS, .. }));
    }

    #[test]
    fn test_non_finite_gravity_rejected() {
        let settings = Settings::default().with_gravity(f64::NAN);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_integration_rejected() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_INTEGRATION, "rk4")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_INTEGRATION, .. }));
    }
}
