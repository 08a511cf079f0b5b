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
//! Error types
//!
//! Every registry and construction failure is reported through
//! [`ComponentError`]; nothing in the core logs a failure and carries on.

use crate::ecs::ComponentKind;
use thiserror::Error;

/// Failures surfaced by component registries, objects and component constructors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// A component of the same category is already attached and overwrite was not requested
    #[error("{kind} component already attached; pass overwrite to replace it")]
    DuplicateComponent {
        /// Category that is already occupied
        kind: ComponentKind,
    },

    /// No component of the requested category is attached
    #[error("no {kind} component attached")]
    ComponentNotFound {
        /// Category that was looked up
        kind: ComponentKind,
    },

    /// Activation requested for a component that is already active
    #[error("{kind} component is already active")]
    AlreadyActive {
        /// Category of the component
        kind: ComponentKind,
    },

    /// Deactivation requested for a component that is already inactive
    #[error("{kind} component is already inactive")]
    AlreadyInactive {
        /// Category of the component
        kind: ComponentKind,
    },

    /// Constructor arguments failed validation; the component was never created
    #[error("invalid arguments for {component}: {reason}")]
    InvalidComponentArgs {
        /// Name of the concrete component being built
        component: &'static str,
        /// What was wrong with the arguments
        reason: String,
    },

    /// A custom component was built against an incompatible component API
    #[error("custom component '{name}' targets API {api_version}, incompatible with {supported}")]
    IncompatibleComponent {
        /// Name of the custom component
        name: &'static str,
        /// API version the component declares
        api_version: String,
        /// API version supported by this crate
        supported: &'static str,
    },
}

impl ComponentError {
    pub(crate) fn invalid_args(component: &'static str, reason: impl Into<String>) -> Self {
        ComponentError::InvalidComponentArgs {
            component,
            reason: reason.into(),
        }
    }
}

/// Result alias for component operations
pub type ComponentResult<T> = Result<T, ComponentError>;

/// Failures while loading [`Settings`](crate::config::Settings)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A setting had a value that could not be parsed or is out of range
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Setting or environment variable name
        key: &'static str,
        /// Offending raw value
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A fixed clock step was zero, negative or non-finite
    #[error("fixed time step must be positive and finite, got {step}")]
    InvalidTimestep {
        /// Requested step in seconds
        step: f64,
    },

    /// An integration scheme name was not recognised
    #[error("unknown integration scheme '{0}'")]
    UnknownScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_category() {
        let err = ComponentError::DuplicateComponent {
            kind: ComponentKind::PhysicsBody,
        };
        assert!(err.to_string().contains("PhysicsBody"));

        let err = ComponentError::ComponentNotFound {
            kind: ComponentKind::Custom("thruster"),
        };
        assert!(err.to_string().contains("thruster"));
    }

    #[test]
    fn test_invalid_args_helper() {
        let err = ComponentError::invalid_args("CircleCollider", "radius must be positive");
        assert_eq!(
            err,
            ComponentError::InvalidComponentArgs {
                component: "CircleCollider",
                reason: "radius must be positive".to_string(),
            }
        );
    }
}
