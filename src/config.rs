//! Simulation configuration loaded from JSON.
//!
//! Every section falls back to its defaults, so a file only needs the values
//! it changes:
//!
//! ```
//! use warband::config::SimulationConfig;
//! use warband::mobile::CollisionPolicy;
//!
//! let config = SimulationConfig::from_json_str(
//!     r#"{ "movement": { "policy": { "kind": "slide" } } }"#,
//! )
//! .unwrap();
//! assert_eq!(config.movement.policy, CollisionPolicy::Slide);
//! assert_eq!(config.chase.stop_gap, warband::STOP_GAP);
//! ```
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::ChaseConfig;
use crate::camera::CameraSettings;
use crate::mobile::MovementConfig;

/// Errors raised while loading a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

/// All tunables of a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Mobile movement and collision settings.
    pub movement: MovementConfig,
    /// Enemy chase settings.
    pub chase: ChaseConfig,
    /// Follow camera settings.
    pub camera: CameraSettings,
}

impl SimulationConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON file at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`SimulationConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks every value the movement code relies on.
    ///
    /// # Errors
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let movement = &self.movement;
        let waypoint = &self.chase.waypoint;
        let camera = &self.camera;
        let checks = [
            (
                "movement.arrival_epsilon",
                positive(movement.arrival_epsilon),
                "must be positive",
            ),
            (
                "movement.slide_friction",
                movement.slide_friction > 0.0 && movement.slide_friction <= 1.0,
                "must be in (0, 1]",
            ),
            (
                "movement.separation_distance_factor",
                positive(movement.separation_distance_factor),
                "must be positive",
            ),
            (
                "movement.separation_speed",
                non_negative(movement.separation_speed),
                "must not be negative",
            ),
            (
                "movement.avoidance_radius_factor",
                positive(movement.avoidance_radius_factor),
                "must be positive",
            ),
            (
                "movement.avoidance_weight",
                non_negative(movement.avoidance_weight),
                "must not be negative",
            ),
            (
                "movement.prediction_horizon",
                non_negative(movement.prediction_horizon),
                "must not be negative",
            ),
            (
                "chase.stop_gap",
                non_negative(self.chase.stop_gap),
                "must not be negative",
            ),
            (
                "chase.backoff_ratio",
                self.chase.backoff_ratio > 0.0 && self.chase.backoff_ratio < 1.0,
                "must be in (0, 1)",
            ),
            (
                "chase.waypoint.initial_radius",
                positive(waypoint.initial_radius),
                "must be positive",
            ),
            (
                "chase.waypoint.shrink_factor",
                waypoint.shrink_factor > 0.0 && waypoint.shrink_factor < 1.0,
                "must be in (0, 1)",
            ),
            (
                "chase.waypoint.samples",
                waypoint.samples >= 1,
                "must be at least 1",
            ),
            (
                "chase.waypoint.clearance_ratio",
                non_negative(waypoint.clearance_ratio),
                "must not be negative",
            ),
            (
                "chase.waypoint.max_rounds",
                waypoint.max_rounds >= 1,
                "must be at least 1",
            ),
            (
                "camera.stiffness",
                positive(camera.stiffness),
                "must be positive",
            ),
            (
                "camera.damping",
                non_negative(camera.damping),
                "must not be negative",
            ),
            (
                "camera.fov_degrees",
                camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0,
                "must be in (0, 180)",
            ),
            (
                "camera.near",
                positive(camera.near) && camera.far > camera.near,
                "must be positive and below camera.far",
            ),
            (
                "camera.offset",
                camera.offset.is_finite() && camera.offset.y > 0.0,
                "must be finite and above the ground",
            ),
        ];
        checks
            .into_iter()
            .find(|&(_, ok, _)| !ok)
            .map_or(Ok(()), |(field, _, reason)| {
                Err(ConfigError::Invalid { field, reason })
            })
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}
