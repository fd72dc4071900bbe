//! Configuration error types.
//!
//! The simulation has no per-tick failure modes. Everything that can go wrong
//! goes wrong at level load, and is reported here before any state exists.

use std::fmt;

/// Rejected level or tuning configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A field dimension is zero, negative or not finite.
    InvalidFieldDimension {
        /// `"width"` or `"height"`.
        axis: &'static str,
        value: f32,
    },

    /// The level asked for a negative number of asteroids.
    NegativeAsteroidCount(i32),

    /// The level asked for more asteroids than a field may hold.
    TooManyAsteroids { count: i32, max: i32 },

    /// The spawn ring's keep-out radius does not fit inside the field.
    SpawnRingTooLarge {
        /// Spawn min distance plus ship and asteroid radii.
        clearance: f32,
        /// Half the shorter field side.
        half_extent: f32,
    },

    /// A wormhole has a non-finite position or a non-positive radius.
    InvalidWormhole {
        /// Index into the level's wormhole list.
        index: usize,
        reason: &'static str,
    },

    /// The ship start position is outside the field or not finite.
    InvalidShipStart { x: f32, y: f32 },

    /// A tuning value is outside its usable range.
    InvalidTuning {
        /// Name of the setting (for logging).
        name: &'static str,
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// JSON configuration could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidFieldDimension { axis, value } => {
                write!(f, "field {} must be positive and finite, got {}", axis, value)
            }
            ConfigurationError::NegativeAsteroidCount(count) => {
                write!(f, "asteroid count must not be negative, got {}", count)
            }
            ConfigurationError::TooManyAsteroids { count, max } => {
                write!(f, "asteroid count {} exceeds the limit of {}", count, max)
            }
            ConfigurationError::SpawnRingTooLarge {
                clearance,
                half_extent,
            } => write!(
                f,
                "spawn ring needs {} of clearance but the field only allows {}",
                clearance, half_extent
            ),
            ConfigurationError::InvalidWormhole { index, reason } => {
                write!(f, "wormhole #{} is invalid: {}", index, reason)
            }
            ConfigurationError::InvalidShipStart { x, y } => {
                write!(f, "ship start ({}, {}) is outside the field", x, y)
            }
            ConfigurationError::InvalidTuning {
                name,
                value,
                expected,
            } => write!(f, "setting '{}' = {} is out of range (expected {})", name, value, expected),
            ConfigurationError::Parse(msg) => write!(f, "could not parse configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<serde_json::Error> for ConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        ConfigurationError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_problem() {
        let err = ConfigurationError::InvalidFieldDimension {
            axis: "width",
            value: -3.0,
        };
        assert_eq!(err.to_string(), "field width must be positive and finite, got -3");

        let err = ConfigurationError::NegativeAsteroidCount(-1);
        assert!(err.to_string().contains("-1"));

        let err = ConfigurationError::TooManyAsteroids { count: 20_000, max: 10_000 };
        assert_eq!(err.to_string(), "asteroid count 20000 exceeds the limit of 10000");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigurationError = json_err.into();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }
}
