//! Tuning and level configuration
//!
//! Both are plain serde structs with defaults, so a JSON document only needs
//! the keys it wants to override. Validation happens once, at level load.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigurationError;
use crate::sim::{Capability, WormholeTarget};
use crate::{heading_vector, wrap_coord};

/// What a projectile does to the asteroid it hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AsteroidPolicy {
    /// Asteroid is removed from the level
    #[default]
    Destructible,
    /// Projectile is absorbed, asteroid keeps going
    Indestructible,
}

impl AsteroidPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AsteroidPolicy::Destructible => "Destructible",
            AsteroidPolicy::Indestructible => "Indestructible",
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ship ===
    /// Acceleration while thrusting (pixels/s²)
    pub thrust: f32,
    /// Turn rate (radians/s)
    pub turn_rate: f32,
    /// Exponential velocity decay while not thrusting (1/s, 0 = coast forever)
    pub drag: f32,
    /// Speed cap (pixels/s)
    pub max_speed: f32,
    pub ship_radius: f32,

    // === Weapons ===
    pub shot_speed: f32,
    pub shot_lifetime: f32,
    pub shot_cooldown: f32,
    pub shot_radius: f32,

    // === Asteroids ===
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    pub asteroid_max_speed: f32,
    pub spawn_min_distance: f32,
    pub spawn_max_distance: f32,
    pub asteroid_policy: AsteroidPolicy,

    // === Sensing ===
    pub radar_interval: f32,
    pub radar_lifetime: f32,
    pub radar_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thrust: PLAYER_THRUST,
            turn_rate: PLAYER_TURN_RATE,
            drag: PLAYER_DRAG,
            max_speed: MAX_PHYSICS_VEL,
            ship_radius: PLAYER_RADIUS,

            shot_speed: SHOT_SPEED,
            shot_lifetime: SHOT_LIFE,
            shot_cooldown: PLAYER_SHOT_TIME,
            shot_radius: SHOT_RADIUS,

            asteroid_min_radius: ROCK_MIN_RADIUS,
            asteroid_max_radius: ROCK_MAX_RADIUS,
            asteroid_max_speed: MAX_ROCK_VEL,
            spawn_min_distance: ROCK_SPAWN_MIN_DISTANCE,
            spawn_max_distance: ROCK_SPAWN_MAX_DISTANCE,
            asteroid_policy: AsteroidPolicy::Destructible,

            radar_interval: PLAYER_RADAR_TIME,
            radar_lifetime: RADAR_LIFE,
            radar_speed: RADAR_SPEED,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidTuning {
            name,
            value,
            expected: "> 0",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidTuning {
            name,
            value,
            expected: ">= 0",
        })
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing keys with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_policy(mut self, policy: AsteroidPolicy) -> Self {
        self.asteroid_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        non_negative("thrust", self.thrust)?;
        non_negative("turn_rate", self.turn_rate)?;
        non_negative("drag", self.drag)?;
        positive("max_speed", self.max_speed)?;
        positive("ship_radius", self.ship_radius)?;

        non_negative("shot_speed", self.shot_speed)?;
        positive("shot_lifetime", self.shot_lifetime)?;
        non_negative("shot_cooldown", self.shot_cooldown)?;
        positive("shot_radius", self.shot_radius)?;

        positive("asteroid_min_radius", self.asteroid_min_radius)?;
        positive("asteroid_max_radius", self.asteroid_max_radius)?;
        if self.asteroid_max_radius < self.asteroid_min_radius {
            return Err(ConfigurationError::InvalidTuning {
                name: "asteroid_max_radius",
                value: self.asteroid_max_radius,
                expected: ">= asteroid_min_radius",
            });
        }
        non_negative("asteroid_max_speed", self.asteroid_max_speed)?;
        non_negative("spawn_min_distance", self.spawn_min_distance)?;
        non_negative("spawn_max_distance", self.spawn_max_distance)?;
        if self.spawn_max_distance < self.spawn_min_distance {
            return Err(ConfigurationError::InvalidTuning {
                name: "spawn_max_distance",
                value: self.spawn_max_distance,
                expected: ">= spawn_min_distance",
            });
        }

        positive("radar_interval", self.radar_interval)?;
        positive("radar_lifetime", self.radar_lifetime)?;
        non_negative("radar_speed", self.radar_speed)?;
        Ok(())
    }
}

/// A wormhole as described by the level loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WormholeSpec {
    pub pos: Vec2,
    #[serde(default = "default_wormhole_radius")]
    pub radius: f32,
    #[serde(default)]
    pub target: WormholeTarget,
}

fn default_wormhole_radius() -> f32 {
    WORMHOLE_RADIUS
}

impl WormholeSpec {
    pub fn new(pos: Vec2, target: WormholeTarget) -> Self {
        Self {
            pos,
            radius: WORMHOLE_RADIUS,
            target,
        }
    }
}

/// Everything needed to build a level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub asteroid_count: i32,
    pub seed: u64,
    pub wormholes: Vec<WormholeSpec>,
    /// Ship start position (field centre when absent)
    pub ship_start: Option<Vec2>,
    pub initial_capability: Capability,
    /// Spawn asteroids in a ring around the ship start instead of uniformly
    pub spawn_ring: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            asteroid_count: 5,
            seed: 0,
            wormholes: vec![WormholeSpec::new(
                Vec2::new(FIELD_WIDTH * 0.5, FIELD_HEIGHT * 0.5 + 200.0),
                WormholeTarget::Complete,
            )],
            ship_start: None,
            initial_capability: Capability::default(),
            spawn_ring: true,
        }
    }
}

impl LevelConfig {
    /// An empty level of the given size: no asteroids, no wormholes
    pub fn empty(field_width: f32, field_height: f32) -> Self {
        Self {
            field_width,
            field_height,
            asteroid_count: 0,
            wormholes: Vec::new(),
            spawn_ring: false,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let level: LevelConfig = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Ship start, defaulting to the field centre
    pub fn ship_start(&self) -> Vec2 {
        self.ship_start.unwrap_or(self.dimensions() * 0.5)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (axis, value) in [("width", self.field_width), ("height", self.field_height)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigurationError::InvalidFieldDimension { axis, value });
            }
        }

        if self.asteroid_count < 0 {
            return Err(ConfigurationError::NegativeAsteroidCount(self.asteroid_count));
        }
        if self.asteroid_count > MAX_ASTEROIDS {
            return Err(ConfigurationError::TooManyAsteroids {
                count: self.asteroid_count,
                max: MAX_ASTEROIDS,
            });
        }

        for (index, wormhole) in self.wormholes.iter().enumerate() {
            if !wormhole.pos.is_finite() {
                return Err(ConfigurationError::InvalidWormhole {
                    index,
                    reason: "position is not finite",
                });
            }
            if !(wormhole.radius > 0.0 && wormhole.radius.is_finite()) {
                return Err(ConfigurationError::InvalidWormhole {
                    index,
                    reason: "radius must be positive",
                });
            }
        }

        if let Some(start) = self.ship_start {
            let inside = start.is_finite()
                && (0.0..self.field_width).contains(&start.x)
                && (0.0..self.field_height).contains(&start.y);
            if !inside {
                return Err(ConfigurationError::InvalidShipStart {
                    x: start.x,
                    y: start.y,
                });
            }
        }

        Ok(())
    }

    /// Validate against the tuning the level will be played with. A spawn ring
    /// must leave room for the ship and the largest asteroid inside half the
    /// shorter field side, or wrapped asteroids can land on the ship.
    pub fn validate_with(&self, settings: &Settings) -> Result<(), ConfigurationError> {
        self.validate()?;
        if self.spawn_ring {
            let clearance =
                settings.spawn_min_distance + settings.ship_radius + settings.asteroid_max_radius;
            let half_extent = self.field_width.min(self.field_height) * 0.5;
            if clearance > half_extent {
                return Err(ConfigurationError::SpawnRingTooLarge {
                    clearance,
                    half_extent,
                });
            }
        }
        Ok(())
    }

    /// Derive the config for a later level: two more asteroids per level, a
    /// per-level seed, and wormholes relocated around the ship start.
    pub fn escalated(&self, level_index: u32, settings: &Settings) -> Self {
        let level_seed = (level_index as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        let mut rng = Pcg32::seed_from_u64(level_seed);
        let start = self.ship_start();
        let (min_d, max_d) = (settings.spawn_min_distance, settings.spawn_max_distance);
        let extra = i32::try_from(level_index)
            .unwrap_or(i32::MAX)
            .saturating_mul(ROCKS_PER_LEVEL);

        let wormholes = self
            .wormholes
            .iter()
            .map(|w| {
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let distance = min_d + rng.random::<f32>() * (max_d - min_d);
                let pos = start + heading_vector(angle) * distance;
                WormholeSpec {
                    pos: Vec2::new(
                        wrap_coord(pos.x, self.field_width),
                        wrap_coord(pos.y, self.field_height),
                    ),
                    ..w.clone()
                }
            })
            .collect();

        Self {
            asteroid_count: self.asteroid_count.saturating_add(extra),
            seed: level_seed,
            wormholes,
            ..self.clone()
        }
    }
}
