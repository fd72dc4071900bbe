//! Systems Critical - a subsystem-gated asteroid field simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gating, physics, collisions, game state)
//! - `settings`: Data-driven tuning and level configuration
//! - `error`: Construction-time configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigurationError;
pub use settings::{LevelConfig, Settings, WormholeSpec};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship acceleration while thrusting (pixels/s²)
    pub const PLAYER_THRUST: f32 = 100.0;
    /// Rotation in radians per second
    pub const PLAYER_TURN_RATE: f32 = 3.0;
    /// Exponential velocity decay rate while not thrusting (1/s)
    pub const PLAYER_DRAG: f32 = 0.5;
    /// Speed cap for the ship (pixels/s)
    pub const MAX_PHYSICS_VEL: f32 = 200.0;
    pub const PLAYER_RADIUS: f32 = 12.0;

    /// Projectile defaults
    pub const SHOT_SPEED: f32 = 200.0;
    /// Seconds a projectile lives
    pub const SHOT_LIFE: f32 = 2.0;
    /// Seconds between shots
    pub const PLAYER_SHOT_TIME: f32 = 0.5;
    pub const SHOT_RADIUS: f32 = 6.0;

    /// Asteroid spawn bounds
    pub const ROCK_MIN_RADIUS: f32 = 8.0;
    pub const ROCK_MAX_RADIUS: f32 = 16.0;
    pub const MAX_ROCK_VEL: f32 = 50.0;
    /// Spawn ring around the ship start
    pub const ROCK_SPAWN_MIN_DISTANCE: f32 = 100.0;
    pub const ROCK_SPAWN_MAX_DISTANCE: f32 = 250.0;

    pub const WORMHOLE_RADIUS: f32 = 16.0;

    /// Seconds between radar pulses while sensing
    pub const PLAYER_RADAR_TIME: f32 = 0.4;
    /// Seconds a radar pulse stays on screen
    pub const RADAR_LIFE: f32 = 3.0;
    /// Expansion rate of a radar pulse ring (pixels/s)
    pub const RADAR_SPEED: f32 = 120.0;

    /// Score awarded per destroyed asteroid
    pub const ROCK_SCORE: u64 = 1;
    /// Score awarded per completed level
    pub const LEVEL_SCORE: u64 = 10;
    /// Extra asteroids per level when escalating
    pub const ROCKS_PER_LEVEL: i32 = 2;
    /// Upper bound on asteroids in one level
    pub const MAX_ASTEROIDS: i32 = 10_000;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for a heading. Heading 0 points along +y, positive turns clockwise.
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Wrap a scalar coordinate into [0, extent)
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Shortest signed offset from `from` to `to` on a ring of size `extent`
#[inline]
pub fn wrapped_offset(from: f32, to: f32, extent: f32) -> f32 {
    let d = to - from;
    d - extent * (d / extent).round()
}
