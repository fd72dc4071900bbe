//! Per-tick output for the renderer
//!
//! The simulation never draws. It hands over one of these and the renderer
//! draws exactly what is in it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sensor::{RadarPulse, SensorOverlay};
use super::state::{Asteroid, Capability, GamePhase, GameState, Projectile, Wormhole, WormholeTarget};

/// Where the ship is and which way it points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipPose {
    pub pos: Vec2,
    pub heading: f32,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

/// Immutable view of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub level: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub exit: Option<WormholeTarget>,
    pub active: Capability,
    pub ship: ShipPose,
    /// Empty unless sensing is powered
    pub visible_asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub wormholes: Vec<Wormhole>,
    pub radar_pulses: Vec<RadarPulse>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let overlay = SensorOverlay::new(&state.subsystems, &state.asteroids);
        Self {
            tick: state.time_ticks,
            level: state.level_index,
            score: state.score,
            phase: state.phase,
            exit: state.exit,
            active: state.subsystems.active(),
            ship: ShipPose {
                pos: state.ship.pos,
                heading: state.ship.heading,
                vel: state.ship.vel,
                radius: state.ship.radius,
                alive: state.ship.alive,
            },
            visible_asteroids: overlay.visible_asteroids().into_iter().cloned().collect(),
            projectiles: state.weapons.projectiles.clone(),
            wormholes: state.wormholes.clone(),
            radar_pulses: state.radar.pulses.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
