//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod asteroids;
pub mod collision;
pub mod field;
pub mod sensor;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod subsystem;
pub mod tick;
pub mod weapons;

pub use asteroids::{AsteroidField, AsteroidSpawn, SpawnRing};
pub use collision::{CollisionReport, resolve};
pub use field::Field;
pub use sensor::{RadarPulse, RadarSweep, SensorOverlay};
pub use ship::Turn;
pub use snapshot::{ShipPose, Snapshot};
pub use state::{
    Asteroid, Capability, GamePhase, GameState, Projectile, Ship, Wormhole, WormholeTarget,
};
pub use subsystem::SubsystemController;
pub use tick::{TickInput, tick};
pub use weapons::WeaponSystem;
