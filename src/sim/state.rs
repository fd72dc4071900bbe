//! Game state and core simulation types
//!
//! Everything a tick reads or writes is owned by [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroids::{AsteroidField, AsteroidSpawn};
use super::field::Field;
use super::sensor::RadarSweep;
use super::subsystem::SubsystemController;
use super::weapons::WeaponSystem;
use crate::error::ConfigurationError;
use crate::settings::{LevelConfig, Settings};

/// One of the three mutually exclusive ship subsystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Capability {
    /// Engines: thrust is available
    #[default]
    Propulsion,
    /// Guns: firing is available
    Weapons,
    /// Radar: asteroids are visible
    Sensing,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Propulsion,
        Capability::Weapons,
        Capability::Sensing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Propulsion => "Propulsion",
            Capability::Weapons => "Weapons",
            Capability::Sensing => "Sensing",
        }
    }
}

/// Current phase of a level. `Complete` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Ship reached a wormhole
    Complete,
    /// Ship was destroyed
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Where a wormhole leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WormholeTarget {
    /// Jump to a specific level
    Level(u32),
    /// End of the run
    #[default]
    Complete,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Radians, normalized to [-π, π)
    pub heading: f32,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Ship {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            heading: 0.0,
            vel: Vec2::ZERO,
            radius,
            alive: true,
        }
    }
}

/// An obstacle drifting through the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

/// A shot fired from the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left to live
    pub ttl: f32,
    pub radius: f32,
    pub alive: bool,
}

/// A static level exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wormhole {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub target: WormholeTarget,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Config the current level was built from
    pub level: LevelConfig,
    pub settings: Settings,
    /// Levels completed this run
    pub level_index: u32,
    pub score: u64,
    /// Score when the current level began (restored on restart)
    level_start_score: u64,
    /// Simulation tick counter for the current level
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Target of the wormhole that completed the level
    pub exit: Option<WormholeTarget>,
    pub field: Field,
    pub ship: Ship,
    pub subsystems: SubsystemController,
    pub weapons: WeaponSystem,
    pub asteroids: AsteroidField,
    pub wormholes: Vec<Wormhole>,
    /// Cosmetic radar pulses (not gameplay-affecting)
    pub radar: RadarSweep,
}

impl GameState {
    /// Build a level. Invalid config is refused before any state exists.
    pub fn new(level: LevelConfig, settings: Settings) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        level.validate_with(&settings)?;

        let field = Field::new(level.field_width, level.field_height);
        let mut state = Self {
            ship: Ship::new(level.ship_start(), settings.ship_radius),
            subsystems: SubsystemController::new(level.initial_capability),
            level,
            settings,
            level_index: 0,
            score: 0,
            level_start_score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            exit: None,
            field,
            weapons: WeaponSystem::default(),
            asteroids: AsteroidField::default(),
            wormholes: Vec::new(),
            radar: RadarSweep::default(),
        };
        state.load_level();
        Ok(state)
    }

    /// Populate every entity from `self.level`
    fn load_level(&mut self) {
        let level = &self.level;
        let settings = &self.settings;

        self.field = Field::new(level.field_width, level.field_height);
        self.ship = Ship::new(level.ship_start(), settings.ship_radius);
        self.subsystems = SubsystemController::new(level.initial_capability);
        self.weapons = WeaponSystem::default();
        self.radar = RadarSweep::default();
        self.phase = GamePhase::Playing;
        self.exit = None;
        self.time_ticks = 0;

        // Validation guarantees a non-negative count
        let count = level.asteroid_count.max(0) as usize;
        let spawn = AsteroidSpawn::from_settings(settings);
        self.asteroids = if level.spawn_ring {
            AsteroidField::initialize_with(
                count,
                level.seed,
                self.field,
                &spawn.around(
                    level.ship_start(),
                    settings.spawn_min_distance,
                    settings.spawn_max_distance,
                ),
            )
        } else {
            AsteroidField::initialize_with(count, level.seed, self.field, &spawn)
        };

        self.wormholes = level
            .wormholes
            .iter()
            .enumerate()
            .map(|(i, w)| Wormhole {
                id: i as u32,
                pos: self.field.wrap(w.pos),
                radius: w.radius,
                target: w.target,
            })
            .collect();

        if self.wormholes.is_empty() {
            log::warn!("Level {} has no wormholes and cannot be completed", self.level_index);
        }
        log::info!(
            "Level {} loaded: field={}x{}, asteroids={}, wormholes={}, seed={}",
            self.level_index,
            self.field.width,
            self.field.height,
            self.asteroids.len(),
            self.wormholes.len(),
            level.seed
        );
    }

    /// Replay the current level from scratch
    pub fn restart(&mut self) {
        log::info!("Restarting level {} (score {} -> {})", self.level_index, self.score, self.level_start_score);
        self.score = self.level_start_score;
        self.load_level();
    }

    /// Move on to `next`, keeping the score
    pub fn advance_level(&mut self, next: LevelConfig) -> Result<(), ConfigurationError> {
        next.validate_with(&self.settings)?;
        self.level = next;
        self.level_index += 1;
        self.level_start_score = self.score;
        self.load_level();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WormholeSpec;

    #[test]
    fn test_new_state() {
        let state = GameState::new(LevelConfig::default(), Settings::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.ship.alive);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.asteroids.len(), 5);
        assert_eq!(state.wormholes.len(), 1);
        assert!(state.subsystems.is_active(Capability::Propulsion));
    }

    #[test]
    fn test_refuses_invalid_config() {
        let err = GameState::new(LevelConfig::empty(-1.0, 10.0), Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidFieldDimension { .. }));

        let level = LevelConfig {
            asteroid_count: -2,
            ..LevelConfig::default()
        };
        assert!(GameState::new(level, Settings::default()).is_err());

        let level = LevelConfig {
            field_width: 120.0,
            field_height: 120.0,
            asteroid_count: 10,
            ..LevelConfig::default()
        };
        let err = GameState::new(level, Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::SpawnRingTooLarge { .. }));
    }

    #[test]
    fn test_initial_capability_from_level() {
        let level = LevelConfig {
            initial_capability: Capability::Sensing,
            ..LevelConfig::empty(100.0, 100.0)
        };
        let state = GameState::new(level, Settings::default()).unwrap();
        assert_eq!(state.subsystems.active(), Capability::Sensing);
    }

    #[test]
    fn test_restart_and_advance() {
        let mut state = GameState::new(LevelConfig::default(), Settings::default()).unwrap();
        state.score = 12;
        state.phase = GamePhase::Complete;

        let mut next = LevelConfig::empty(300.0, 300.0);
        next.wormholes.push(WormholeSpec::new(Vec2::new(10.0, 10.0), WormholeTarget::Complete));
        state.advance_level(next).unwrap();
        assert_eq!(state.level_index, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.field, Field::new(300.0, 300.0));

        state.score = 20;
        state.phase = GamePhase::Lost;
        state.ship.alive = false;
        state.restart();
        assert_eq!(state.score, 12);
        assert!(state.ship.alive);
        assert_eq!(state.phase, GamePhase::Playing);

        assert!(state.advance_level(LevelConfig::empty(0.0, 1.0)).is_err());
        assert_eq!(state.level_index, 1);
    }
}
