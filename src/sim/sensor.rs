//! What the renderer is allowed to see
//!
//! Asteroids exist whether or not the radar is on. [`SensorOverlay`] decides
//! which of them are exposed; [`RadarSweep`] produces the cosmetic pulse rings.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroids::AsteroidField;
use super::state::{Asteroid, Capability};
use super::subsystem::SubsystemController;
use crate::settings::Settings;

/// Read-only visibility projection over the asteroid field
#[derive(Debug, Clone, Copy)]
pub struct SensorOverlay<'a> {
    subsystems: &'a SubsystemController,
    asteroids: &'a AsteroidField,
}

impl<'a> SensorOverlay<'a> {
    pub fn new(subsystems: &'a SubsystemController, asteroids: &'a AsteroidField) -> Self {
        Self {
            subsystems,
            asteroids,
        }
    }

    pub fn sensing(&self) -> bool {
        self.subsystems.is_active(Capability::Sensing)
    }

    /// Every live asteroid while sensing, nothing otherwise
    pub fn visible_asteroids(&self) -> Vec<&'a Asteroid> {
        if !self.sensing() {
            return Vec::new();
        }
        let asteroids: &'a AsteroidField = self.asteroids;
        asteroids.live().collect()
    }
}

/// An expanding radar ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPulse {
    pub origin: Vec2,
    /// Seconds since emission
    pub age: f32,
    pub radius: f32,
}

/// Emits pulses from the ship while sensing is powered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarSweep {
    pub pulses: Vec<RadarPulse>,
    /// Seconds until the next pulse
    pub cooldown: f32,
}

impl RadarSweep {
    pub fn tick(&mut self, subsystems: &SubsystemController, origin: Vec2, dt: f32, settings: &Settings) {
        for pulse in self.pulses.iter_mut() {
            pulse.age += dt;
            pulse.radius = pulse.age * settings.radar_speed;
        }
        self.pulses.retain(|p| p.age < settings.radar_lifetime);

        self.cooldown = (self.cooldown - dt).max(0.0);
        if subsystems.is_active(Capability::Sensing) && self.cooldown <= 0.0 {
            self.pulses.push(RadarPulse {
                origin,
                age: 0.0,
                radius: 0.0,
            });
            self.cooldown = settings.radar_interval;
        }
    }
}
