//! Asteroid field population and motion
//!
//! Asteroids move every tick no matter which subsystem is powered. The player
//! losing sight of them does not stop them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::state::Asteroid;
use crate::consts::*;
use crate::heading_vector;
use crate::settings::Settings;

/// Keep-out ring used when placing asteroids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRing {
    pub center: Vec2,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Bounds for randomly generated asteroids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidSpawn {
    pub min_radius: f32,
    pub max_radius: f32,
    pub max_speed: f32,
    /// Keep asteroids out of a ring around a point
    pub ring: Option<SpawnRing>,
}

impl Default for AsteroidSpawn {
    fn default() -> Self {
        Self {
            min_radius: ROCK_MIN_RADIUS,
            max_radius: ROCK_MAX_RADIUS,
            max_speed: MAX_ROCK_VEL,
            ring: None,
        }
    }
}

impl AsteroidSpawn {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            min_radius: settings.asteroid_min_radius,
            max_radius: settings.asteroid_max_radius,
            max_speed: settings.asteroid_max_speed,
            ring: None,
        }
    }

    /// Same bounds, placed at [min_distance, max_distance) from `center`
    pub fn around(&self, center: Vec2, min_distance: f32, max_distance: f32) -> Self {
        Self {
            ring: Some(SpawnRing {
                center,
                min_distance,
                max_distance,
            }),
            ..*self
        }
    }
}

#[inline]
fn lerp(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Random vector with uniformly random direction and magnitude below `max_magnitude`
fn random_vec(rng: &mut Pcg32, max_magnitude: f32) -> Vec2 {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let magnitude = rng.random::<f32>() * max_magnitude;
    heading_vector(angle) * magnitude
}

/// All asteroids in the current level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsteroidField {
    /// Asteroids (sorted by id)
    pub asteroids: Vec<Asteroid>,
    next_id: u32,
}

impl AsteroidField {
    /// Scatter `count` asteroids uniformly with default bounds. Same seed, same field.
    pub fn initialize(count: usize, seed: u64, field: Field) -> Self {
        Self::initialize_with(count, seed, field, &AsteroidSpawn::default())
    }

    pub fn initialize_with(count: usize, seed: u64, field: Field, spawn: &AsteroidSpawn) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut asteroids = Self {
            asteroids: Vec::with_capacity(count),
            next_id: 0,
        };

        for _ in 0..count {
            let pos = match spawn.ring {
                Some(ring) => {
                    let angle = rng.random::<f32>() * std::f32::consts::TAU;
                    // Past half the shorter side the wrap can bring a rock back inside the ring
                    let reach = ring
                        .max_distance
                        .min(field.width.min(field.height) * 0.5)
                        .max(ring.min_distance);
                    let distance = lerp(&mut rng, ring.min_distance, reach);
                    field.wrap(ring.center + heading_vector(angle) * distance)
                }
                None => field.wrap(Vec2::new(
                    rng.random::<f32>() * field.width,
                    rng.random::<f32>() * field.height,
                )),
            };
            let vel = random_vec(&mut rng, spawn.max_speed);
            let radius = lerp(&mut rng, spawn.min_radius, spawn.max_radius);
            asteroids.spawn(pos, vel, radius);
        }

        asteroids
    }

    /// Insert a hand-placed asteroid, returning its id
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.asteroids.push(Asteroid {
            id,
            pos,
            vel,
            radius,
            alive: true,
        });
        id
    }

    /// Drift every live asteroid and wrap it into the field
    pub fn tick(&mut self, dt: f32, field: &Field) {
        for rock in self.asteroids.iter_mut().filter(|a| a.alive) {
            rock.pos = field.wrap(rock.pos + rock.vel * dt);
        }
    }

    pub fn retain_alive(&mut self) {
        self.asteroids.retain(|a| a.alive);
    }

    pub fn live(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter().filter(|a| a.alive)
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }
}
