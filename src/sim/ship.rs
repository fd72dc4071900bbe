//! Ship kinematics
//!
//! Turning always works. Thrust only works with propulsion powered; without it
//! the ship coasts and bleeds speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::state::{Capability, Ship};
use super::subsystem::SubsystemController;
use crate::settings::Settings;
use crate::{heading_vector, normalize_angle};

/// Turn input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Turn {
    Left,
    #[default]
    None,
    Right,
}

impl Turn {
    #[inline]
    pub fn axis(&self) -> f32 {
        match self {
            Turn::Left => -1.0,
            Turn::None => 0.0,
            Turn::Right => 1.0,
        }
    }
}

impl Ship {
    /// Unit vector the ship is facing
    pub fn forward(&self) -> Vec2 {
        heading_vector(self.heading)
    }

    /// Advance the ship one tick
    pub fn tick(
        &mut self,
        subsystems: &SubsystemController,
        turn: Turn,
        thrust_requested: bool,
        dt: f32,
        settings: &Settings,
        field: &Field,
    ) {
        if !self.alive {
            return;
        }

        self.heading = normalize_angle(self.heading + settings.turn_rate * turn.axis() * dt);

        if thrust_requested && subsystems.is_active(Capability::Propulsion) {
            self.vel += self.forward() * settings.thrust * dt;
        } else if settings.drag > 0.0 {
            self.vel *= (-settings.drag * dt).exp();
        }

        // Clamp the velocity to the max efficiently
        let speed_sq = self.vel.length_squared();
        if speed_sq > settings.max_speed * settings.max_speed {
            self.vel = self.vel / speed_sq.sqrt() * settings.max_speed;
        }

        self.pos = field.wrap(self.pos + self.vel * dt);
    }
}
