//! Ship guns and projectile lifetimes

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::state::{Capability, Projectile, Ship};
use super::subsystem::SubsystemController;
use crate::settings::Settings;

/// Live projectiles plus the fire-rate cooldown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponSystem {
    /// Active projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Seconds until the guns may fire again
    pub cooldown: f32,
    next_id: u32,
}

impl WeaponSystem {
    /// Fire if allowed, then move and age every projectile.
    ///
    /// A fire request while weapons are unpowered is dropped, not queued.
    /// Returns true if a projectile was spawned this tick.
    pub fn tick(
        &mut self,
        subsystems: &SubsystemController,
        fire_requested: bool,
        ship: &Ship,
        dt: f32,
        settings: &Settings,
        field: &Field,
    ) -> bool {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let fired = fire_requested
            && ship.alive
            && subsystems.is_active(Capability::Weapons)
            && self.cooldown <= 0.0;
        if fired {
            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            self.projectiles.push(Projectile {
                id,
                pos: ship.pos,
                vel: ship.forward() * settings.shot_speed,
                ttl: settings.shot_lifetime,
                radius: settings.shot_radius,
                alive: true,
            });
            self.cooldown = settings.shot_cooldown;
            log::debug!("Projectile {} fired at ({:.1}, {:.1})", id, ship.pos.x, ship.pos.y);
        }

        for p in self.projectiles.iter_mut() {
            p.pos = field.wrap(p.pos + p.vel * dt);
            p.ttl -= dt;
            if p.ttl <= 0.0 {
                p.alive = false;
            }
        }
        self.retain_alive();

        fired
    }

    /// Drop expired and consumed projectiles
    pub fn retain_alive(&mut self) {
        self.projectiles.retain(|p| p.alive);
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use glam::Vec2;

    fn setup() -> (Ship, Field, Settings) {
        let field = Field::new(800.0, 600.0);
        (Ship::new(field.center(), 12.0), field, Settings::default())
    }

    #[test]
    fn test_fire_dropped_without_weapons() {
        let (ship, field, settings) = setup();
        for cap in [Capability::Propulsion, Capability::Sensing] {
            let ctrl = SubsystemController::new(cap);
            let mut weapons = WeaponSystem::default();
            for _ in 0..30 {
                assert!(!weapons.tick(&ctrl, true, &ship, SIM_DT, &settings, &field));
            }
            assert!(weapons.is_empty());
        }
    }

    #[test]
    fn test_no_queued_fire_after_switch() {
        let (ship, field, settings) = setup();
        let mut ctrl = SubsystemController::new(Capability::Propulsion);
        let mut weapons = WeaponSystem::default();
        weapons.tick(&ctrl, true, &ship, SIM_DT, &settings, &field);

        // Powering weapons with the trigger released must not fire the earlier request
        ctrl.set_active(Capability::Weapons);
        weapons.tick(&ctrl, false, &ship, SIM_DT, &settings, &field);
        assert!(weapons.is_empty());
    }

    #[test]
    fn test_cooldown_limits_fire_rate() {
        let (ship, field, settings) = setup();
        let ctrl = SubsystemController::new(Capability::Weapons);
        let mut weapons = WeaponSystem::default();

        // One second of held trigger at 0.5s cooldown
        let fired = (0..60)
            .filter(|_| weapons.tick(&ctrl, true, &ship, SIM_DT, &settings, &field))
            .count();
        assert_eq!(fired, 2);
        assert_eq!(weapons.len(), 2);
    }

    #[test]
    fn test_projectile_motion_and_expiry() {
        let (mut ship, field, settings) = setup();
        ship.heading = std::f32::consts::FRAC_PI_2;
        let ctrl = SubsystemController::new(Capability::Weapons);
        let mut weapons = WeaponSystem::default();

        weapons.tick(&ctrl, true, &ship, 0.1, &settings, &field);
        let shot = &weapons.projectiles[0];
        let expected = field.wrap(ship.pos + Vec2::X * settings.shot_speed * 0.1);
        assert!((shot.pos - expected).length() < 1e-3);

        for _ in 0..25 {
            weapons.tick(&ctrl, false, &ship, 0.1, &settings, &field);
            for p in &weapons.projectiles {
                assert!(field.contains(p.pos));
            }
        }
        assert!(weapons.is_empty());
    }

    #[test]
    fn test_dead_ship_cannot_fire() {
        let (mut ship, field, settings) = setup();
        ship.alive = false;
        let ctrl = SubsystemController::new(Capability::Weapons);
        let mut weapons = WeaponSystem::default();
        assert!(!weapons.tick(&ctrl, true, &ship, SIM_DT, &settings, &field));
    }
}
