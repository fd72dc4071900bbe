//! Collision detection and response
//!
//! Everything is a circle. Overlap is measured with the wrapped-minimal
//! distance; plain euclidean distance misses hits across a field edge.

use super::field::Field;
use super::state::{Asteroid, Projectile, Ship, Wormhole, WormholeTarget};
use crate::settings::AsteroidPolicy;

/// What a collision pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Ship overlapped a live asteroid
    pub ship_destroyed: bool,
    /// Asteroids removed by projectiles
    pub asteroids_destroyed: u32,
    /// Projectiles consumed by asteroids
    pub projectiles_consumed: u32,
    /// Wormhole the ship reached (None if destroyed in the same pass)
    pub exit: Option<WormholeTarget>,
}

/// Resolve every overlap for this tick.
///
/// Ship hits are decided against the asteroids that were live when the pass
/// began, so neither asteroid order nor same-tick projectile hits can save the ship.
pub fn resolve(
    field: &Field,
    ship: &mut Ship,
    asteroids: &mut [Asteroid],
    projectiles: &mut [Projectile],
    wormholes: &[Wormhole],
    policy: AsteroidPolicy,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    if ship.alive {
        let hit = asteroids
            .iter()
            .filter(|a| a.alive)
            .any(|a| field.circles_overlap(ship.pos, ship.radius, a.pos, a.radius));
        if hit {
            ship.alive = false;
            report.ship_destroyed = true;
        }
    }

    for shot in projectiles.iter_mut().filter(|p| p.alive) {
        let target = asteroids
            .iter_mut()
            .filter(|a| a.alive)
            .find(|a| field.circles_overlap(shot.pos, shot.radius, a.pos, a.radius));
        if let Some(rock) = target {
            shot.alive = false;
            report.projectiles_consumed += 1;
            if policy == AsteroidPolicy::Destructible {
                rock.alive = false;
                report.asteroids_destroyed += 1;
            }
        }
    }

    if ship.alive {
        report.exit = wormholes
            .iter()
            .find(|w| field.circles_overlap(ship.pos, ship.radius, w.pos, w.radius))
            .map(|w| w.target);
    }

    report
}
