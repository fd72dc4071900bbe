//! Systems Critical entry point
//!
//! Runs a headless session with a scripted pilot. The pilot only acts on what
//! the snapshot shows it, so it has to power the radar to know where rocks are.

use glam::Vec2;

use systems_critical::consts::SIM_DT;
use systems_critical::normalize_angle;
use systems_critical::sim::{Capability, Field, GamePhase, GameState, Snapshot, TickInput, Turn, tick};
use systems_critical::{ConfigurationError, LevelConfig, Settings};

/// Two simulated minutes
const SESSION_TICKS: u64 = 120 * 60;
/// Length of one sense -> fly -> shoot cycle
const PILOT_CYCLE: u64 = 180;
const SENSE_TICKS: u64 = 30;
const FLY_TICKS: u64 = 120;

/// Scripted autopilot for demo sessions
struct Pilot;

impl Pilot {
    fn input(&self, snap: &Snapshot, field: &Field, clock: u64) -> TickInput {
        let step = clock % PILOT_CYCLE;

        let wanted = if step < SENSE_TICKS {
            Capability::Sensing
        } else if step < SENSE_TICKS + FLY_TICKS {
            Capability::Propulsion
        } else {
            Capability::Weapons
        };

        let target = snap
            .wormholes
            .iter()
            .map(|w| field.delta(snap.ship.pos, w.pos))
            .min_by(|a, b| a.length().total_cmp(&b.length()))
            .unwrap_or(Vec2::ZERO);

        let turn = if target == Vec2::ZERO {
            Turn::None
        } else {
            let desired = target.x.atan2(target.y);
            let error = normalize_angle(desired - snap.ship.heading);
            if error > 0.05 {
                Turn::Right
            } else if error < -0.05 {
                Turn::Left
            } else {
                Turn::None
            }
        };

        TickInput {
            turn,
            thrust: wanted == Capability::Propulsion && turn == Turn::None,
            fire: wanted == Capability::Weapons,
            switch_to: (snap.active != wanted).then_some(wanted),
        }
    }
}

fn run() -> Result<Snapshot, ConfigurationError> {
    let settings = Settings::default();
    let base = LevelConfig {
        seed: 2024,
        ..LevelConfig::default()
    };
    let mut state = GameState::new(base.clone(), settings.clone())?;
    let pilot = Pilot;

    let mut snap = Snapshot::capture(&state);
    let mut deaths = 0u32;

    for clock in 0..SESSION_TICKS {
        match snap.phase {
            GamePhase::Complete => {
                let next = base.escalated(state.level_index + 1, &settings);
                state.advance_level(next)?;
                snap = Snapshot::capture(&state);
            }
            GamePhase::Lost => {
                deaths += 1;
                state.restart();
                snap = Snapshot::capture(&state);
            }
            GamePhase::Playing => {}
        }

        let input = pilot.input(&snap, &state.field, clock);
        snap = tick(&mut state, &input, SIM_DT);

        if clock % 600 == 0 {
            log::info!(
                "t={}s level={} score={} active={} rocks_seen={} shots={}",
                clock / 60,
                snap.level,
                snap.score,
                snap.active.as_str(),
                snap.visible_asteroids.len(),
                snap.projectiles.len()
            );
        }
    }

    log::info!(
        "Session over: level {} reached, score {}, {} deaths",
        snap.level,
        snap.score,
        deaths
    );
    Ok(snap)
}

fn main() {
    env_logger::init();
    log::info!("Systems Critical (headless) starting...");

    let snap = match run() {
        Ok(snap) => snap,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    match snap.to_json() {
        Ok(json) => println!("{}", json),
        Err(err) => {
            log::error!("Failed to encode snapshot: {}", err);
            std::process::exit(1);
        }
    }
}
