//! Hazard, homing hazard and power-up spawning
//!
//! Three independent tick counters, each drawing from its own RNG stream so
//! that e.g. a power-up roll never shifts the hazard sequence.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{SizeClass, hazard_spawn_interval, homing_spawn_interval, size_class_weights};
use super::entities::{Hazard, PowerUp, PowerUpKind};
use super::state::RngStreams;
use crate::consts::*;

/// Spawn timers (in ticks)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub hazard_timer: u32,
    pub homing_timer: u32,
    pub powerup_timer: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all three timers by one tick and spawn whatever is due.
    pub fn step(
        &mut self,
        difficulty: f32,
        homing_threshold: f32,
        rngs: &mut RngStreams,
        next_id: &mut u32,
        hazards: &mut Vec<Hazard>,
        powerups: &mut Vec<PowerUp>,
    ) {
        self.hazard_timer += 1;
        if self.hazard_timer >= hazard_spawn_interval(difficulty) {
            self.hazard_timer = 0;
            let (size_class, x, radius, speed) = roll_hazard(&mut rngs.hazard, difficulty);
            let hazard = Hazard::new(alloc_id(next_id), Vec2::new(x, 0.0), radius, speed, size_class);
            log::trace!("Spawned hazard {} {:?} r={} v={}", hazard.id, size_class, radius, speed);
            hazards.push(hazard);
        }

        if difficulty >= homing_threshold {
            self.homing_timer += 1;
            if self.homing_timer >= homing_spawn_interval(difficulty) {
                self.homing_timer = 0;
                let (size_class, x, radius, _) = roll_hazard(&mut rngs.homing, difficulty);
                let hazard = Hazard::new_homing(alloc_id(next_id), Vec2::new(x, 0.0), radius, size_class);
                log::debug!("Spawned homing hazard {} at x={}", hazard.id, x);
                hazards.push(hazard);
            }
        }

        self.powerup_timer += 1;
        if self.powerup_timer >= POWERUP_SPAWN_TICKS {
            self.powerup_timer = 0;
            if let Some((kind, x)) = roll_powerup(&mut rngs.powerup) {
                let powerup = PowerUp::new(alloc_id(next_id), kind, Vec2::new(x, 0.0));
                log::debug!("Spawned {:?} power-up {} at x={}", kind, powerup.id, x);
                powerups.push(powerup);
            }
        }
    }
}

fn alloc_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id = next_id.wrapping_add(1);
    id
}

/// Draw a size class from the difficulty-weighted distribution
pub fn roll_size_class(rng: &mut Pcg32, difficulty: f32) -> SizeClass {
    match WeightedIndex::new(size_class_weights(difficulty)) {
        Ok(dist) => SizeClass::ALL[dist.sample(rng)],
        // Unreachable for validated presets: the medium weight is a constant 0.2
        Err(err) => {
            log::warn!("Size-class weights rejected at difficulty {difficulty}: {err}");
            SizeClass::Medium
        }
    }
}

/// Roll a fresh hazard: size class, spawn x, radius and speed
fn roll_hazard(rng: &mut Pcg32, difficulty: f32) -> (SizeClass, f32, f32, f32) {
    let size_class = roll_size_class(rng, difficulty);
    let x = rng.random_range(0..=PLAYFIELD_WIDTH as u32) as f32;
    let (r_lo, r_hi) = size_class.radius_range();
    let (s_lo, s_hi) = size_class.speed_range();
    let radius = rng.random_range(r_lo..=r_hi) as f32;
    let speed = rng.random_range(s_lo..=s_hi) as f32;
    (size_class, x, radius, speed)
}

/// Roll whether a power-up appears, and if so its kind and spawn x
fn roll_powerup(rng: &mut Pcg32) -> Option<(PowerUpKind, f32)> {
    if !rng.random_bool(POWERUP_SPAWN_CHANCE) {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let x = rng.random_range(POWERUP_RADIUS..=PLAYFIELD_WIDTH - POWERUP_RADIUS);
    Some((kind, x))
}
