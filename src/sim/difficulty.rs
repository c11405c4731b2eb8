//! Difficulty curve and the spawn parameters derived from it
//!
//! Everything here is a pure function of elapsed time, mode parameters and
//! player skill, recomputed every tick.

use serde::{Deserialize, Serialize};

use crate::settings::ModeParams;

/// Difficulty at which the small size-class weight `0.7 - 0.3d` reaches zero
pub const SMALL_WEIGHT_ZERO_DIFFICULTY: f32 = 0.7 / 0.3;

/// Fastest/slowest regular hazard spawn interval in ticks
pub const HAZARD_SPAWN_MIN_TICKS: u32 = 10;
pub const HAZARD_SPAWN_MAX_TICKS: u32 = 30;
/// Fastest/slowest homing hazard spawn interval in ticks
pub const HOMING_SPAWN_MIN_TICKS: u32 = 90;
pub const HOMING_SPAWN_MAX_TICKS: u32 = 180;

/// Hazard size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Inclusive radius range
    pub fn radius_range(&self) -> (u32, u32) {
        match self {
            SizeClass::Small => (10, 20),
            SizeClass::Medium => (21, 35),
            SizeClass::Large => (36, 50),
        }
    }

    /// Inclusive speed range (pixels per tick)
    pub fn speed_range(&self) -> (u32, u32) {
        match self {
            SizeClass::Small => (3, 5),
            SizeClass::Medium => (2, 4),
            SizeClass::Large => (1, 3),
        }
    }
}

/// Combined difficulty for the current tick
///
/// `min(max_difficulty, elapsed / difficulty_time) * base_multiplier * (0.8 + 0.4 * skill)`
pub fn difficulty(elapsed: f32, params: &ModeParams, skill: f32) -> f32 {
    let time_difficulty = (elapsed / params.difficulty_time).min(params.max_difficulty);
    time_difficulty * params.base_multiplier * (0.8 + skill * 0.4)
}

/// Ticks between regular hazard spawns
pub fn hazard_spawn_interval(difficulty: f32) -> u32 {
    spawn_interval(difficulty, 20.0, HAZARD_SPAWN_MAX_TICKS, HAZARD_SPAWN_MIN_TICKS)
}

/// Ticks between homing hazard spawns
pub fn homing_spawn_interval(difficulty: f32) -> u32 {
    spawn_interval(difficulty, 60.0, HOMING_SPAWN_MAX_TICKS, HOMING_SPAWN_MIN_TICKS)
}

/// `max(base - floor(difficulty * scale), floor)`
fn spawn_interval(difficulty: f32, scale: f32, base: u32, floor: u32) -> u32 {
    let reduction = (difficulty * scale).floor().max(0.0) as u32;
    base.saturating_sub(reduction).max(floor)
}

/// Size-class weights `[small, medium, large]`, clamped non-negative
pub fn size_class_weights(difficulty: f32) -> [f32; 3] {
    [
        (0.7 - 0.3 * difficulty).max(0.0),
        0.2,
        (0.1 + 0.3 * difficulty).max(0.0),
    ]
}
