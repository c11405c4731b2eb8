//! Ball Dodge - A falling-hazard survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, spawning, movement, collisions)
//! - `settings`: Mode presets and host configuration
//! - `error`: Configuration-time error types
//!
//! Rendering, audio playback and input capture are host concerns; the
//! simulation consumes a player position per tick and emits snapshots and
//! [`sim::GameEvent`]s.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{GameMode, ModeParams, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions (origin top-left, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player avatar radius
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Power-up pickup radius
    pub const POWERUP_RADIUS: f32 = 15.0;
    /// Power-up fall speed (pixels per tick)
    pub const POWERUP_FALL_SPEED: f32 = 2.0;

    /// Points awarded per elapsed second of survival
    pub const SCORE_PER_SECOND: u64 = 10;
    /// Bonus for destroying a hazard while invincible
    pub const INVINCIBLE_KILL_BONUS: u64 = 25;
    /// Bonus for collecting a power-up
    pub const POWERUP_PICKUP_BONUS: u64 = 50;

    /// Duration of a power-up effect in seconds
    pub const EFFECT_DURATION: f32 = 5.0;
    /// Hazard time factor while Slow is active
    pub const SLOW_TIME_FACTOR: f32 = 0.5;

    /// Gap left between player and hazard after a reflect
    pub const REFLECT_GAP: f32 = 5.0;
    /// Outward speed range assigned to a reflected hazard
    pub const REFLECT_MIN_SPEED: f32 = 5.0;
    pub const REFLECT_MAX_SPEED: f32 = 8.0;

    /// Near-miss sampling cadence (half a second at 60 Hz)
    pub const NEAR_MISS_INTERVAL_TICKS: u32 = 30;
    /// Buffer beyond the collision distance that still counts as a near miss
    pub const NEAR_MISS_BUFFER: f32 = 30.0;
    /// Near misses needed per skill step
    pub const NEAR_MISSES_PER_STEP: u32 = 5;
    /// Skill gained per step
    pub const SKILL_STEP: f32 = 0.05;
    /// Skill at the start of a run (skill factor of exactly 1.0)
    pub const INITIAL_SKILL: f32 = 0.5;

    /// Power-up spawn cadence in ticks (~5 seconds)
    pub const POWERUP_SPAWN_TICKS: u32 = 300;
    /// Chance a power-up actually appears when its timer fires
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.7;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` toward `to`.
///
/// The distance is floored at 1 so coincident points yield a short vector
/// instead of a division by zero.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    delta / delta.length().max(1.0)
}

/// Whether a circle at `pos` with `radius` has left the playfield entirely
#[inline]
pub fn out_of_bounds(pos: Vec2, radius: f32) -> bool {
    use consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    pos.y > PLAYFIELD_HEIGHT + radius
        || pos.y < -radius
        || pos.x < -radius
        || pos.x > PLAYFIELD_WIDTH + radius
}

/// Clamp a point into the playfield rectangle
#[inline]
pub fn clamp_to_playfield(pos: Vec2) -> Vec2 {
    use consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    pos.clamp(Vec2::ZERO, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_floors_distance() {
        let dir = direction_to(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        assert_eq!(dir, Vec2::ZERO);

        // Sub-unit distances are not normalized up to length 1
        let dir = direction_to(Vec2::ZERO, Vec2::new(0.5, 0.0));
        assert!((dir.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_direction_to_is_unit_when_far() {
        let dir = direction_to(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_bounds_uses_radius_margin() {
        assert!(!out_of_bounds(Vec2::new(-9.0, 300.0), 10.0));
        assert!(out_of_bounds(Vec2::new(-11.0, 300.0), 10.0));
        assert!(!out_of_bounds(Vec2::new(400.0, 609.0), 10.0));
        assert!(out_of_bounds(Vec2::new(400.0, 611.0), 10.0));
        assert!(out_of_bounds(Vec2::new(811.0, 0.0), 10.0));
    }

    #[test]
    fn test_clamp_to_playfield() {
        let p = clamp_to_playfield(Vec2::new(-5.0, 900.0));
        assert_eq!(p, Vec2::new(0.0, consts::PLAYFIELD_HEIGHT));
    }
}
