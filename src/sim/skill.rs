//! Near-miss based skill estimation
//!
//! Sampled on a half-second cadence. A hazard that is close but not touching
//! counts as a near miss; every fifth near miss nudges skill upward.

use serde::{Deserialize, Serialize};

use super::entities::Hazard;
use super::state::PlayerState;
use crate::consts::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillEstimator {
    /// Total near misses this run
    pub near_misses: u32,
    /// Ticks since the last sample
    ticks_since_sample: u32,
}

impl SkillEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one tick; true when a sample is due
    pub fn on_tick(&mut self) -> bool {
        self.ticks_since_sample += 1;
        if self.ticks_since_sample >= NEAR_MISS_INTERVAL_TICKS {
            self.ticks_since_sample = 0;
            true
        } else {
            false
        }
    }

    /// Record near misses against the current hazards and update `player.skill`.
    ///
    /// Returns the number of near misses found in this sample.
    pub fn sample(&mut self, player: &mut PlayerState, hazards: &[Hazard]) -> u32 {
        let mut found = 0;
        for hazard in hazards {
            let contact = player.radius + hazard.radius;
            let dist = crate::distance(player.pos, hazard.pos);
            if dist > contact && dist < contact + NEAR_MISS_BUFFER {
                found += 1;
                self.near_misses += 1;
                if self.near_misses.is_multiple_of(NEAR_MISSES_PER_STEP) {
                    let before = player.skill;
                    player.skill = (player.skill + SKILL_STEP).min(1.0);
                    log::debug!(
                        "Skill {:.2} -> {:.2} after {} near misses",
                        before,
                        player.skill,
                        self.near_misses
                    );
                }
            }
        }
        found
    }
}
