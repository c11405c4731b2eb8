//! Collision detection and interaction outcomes
//!
//! Player vs hazard contacts branch on the active effects (Invincible first,
//! then Reflect, otherwise the run ends). Player vs power-up contacts collect
//! the power-up.

use glam::Vec2;
use rand::Rng;

use super::entities::PowerUpKind;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// What the resolver did this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Hazards destroyed by invincibility
    pub destroyed: u32,
    /// Hazards knocked away by reflect
    pub reflected: u32,
    /// The player was hit without protection
    pub fatal: bool,
    /// Power-ups picked up
    pub collected: Vec<PowerUpKind>,
}

/// Strict overlap test between two circles
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    crate::distance(a, b) < ra + rb
}

/// Resolve player contacts with hazards, then with power-ups.
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    resolve_hazards(state, &mut report);
    if !report.fatal {
        resolve_pickups(state, &mut report);
    }
    report
}

fn resolve_hazards(state: &mut GameState, report: &mut CollisionReport) {
    if state.is_game_over() {
        return;
    }

    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let invincible = state.effects.is_active(PowerUpKind::Invincible);
    let reflect = state.effects.is_active(PowerUpKind::Reflect);

    let mut i = 0;
    while i < state.hazards.len() {
        let hazard = &state.hazards[i];
        if !circles_overlap(player_pos, player_radius, hazard.pos, hazard.radius) {
            i += 1;
            continue;
        }

        if invincible {
            let hazard = state.hazards.remove(i);
            state.score += INVINCIBLE_KILL_BONUS;
            state.events.push(GameEvent::HazardDestroyedByInvincibility);
            report.destroyed += 1;
            log::debug!("Hazard {} destroyed by invincibility", hazard.id);
            continue;
        }

        if reflect {
            let speed = state
                .rngs
                .reflect
                .random_range(REFLECT_MIN_SPEED..=REFLECT_MAX_SPEED);
            let hazard = &mut state.hazards[i];
            hazard.reflect_from(player_pos, player_radius, speed);
            report.reflected += 1;
            log::debug!("Hazard {} reflected at speed {:.1}", hazard.id, speed);
            i += 1;
            continue;
        }

        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDestroyed);
        report.fatal = true;
        log::info!(
            "Player hit by hazard {} at {:.1}s, final score {}",
            hazard.id,
            state.elapsed,
            state.score
        );
        return;
    }
}

fn resolve_pickups(state: &mut GameState, report: &mut CollisionReport) {
    if state.is_game_over() {
        return;
    }

    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let now = state.elapsed;

    for powerup in state.powerups.iter_mut().filter(|p| p.active) {
        if !circles_overlap(player_pos, player_radius, powerup.pos, powerup.radius) {
            continue;
        }
        powerup.active = false;
        state.effects.activate(powerup.kind, now);
        state.score += POWERUP_PICKUP_BONUS;
        state.events.push(GameEvent::PowerUpCollected(powerup.kind));
        report.collected.push(powerup.kind);
        log::debug!("Collected {:?} (expires at {:.1}s)", powerup.kind, now + EFFECT_DURATION);
    }
}
