//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Step order
//! within a tick is fixed:
//!
//! 1. advance time, recompute difficulty
//! 2. score accrual
//! 3. ingest the player position
//! 4. near-miss sample (every half second)
//! 5. spawn
//! 6. move hazards and power-ups
//! 7. resolve collisions
//! 8. prune off-screen and consumed entities
//! 9. expire power-up effects

use glam::Vec2;

use super::collision;
use super::difficulty::difficulty;
use super::state::{GamePhase, GameState};
use crate::clamp_to_playfield;
use crate::consts::*;

/// Slack for f32 time accumulation when awarding whole seconds
const TIME_EPSILON: f32 = 1e-3;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player position sampled by the host (None keeps the last position)
    pub player_pos: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot drives the player
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at {:.1}s", state.elapsed);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    let target = if input.idle_mode {
        Some(autopilot_target(state))
    } else {
        input.player_pos
    };

    // (1) Clock and difficulty
    state.time_ticks += 1;
    state.elapsed += dt;
    state.difficulty = difficulty(state.elapsed, &state.params, state.player.skill);

    // (2) Survival score
    state.score_timer += dt;
    while state.score_timer >= 1.0 - TIME_EPSILON {
        state.score_timer -= 1.0;
        state.score += SCORE_PER_SECOND;
    }

    // (3) Player position
    if let Some(pos) = target {
        state.player.pos = clamp_to_playfield(pos);
    }

    // (4) Near misses feed skill, which feeds difficulty next tick
    if state.skill.on_tick() {
        let found = state.skill.sample(&mut state.player, &state.hazards);
        if found > 0 {
            log::trace!("{} near misses at tick {}", found, state.time_ticks);
        }
    }

    // (5) Spawning
    state.spawner.step(
        state.difficulty,
        state.params.homing_threshold,
        &mut state.rngs,
        &mut state.next_id,
        &mut state.hazards,
        &mut state.powerups,
    );

    // (6) Movement
    let time_factor = state.effects.time_factor();
    let player_pos = state.player.pos;
    for hazard in &mut state.hazards {
        hazard.advance(player_pos, time_factor);
    }
    for powerup in &mut state.powerups {
        powerup.advance();
    }

    // (7) Collisions
    collision::resolve(state);

    // (8) Prune
    state.hazards.retain(|h| !h.is_out_of_bounds());
    state.powerups.retain(|p| p.active && !p.is_out_of_bounds());

    // (9) Effect expiry
    for kind in state.effects.expire(state.elapsed) {
        log::debug!("{:?} expired at {:.1}s", kind, state.elapsed);
    }
}

/// Radius inside which the autopilot reacts to a hazard
const AUTOPILOT_THREAT_RADIUS: f32 = 160.0;
/// Maximum autopilot movement per tick
const AUTOPILOT_MAX_STEP: f32 = 9.0;

/// Pick where the demo autopilot wants the player to be this tick.
///
/// Pushes away from nearby hazards (weighted by closeness), otherwise drifts
/// toward the nearest power-up or back to the middle of the playfield.
fn autopilot_target(state: &GameState) -> Vec2 {
    let player = state.player.pos;
    let invincible = state
        .effects
        .is_active(super::entities::PowerUpKind::Invincible);

    let mut push = Vec2::ZERO;
    if !invincible {
        for hazard in &state.hazards {
            let clearance = crate::distance(player, hazard.pos) - hazard.radius - state.player.radius;
            if clearance < AUTOPILOT_THREAT_RADIUS {
                let away = (player - hazard.pos).normalize_or_zero();
                let weight = 1.0 - clearance.max(0.0) / AUTOPILOT_THREAT_RADIUS;
                // Hazards still above the player matter most
                let ahead = if hazard.pos.y < player.y { 1.5 } else { 0.5 };
                push += away * weight * weight * ahead;
            }
        }
    }

    let goal = if push.length_squared() > 1e-6 {
        player + push.normalize() * AUTOPILOT_MAX_STEP
    } else {
        let nearest_powerup = state
            .powerups
            .iter()
            .filter(|p| p.active)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .partial_cmp(&b.pos.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| p.pos);
        let home = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT * 0.75);
        let toward = nearest_powerup.unwrap_or(home) - player;
        player + toward.clamp_length_max(AUTOPILOT_MAX_STEP)
    };

    clamp_to_playfield(goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameMode;
    use crate::sim::GameEvent;
    use crate::sim::difficulty::SizeClass;
    use crate::sim::entities::{Hazard, PowerUp, PowerUpKind};
    use proptest::prelude::*;

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_score_accrues_per_second() {
        let mut state = GameState::new(1, GameMode::Normal);
        // Keep the player clear of everything
        state.player.pos = Vec2::new(400.0, 590.0);
        for _ in 0..59 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.score, 0);
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.score, SCORE_PER_SECOND);
        assert_eq!(state.time_ticks, 60);
    }

    #[test]
    fn test_player_signal_is_clamped() {
        let mut state = GameState::new(1, GameMode::Normal);
        let input = TickInput {
            player_pos: Some(Vec2::new(-50.0, 1000.0)),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.pos, Vec2::new(0.0, PLAYFIELD_HEIGHT));

        // No signal keeps the last position
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.player.pos, Vec2::new(0.0, PLAYFIELD_HEIGHT));
    }

    #[test]
    fn test_pause_freezes_state() {
        let mut state = GameState::new(1, GameMode::Normal);
        tick(&mut state, &idle(), SIM_DT);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let ticks = state.time_ticks;
        for _ in 0..100 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.time_ticks, ticks);

        // Unpause resumes in the same tick
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_difficulty_tracks_elapsed_time() {
        let mut state = GameState::new(1, GameMode::Normal);
        state.player.pos = Vec2::new(400.0, 590.0);
        state.elapsed = 30.0 - SIM_DT;
        tick(&mut state, &idle(), SIM_DT);
        assert!((state.difficulty - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_collision_ends_game_and_emits_event() {
        let mut state = GameState::new(1, GameMode::Normal);
        let id = state.next_entity_id();
        let player = state.player.pos;
        state.hazards.push(Hazard::new(
            id,
            player - Vec2::new(0.0, 20.0),
            20.0,
            3.0,
            SizeClass::Small,
        ));
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.is_game_over());
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerDestroyed]);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut state = GameState::new(1, GameMode::Hard);
        for _ in 0..200 {
            tick(&mut state, &idle(), SIM_DT);
        }
        state.phase = GamePhase::GameOver;
        tick(&mut state, &idle(), SIM_DT);
        let score = state.score;
        let hazards = state.hazards.len();
        let timers = (
            state.spawner.hazard_timer,
            state.spawner.homing_timer,
            state.spawner.powerup_timer,
        );
        let near_misses = state.skill.near_misses;

        for _ in 0..500 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.score, score);
        assert_eq!(state.hazards.len(), hazards);
        assert_eq!(
            (
                state.spawner.hazard_timer,
                state.spawner.homing_timer,
                state.spawner.powerup_timer
            ),
            timers
        );
        assert_eq!(state.skill.near_misses, near_misses);
    }

    #[test]
    fn test_slow_halves_hazard_speed() {
        let mut state = GameState::new(1, GameMode::Normal);
        state.player.pos = Vec2::new(50.0, 590.0);
        state.effects.activate(PowerUpKind::Slow, 0.0);
        let id = state.next_entity_id();
        state
            .hazards
            .push(Hazard::new(id, Vec2::new(700.0, 100.0), 20.0, 4.0, SizeClass::Small));
        tick(&mut state, &idle(), SIM_DT);
        let hazard = state.hazards.iter().find(|h| h.id == id).unwrap();
        assert_eq!(hazard.pos.y, 102.0);
    }

    #[test]
    fn test_effect_expires_after_five_seconds() {
        let mut state = GameState::new(1, GameMode::Normal);
        state.player.pos = Vec2::new(400.0, 590.0);
        let id = state.next_entity_id();
        state.powerups.push(PowerUp::new(
            id,
            PowerUpKind::SpeedBoost,
            Vec2::new(400.0, 580.0),
        ));
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.effects.is_active(PowerUpKind::SpeedBoost));
        assert!(state.powerups.is_empty(), "consumed power-up is pruned");

        let expiry = state.effects.slot(PowerUpKind::SpeedBoost).expiry;
        while state.elapsed <= expiry {
            assert!(state.effects.is_active(PowerUpKind::SpeedBoost));
            state.player.pos = Vec2::new(400.0, 590.0);
            state.hazards.clear();
            tick(&mut state, &idle(), SIM_DT);
        }
        assert!(!state.effects.is_active(PowerUpKind::SpeedBoost));
    }

    #[test]
    fn test_offscreen_entities_are_pruned() {
        let mut state = GameState::new(1, GameMode::Normal);
        state.player.pos = Vec2::new(50.0, 50.0);
        let id = state.next_entity_id();
        state.hazards.push(Hazard::new(
            id,
            Vec2::new(700.0, PLAYFIELD_HEIGHT + 19.0),
            20.0,
            3.0,
            SizeClass::Small,
        ));
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.hazards.iter().all(|h| h.id != id));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, GameMode::Hard);
        let mut b = GameState::new(99999, GameMode::Hard);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.hazards.len(), b.hazards.len());
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.skill, b.player.skill);
    }

    #[test]
    fn test_autopilot_steps_away_from_hazard_above() {
        let mut state = GameState::new(1, GameMode::Normal);
        state.player.pos = Vec2::new(400.0, 300.0);
        let id = state.next_entity_id();
        state
            .hazards
            .push(Hazard::new(id, Vec2::new(420.0, 230.0), 20.0, 3.0, SizeClass::Small));

        let hazard_pos = Vec2::new(420.0, 230.0);
        let target = autopilot_target(&state);
        assert!(target.distance(hazard_pos) > state.player.pos.distance(hazard_pos));
        assert!(target.distance(state.player.pos) <= AUTOPILOT_MAX_STEP + 1e-3);
        assert!(target.x < 400.0);
    }

    #[test]
    fn test_autopilot_heads_for_powerup_when_safe() {
        let mut state = GameState::new(1, GameMode::Normal);
        state.player.pos = Vec2::new(400.0, 300.0);
        state
            .powerups
            .push(PowerUp::new(1, PowerUpKind::Slow, Vec2::new(400.0, 200.0)));
        let target = autopilot_target(&state);
        assert!(target.distance(Vec2::new(400.0, 300.0 - AUTOPILOT_MAX_STEP)) < 1e-3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_terminal_ticks_are_idempotent(seed in any::<u64>(), warmup in 0u32..600, extra in 1u32..50) {
            let mut state = GameState::new(seed, GameMode::Hard);
            let input = TickInput { idle_mode: true, ..Default::default() };
            for _ in 0..warmup {
                tick(&mut state, &input, SIM_DT);
            }
            state.phase = GamePhase::GameOver;

            tick(&mut state, &input, SIM_DT);
            let once = (state.score, state.hazards.len(), state.powerups.len(), state.skill.near_misses);
            for _ in 0..extra {
                tick(&mut state, &input, SIM_DT);
            }
            let many = (state.score, state.hazards.len(), state.powerups.len(), state.skill.near_misses);
            prop_assert_eq!(once, many);
        }

        #[test]
        fn prop_score_never_decreases(seed in any::<u64>()) {
            let mut state = GameState::new(seed, GameMode::Normal);
            let input = TickInput { idle_mode: true, ..Default::default() };
            let mut last = 0;
            for _ in 0..900 {
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
