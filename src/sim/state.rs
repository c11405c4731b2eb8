//! Game state and core simulation types
//!
//! Everything a run needs to continue deterministically lives here,
//! including the RNG streams.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::EffectTable;
use super::entities::{Hazard, PowerUp, PowerUpKind};
use super::skill::SkillEstimator;
use super::spawner::Spawner;
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::{GameMode, ModeParams};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Events for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    HazardDestroyedByInvincibility,
    PowerUpCollected(PowerUpKind),
    PlayerDestroyed,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub radius: f32,
    /// Adaptive skill estimate in [0, 1]
    pub skill: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0),
            radius: PLAYER_RADIUS,
            skill: INITIAL_SKILL,
        }
    }
}

/// Independent gameplay RNG streams, all derived from the run seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngStreams {
    pub hazard: Pcg32,
    pub homing: Pcg32,
    pub powerup: Pcg32,
    pub reflect: Pcg32,
}

impl RngStreams {
    const HAZARD_STREAM: u64 = 1;
    const HOMING_STREAM: u64 = 2;
    const POWERUP_STREAM: u64 = 3;
    const REFLECT_STREAM: u64 = 4;

    pub fn new(seed: u64) -> Self {
        Self {
            hazard: Pcg32::new(seed, Self::HAZARD_STREAM),
            homing: Pcg32::new(seed, Self::HOMING_STREAM),
            powerup: Pcg32::new(seed, Self::POWERUP_STREAM),
            reflect: Pcg32::new(seed, Self::REFLECT_STREAM),
        }
    }

    /// Streams seeded individually (for tests that pin one stream)
    pub fn from_seeds(hazard: u64, homing: u64, powerup: u64, reflect: u64) -> Self {
        Self {
            hazard: Pcg32::seed_from_u64(hazard),
            homing: Pcg32::seed_from_u64(homing),
            powerup: Pcg32::seed_from_u64(powerup),
            reflect: Pcg32::seed_from_u64(reflect),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Preset this run was started with (None for custom parameters)
    pub mode: Option<GameMode>,
    /// Difficulty curve parameters
    pub params: ModeParams,
    /// Gameplay RNG streams
    pub rngs: RngStreams,
    /// Score (never decreases)
    pub score: u64,
    /// Simulated seconds since the run started
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Difficulty computed at the start of the latest tick
    pub difficulty: f32,
    /// Fractional second carried toward the next score award
    pub score_timer: f32,
    /// Current phase
    pub phase: GamePhase,
    pub player: PlayerState,
    /// Live hazards, in spawn order
    pub hazards: Vec<Hazard>,
    /// Live power-ups, in spawn order
    pub powerups: Vec<PowerUp>,
    pub effects: EffectTable,
    pub spawner: Spawner,
    pub skill: SkillEstimator,
    /// Events not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    pub(crate) next_id: u32,
}

impl GameState {
    /// Create a new game with a built-in preset
    pub fn new(seed: u64, mode: GameMode) -> Self {
        let mut state = Self::build(seed, mode.params());
        state.mode = Some(mode);
        log::info!("New {} game (seed {})", mode.as_str(), seed);
        state
    }

    /// Create a new game with custom curve parameters, rejecting invalid ones
    pub fn with_params(seed: u64, params: ModeParams) -> Result<Self, ConfigError> {
        params.validate()?;
        log::info!("New custom game (seed {}): {:?}", seed, params);
        Ok(Self::build(seed, params))
    }

    fn build(seed: u64, params: ModeParams) -> Self {
        Self {
            seed,
            mode: None,
            params,
            rngs: RngStreams::new(seed),
            score: 0,
            elapsed: 0.0,
            time_ticks: 0,
            difficulty: 0.0,
            score_timer: 0.0,
            phase: GamePhase::Playing,
            player: PlayerState::default(),
            hazards: Vec::new(),
            powerups: Vec::new(),
            effects: EffectTable::new(),
            spawner: Spawner::new(),
            skill: SkillEstimator::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Full reset with the same mode parameters and a new seed
    pub fn restart(&mut self, seed: u64) {
        let mode = self.mode;
        *self = Self::build(seed, self.params);
        self.mode = mode;
        log::info!("Restarted (seed {})", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the rendering collaborator
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            tick: self.time_ticks,
            elapsed: self.elapsed,
            score: self.score,
            difficulty: self.difficulty,
            phase: self.phase,
            game_over: self.is_game_over(),
            player: &self.player,
            hazards: &self.hazards,
            powerups: &self.powerups,
            effects: &self.effects,
        }
    }
}

/// Borrowed per-tick view of the state for rendering
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub tick: u64,
    pub elapsed: f32,
    pub score: u64,
    pub difficulty: f32,
    pub phase: GamePhase,
    pub game_over: bool,
    pub player: &'a PlayerState,
    pub hazards: &'a [Hazard],
    pub powerups: &'a [PowerUp],
    pub effects: &'a EffectTable,
}
