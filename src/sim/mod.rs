//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (one stream per concern)
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod entities;
pub mod skill;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, circles_overlap};
pub use difficulty::{SizeClass, difficulty, hazard_spawn_interval, homing_spawn_interval, size_class_weights};
pub use effects::{EffectSlot, EffectTable};
pub use entities::{Hazard, Motion, PowerUp, PowerUpKind};
pub use skill::SkillEstimator;
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, PlayerState, RenderSnapshot, RngStreams};
pub use tick::{TickInput, tick};
