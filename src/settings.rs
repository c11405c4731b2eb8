//! Game mode presets and host settings
//!
//! Mode presets are the only configuration the simulation core accepts.
//! `Settings` wraps them with the knobs the headless host needs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;
use crate::error::ConfigError;
use crate::sim::difficulty::SMALL_WEIGHT_ZERO_DIFFICULTY;

/// Named difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Normal,
    Hard,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "1" => Some(GameMode::Normal),
            "hard" | "2" => Some(GameMode::Hard),
            _ => None,
        }
    }

    /// Like `from_str`, but reports the rejected name
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::from_str(s.trim()).ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }

    /// Difficulty parameters for this preset
    pub fn params(&self) -> ModeParams {
        match self {
            GameMode::Normal => ModeParams {
                base_multiplier: 1.0,
                homing_threshold: 0.5,
                max_difficulty: 0.9,
                difficulty_time: 60.0,
            },
            GameMode::Hard => ModeParams {
                base_multiplier: 1.5,
                homing_threshold: 0.3,
                max_difficulty: 1.0,
                difficulty_time: 45.0,
            },
        }
    }
}

/// Parameters of the difficulty curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeParams {
    /// Scales the time-based difficulty
    pub base_multiplier: f32,
    /// Difficulty at which homing hazards start to appear
    pub homing_threshold: f32,
    /// Cap on the time-based difficulty component
    pub max_difficulty: f32,
    /// Seconds until the time-based component reaches its cap
    pub difficulty_time: f32,
}

impl ModeParams {
    /// Highest difficulty reachable with these parameters (time capped, skill maxed)
    pub fn peak_difficulty(&self) -> f32 {
        self.max_difficulty * self.base_multiplier * 1.2
    }

    /// Reject parameter sets that would break simulation invariants.
    ///
    /// Runs before a game starts; the tick loop never re-checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("base_multiplier", self.base_multiplier),
            ("max_difficulty", self.max_difficulty),
            ("difficulty_time", self.difficulty_time),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::param(
                    field,
                    format!("must be a positive finite number, got {value}"),
                ));
            }
        }

        if !self.homing_threshold.is_finite() || self.homing_threshold < 0.0 {
            return Err(ConfigError::param(
                "homing_threshold",
                format!("must be a non-negative finite number, got {}", self.homing_threshold),
            ));
        }

        let peak = self.peak_difficulty();
        if self.homing_threshold > peak {
            return Err(ConfigError::param(
                "homing_threshold",
                format!("{} is above the peak difficulty {peak}", self.homing_threshold),
            ));
        }

        // The small size-class weight must stay non-negative across the whole curve
        if peak > SMALL_WEIGHT_ZERO_DIFFICULTY {
            return Err(ConfigError::param(
                "max_difficulty",
                format!(
                    "peak difficulty {peak} drives the small hazard weight negative (limit {SMALL_WEIGHT_ZERO_DIFFICULTY})"
                ),
            ));
        }

        Ok(())
    }
}

/// Host settings for a headless run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preset
    pub mode: GameMode,
    /// Run seed (random when absent)
    pub seed: Option<u64>,
    /// Stop after this many ticks even if the player survives
    pub max_ticks: u64,
    /// Let the built-in autopilot drive the player
    pub idle_mode: bool,
    /// Emit a render snapshot every N ticks (0 = final frame only)
    pub snapshot_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Normal,
            seed: None,
            // Two minutes of play
            max_ticks: 120 * TICKS_PER_SECOND as u64,
            idle_mode: true,
            snapshot_interval: TICKS_PER_SECOND as u64,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mode.params().validate()?;
        if self.max_ticks == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "max_ticks",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
