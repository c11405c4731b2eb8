//! Hazard and power-up entities and their motion rules

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::SizeClass;
use crate::consts::*;
use crate::direction_to;

/// How a hazard moves each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Straight down
    Falling,
    /// Falls at full speed while drifting horizontally toward the player
    Homing,
    /// Knocked away by a reflect; travels along a fixed heading
    Deflected { heading: Vec2 },
}

/// A falling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick at time factor 1.0
    pub speed: f32,
    pub size_class: SizeClass,
    pub motion: Motion,
}

impl Hazard {
    pub fn new(id: u32, pos: Vec2, radius: f32, speed: f32, size_class: SizeClass) -> Self {
        Self {
            id,
            pos,
            radius,
            speed,
            size_class,
            motion: Motion::Falling,
        }
    }

    /// Homing hazards always move at speed 1
    pub fn new_homing(id: u32, pos: Vec2, radius: f32, size_class: SizeClass) -> Self {
        Self {
            id,
            pos,
            radius,
            speed: 1.0,
            size_class,
            motion: Motion::Homing,
        }
    }

    pub fn is_homing(&self) -> bool {
        matches!(self.motion, Motion::Homing)
    }

    /// Advance one tick.
    ///
    /// Homing steers only the x component; y always advances by the full
    /// `speed * time_factor`.
    pub fn advance(&mut self, player_pos: Vec2, time_factor: f32) {
        let step = self.speed * time_factor;
        match self.motion {
            Motion::Falling => {
                self.pos.y += step;
            }
            Motion::Homing => {
                let dir = direction_to(self.pos, player_pos);
                self.pos.x += dir.x * step;
                self.pos.y += step;
            }
            Motion::Deflected { heading } => {
                self.pos += heading * step;
            }
        }
    }

    /// Push the hazard clear of the player and send it away at `speed`.
    ///
    /// The hazard lands `player_radius + radius + REFLECT_GAP` from the player
    /// centre along its original bearing, or straight above the player when
    /// the centres coincide.
    pub fn reflect_from(&mut self, player_pos: Vec2, player_radius: f32, speed: f32) {
        let heading = (self.pos - player_pos).try_normalize().unwrap_or(Vec2::NEG_Y);
        self.pos = player_pos + heading * (player_radius + self.radius + REFLECT_GAP);
        self.speed = speed;
        self.motion = Motion::Deflected { heading };
    }

    pub fn is_out_of_bounds(&self) -> bool {
        crate::out_of_bounds(self.pos, self.radius)
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincible,
    Slow,
    Reflect,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Invincible,
        PowerUpKind::Slow,
        PowerUpKind::Reflect,
        PowerUpKind::SpeedBoost,
    ];

    /// Stable slot in the effect table
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PowerUpKind::Invincible => 0,
            PowerUpKind::Slow => 1,
            PowerUpKind::Reflect => 2,
            PowerUpKind::SpeedBoost => 3,
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Still collectible (cleared on pickup)
    pub active: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWERUP_RADIUS,
            active: true,
        }
    }

    /// Power-ups ignore Slow
    pub fn advance(&mut self) {
        self.pos.y += POWERUP_FALL_SPEED;
    }

    pub fn is_out_of_bounds(&self) -> bool {
        crate::out_of_bounds(self.pos, self.radius)
    }
}
