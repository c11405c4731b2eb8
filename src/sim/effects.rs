//! Timed power-up effects
//!
//! Each kind is independently `Inactive -> Active -> Inactive`. Picking up a
//! kind that is already active refreshes its expiry instead of stacking.

use serde::{Deserialize, Serialize};

use super::entities::PowerUpKind;
use crate::consts::{EFFECT_DURATION, SLOW_TIME_FACTOR};

/// State of a single effect slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectSlot {
    pub active: bool,
    /// Elapsed-time second at which the effect lapses
    pub expiry: f32,
}

/// One slot per power-up kind, always all four
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTable {
    slots: [EffectSlot; 4],
}

impl EffectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, kind: PowerUpKind) -> EffectSlot {
        self.slots[kind.index()]
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.slots[kind.index()].active
    }

    /// Activate `kind` until `now + EFFECT_DURATION`, overwriting any prior expiry
    pub fn activate(&mut self, kind: PowerUpKind, now: f32) {
        self.slots[kind.index()] = EffectSlot {
            active: true,
            expiry: now + EFFECT_DURATION,
        };
    }

    /// Deactivate every effect whose expiry has passed; returns the kinds that lapsed
    pub fn expire(&mut self, now: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = &mut self.slots[kind.index()];
            if slot.active && now > slot.expiry {
                slot.active = false;
                expired.push(kind);
            }
        }
        expired
    }

    /// Multiplier applied to hazard movement
    pub fn time_factor(&self) -> f32 {
        if self.is_active(PowerUpKind::Slow) {
            SLOW_TIME_FACTOR
        } else {
            1.0
        }
    }

    /// Iterate `(kind, slot)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, EffectSlot)> + '_ {
        PowerUpKind::ALL.into_iter().map(|kind| (kind, self.slot(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let table = EffectTable::new();
        assert!(table.iter().all(|(_, slot)| !slot.active));
        assert_eq!(table.time_factor(), 1.0);
    }

    #[test]
    fn test_activate_and_expire() {
        let mut table = EffectTable::new();
        table.activate(PowerUpKind::Invincible, 10.0);
        assert!(table.is_active(PowerUpKind::Invincible));
        assert_eq!(table.slot(PowerUpKind::Invincible).expiry, 15.0);

        // Expiry is strict: still active exactly at the deadline
        assert!(table.expire(15.0).is_empty());
        assert!(table.is_active(PowerUpKind::Invincible));

        assert_eq!(table.expire(15.01), vec![PowerUpKind::Invincible]);
        assert!(!table.is_active(PowerUpKind::Invincible));
    }

    #[test]
    fn test_repickup_refreshes_without_stacking() {
        let mut table = EffectTable::new();
        table.activate(PowerUpKind::Reflect, 1.0);
        table.activate(PowerUpKind::Reflect, 3.0);
        assert_eq!(table.slot(PowerUpKind::Reflect).expiry, 8.0);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut table = EffectTable::new();
        table.activate(PowerUpKind::Slow, 0.0);
        table.activate(PowerUpKind::SpeedBoost, 2.0);
        assert_eq!(table.time_factor(), SLOW_TIME_FACTOR);

        assert_eq!(table.expire(5.5), vec![PowerUpKind::Slow]);
        assert!(table.is_active(PowerUpKind::SpeedBoost));
        assert_eq!(table.time_factor(), 1.0);
    }
}
