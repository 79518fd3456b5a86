//! Power-up engine - per-kind availability, cost and cooldown state.
//!
//! Each kind runs the same machine: Available -> (use) -> OnCooldown ->
//! (tick to 0) -> Available. The bank owns checks and cooldowns; the session
//! applies the kind-specific state mutation and returns the effect
//! descriptor.

use tracing::debug;
use tui_simon_types::{PowerupKind, COOLDOWN_TICK_MS, POWERUP_KINDS};

use crate::error::PowerupDenied;

/// Cooldown/cost table: (kind, max cooldown seconds, cost points)
const POWERUP_TABLE: [(PowerupKind, u32, u32); 6] = [
    (PowerupKind::Slow, 5, 100),
    (PowerupKind::Skip, 3, 150),
    (PowerupKind::Hint, 4, 50),
    (PowerupKind::Shield, 8, 200),
    (PowerupKind::Double, 10, 300),
    (PowerupKind::Reveal, 12, 250),
];

/// Per-kind power-up state
///
/// Invariant: `available` iff `cooldown_remaining == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerupSlot {
    pub available: bool,
    /// Seconds until available again
    pub cooldown_remaining: u32,
    pub max_cooldown: u32,
    pub cost: u32,
}

impl PowerupSlot {
    fn new(max_cooldown: u32, cost: u32) -> Self {
        Self {
            available: true,
            cooldown_remaining: 0,
            max_cooldown,
            cost,
        }
    }
}

/// The six independent power-up slots plus the shared cooldown clock
#[derive(Debug, Clone)]
pub struct PowerupBank {
    slots: [PowerupSlot; 6],
    tick_accum_ms: u32,
}

impl PowerupBank {
    pub fn new() -> Self {
        let mut slots = [PowerupSlot::new(0, 0); 6];
        for (kind, max_cooldown, cost) in POWERUP_TABLE {
            slots[kind.index()] = PowerupSlot::new(max_cooldown, cost);
        }
        Self {
            slots,
            tick_accum_ms: 0,
        }
    }

    pub fn slot(&self, kind: PowerupKind) -> &PowerupSlot {
        &self.slots[kind.index()]
    }

    /// Authorize a use and arm the cooldown
    ///
    /// Checks session activity, slot availability and affordability, in that
    /// order, mutating nothing on denial. On success the slot goes on
    /// cooldown and the cost to deduct is returned.
    pub fn begin_use(
        &mut self,
        kind: PowerupKind,
        score: u32,
        session_active: bool,
    ) -> Result<u32, PowerupDenied> {
        if !session_active {
            return Err(PowerupDenied::SessionInactive);
        }

        let slot = &self.slots[kind.index()];
        if slot.cooldown_remaining > 0 {
            return Err(PowerupDenied::OnCooldown);
        }
        if !slot.available {
            return Err(PowerupDenied::NotAvailable);
        }
        if score < slot.cost {
            return Err(PowerupDenied::InsufficientScore);
        }

        let slot = &mut self.slots[kind.index()];
        slot.available = false;
        slot.cooldown_remaining = slot.max_cooldown;
        debug!(kind = kind.as_str(), cost = slot.cost, "power-up used");
        Ok(slot.cost)
    }

    /// Advance the cooldown clock
    ///
    /// Cooldowns decrement once per wall-clock second, independently per
    /// kind. The caller gates this on pause state.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.tick_accum_ms += elapsed_ms;
        while self.tick_accum_ms >= COOLDOWN_TICK_MS {
            self.tick_accum_ms -= COOLDOWN_TICK_MS;
            for kind in POWERUP_KINDS {
                let slot = &mut self.slots[kind.index()];
                if slot.cooldown_remaining > 0 {
                    slot.cooldown_remaining -= 1;
                    if slot.cooldown_remaining == 0 {
                        slot.available = true;
                        debug!(kind = kind.as_str(), "power-up available again");
                    }
                }
            }
        }
    }

    /// Restore every slot to available (session reset)
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.available = true;
            slot.cooldown_remaining = 0;
        }
        self.tick_accum_ms = 0;
    }
}

impl Default for PowerupBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let bank = PowerupBank::new();
        assert_eq!(bank.slot(PowerupKind::Slow).cost, 100);
        assert_eq!(bank.slot(PowerupKind::Slow).max_cooldown, 5);
        assert_eq!(bank.slot(PowerupKind::Skip).cost, 150);
        assert_eq!(bank.slot(PowerupKind::Hint).cost, 50);
        assert_eq!(bank.slot(PowerupKind::Shield).cost, 200);
        assert_eq!(bank.slot(PowerupKind::Double).cost, 300);
        assert_eq!(bank.slot(PowerupKind::Reveal).cost, 250);
        assert_eq!(bank.slot(PowerupKind::Reveal).max_cooldown, 12);
    }

    #[test]
    fn test_begin_use_success_arms_cooldown() {
        let mut bank = PowerupBank::new();
        let cost = bank.begin_use(PowerupKind::Hint, 500, true).unwrap();
        assert_eq!(cost, 50);

        let slot = bank.slot(PowerupKind::Hint);
        assert!(!slot.available);
        assert_eq!(slot.cooldown_remaining, slot.max_cooldown);
    }

    #[test]
    fn test_rapid_double_use_denied_on_cooldown() {
        let mut bank = PowerupBank::new();
        bank.begin_use(PowerupKind::Shield, 1000, true).unwrap();
        assert_eq!(
            bank.begin_use(PowerupKind::Shield, 1000, true),
            Err(PowerupDenied::OnCooldown)
        );
    }

    #[test]
    fn test_denial_reasons() {
        let mut bank = PowerupBank::new();
        assert_eq!(
            bank.begin_use(PowerupKind::Slow, 1000, false),
            Err(PowerupDenied::SessionInactive)
        );
        assert_eq!(
            bank.begin_use(PowerupKind::Double, 299, true),
            Err(PowerupDenied::InsufficientScore)
        );
        // Denials never arm the cooldown.
        assert!(bank.slot(PowerupKind::Double).available);
        assert_eq!(bank.slot(PowerupKind::Double).cooldown_remaining, 0);
    }

    #[test]
    fn test_cooldown_ticks_once_per_second() {
        let mut bank = PowerupBank::new();
        bank.begin_use(PowerupKind::Skip, 500, true).unwrap();
        assert_eq!(bank.slot(PowerupKind::Skip).cooldown_remaining, 3);

        bank.tick(999);
        assert_eq!(bank.slot(PowerupKind::Skip).cooldown_remaining, 3);
        bank.tick(1);
        assert_eq!(bank.slot(PowerupKind::Skip).cooldown_remaining, 2);

        bank.tick(2000);
        let slot = bank.slot(PowerupKind::Skip);
        assert_eq!(slot.cooldown_remaining, 0);
        assert!(slot.available);
    }

    #[test]
    fn test_cooldowns_independent_per_kind() {
        let mut bank = PowerupBank::new();
        bank.begin_use(PowerupKind::Skip, 500, true).unwrap();
        bank.begin_use(PowerupKind::Shield, 500, true).unwrap();

        bank.tick(3000);
        assert!(bank.slot(PowerupKind::Skip).available);
        assert!(!bank.slot(PowerupKind::Shield).available);
        assert_eq!(bank.slot(PowerupKind::Shield).cooldown_remaining, 5);
    }

    #[test]
    fn test_available_iff_cooldown_zero() {
        let mut bank = PowerupBank::new();
        bank.begin_use(PowerupKind::Reveal, 500, true).unwrap();
        for _ in 0..15 {
            bank.tick(1000);
            for kind in POWERUP_KINDS {
                let slot = bank.slot(kind);
                assert_eq!(slot.available, slot.cooldown_remaining == 0);
            }
        }
    }

    #[test]
    fn test_reset_restores_all_slots() {
        let mut bank = PowerupBank::new();
        bank.begin_use(PowerupKind::Double, 500, true).unwrap();
        bank.reset();
        assert!(bank.slot(PowerupKind::Double).available);
        assert_eq!(bank.slot(PowerupKind::Double).cooldown_remaining, 0);
    }
}
