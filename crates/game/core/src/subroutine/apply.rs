//! Attribute mutations performed by resolved subroutines.

use crate::state::{Attribute, Status};

/// Amount of damage absorbed by each pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageDealt {
    pub shield: u32,
    pub health: u32,
}

/// Applies `amount` damage, draining shield before health.
///
/// `shield_reduction = min(shield, amount)` and the remainder goes to health.
/// Health is clamped by its bounds, so overkill is not reported back.
pub fn damage_target(amount: u32, target: &mut Status) -> DamageDealt {
    let shield = target.get_attribute(Attribute::Shield).max(0) as u32;
    let shield_reduction = shield.min(amount);
    let health_reduction = amount - shield_reduction;

    target.increment_attribute(Attribute::Shield, -(shield_reduction as i32));
    target.increment_attribute(Attribute::Health, -(health_reduction as i32));

    DamageDealt {
        shield: shield_reduction,
        health: health_reduction,
    }
}

/// Restores up to `amount` health and returns how much was actually restored.
pub fn repair_target(amount: u32, target: &mut Status) -> u32 {
    let before = target.get_attribute(Attribute::Health);
    target.increment_attribute(Attribute::Health, amount as i32);
    (target.get_attribute(Attribute::Health) - before).max(0) as u32
}

/// Adds `amount` shield.
pub fn shield_target(amount: u32, target: &mut Status) {
    target.increment_attribute(Attribute::Shield, amount as i32);
}
