//! Validated construction of subroutines.
//!
//! Raw parameters arrive as signed integers (from catalogs or callers) and are
//! checked here once, so the rest of the engine only ever sees well-formed
//! subroutines.
//!
//! # Default costs
//!
//! For amount-based subroutines (damage, repair, shield):
//!
//! - `time_to_resolve = floor(sqrt(total))`
//! - `cpu_slots = 1 + total / (2 * time_to_resolve + 1)`
//!
//! where `total` is the full amount dealt over the subroutine's lifetime.
//! Longer wind-ups make a subroutine cheaper per point.

use super::{Subroutine, SubroutineEffect};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Attribute, States, StatusEffect, StatusEffectError};

/// Parameters for one subroutine, validated by [`SubroutineSpec::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubroutineSpec {
    pub kind: SpecKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_to_resolve: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cpu_slots: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<i32>,
}

/// Effect-specific parameters of a [`SubroutineSpec`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecKind {
    DirectDamage { amount: i32 },
    DamageOverTime { per_round: i32 },
    Repair { amount: i32 },
    Shield { amount: i32 },
    AttributeModifier(EffectSpec),
    Wait,
}

/// Unvalidated description of a [`StatusEffect`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grants: States,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prevents: States,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<(Attribute, i32)>,
}

impl EffectSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            grants: States::empty(),
            prevents: States::empty(),
            modifiers: Vec::new(),
        }
    }

    pub fn grant(mut self, states: States) -> Self {
        self.grants |= states;
        self
    }

    pub fn prevent(mut self, states: States) -> Self {
        self.prevents |= states;
        self
    }

    pub fn modify(mut self, attribute: Attribute, amount: i32) -> Self {
        self.modifiers.push((attribute, amount));
        self
    }

    pub fn build(&self) -> Result<StatusEffect, StatusEffectError> {
        self.modifiers
            .iter()
            .fold(
                StatusEffect::builder(self.label.clone())
                    .grant(self.grants)
                    .prevent(self.prevents),
                |builder, &(attribute, amount)| builder.modify(attribute, amount),
            )
            .build()
    }
}

impl SubroutineSpec {
    fn new(kind: SpecKind) -> Self {
        Self {
            kind,
            time_to_resolve: None,
            cpu_slots: None,
            duration: None,
        }
    }

    pub fn direct_damage(amount: i32) -> Self {
        Self::new(SpecKind::DirectDamage { amount })
    }

    /// Deals `per_round` at the first resolution and each of `duration` later rounds.
    pub fn damage_over_time(per_round: i32, duration: i32) -> Self {
        Self::new(SpecKind::DamageOverTime { per_round }).duration(duration)
    }

    pub fn repair(amount: i32) -> Self {
        Self::new(SpecKind::Repair { amount })
    }

    pub fn shield(amount: i32) -> Self {
        Self::new(SpecKind::Shield { amount })
    }

    /// Applies `effect` on resolution; give it a [`SubroutineSpec::duration`].
    pub fn attribute_modifier(effect: EffectSpec) -> Self {
        Self::new(SpecKind::AttributeModifier(effect))
    }

    pub fn wait() -> Self {
        Self::new(SpecKind::Wait)
    }

    pub fn time_to_resolve(mut self, rounds: i32) -> Self {
        self.time_to_resolve = Some(rounds);
        self
    }

    pub fn cpu_slots(mut self, slots: i32) -> Self {
        self.cpu_slots = Some(slots);
        self
    }

    pub fn duration(mut self, rounds: i32) -> Self {
        self.duration = Some(rounds);
        self
    }

    /// Validates the parameters and fills in default costs.
    pub fn build(&self) -> Result<Subroutine, SubroutineError> {
        let time_to_resolve = non_negative("time_to_resolve", self.time_to_resolve)?;
        let cpu_slots = non_negative("cpu_slots", self.cpu_slots)?;
        let duration = non_negative("duration", self.duration)?;

        let (effect, total, duration) = match &self.kind {
            SpecKind::DirectDamage { amount } => {
                let amount = amount_of("damage", *amount)?;
                reject_duration("direct damage", duration)?;
                (SubroutineEffect::DirectDamage { amount }, amount, 0)
            }
            SpecKind::DamageOverTime { per_round } => {
                let per_round = amount_of("damage", *per_round)?;
                let duration = match duration {
                    Some(rounds) if rounds > 0 => rounds,
                    _ => return Err(SubroutineError::MissingDuration("damage over time")),
                };
                let total = per_round.saturating_mul(duration + 1);
                (SubroutineEffect::DamageOverTime { per_round }, total, duration)
            }
            SpecKind::Repair { amount } => {
                let amount = amount_of("repair", *amount)?;
                reject_duration("repair", duration)?;
                (SubroutineEffect::Repair { amount }, amount, 0)
            }
            SpecKind::Shield { amount } => {
                let amount = amount_of("shield", *amount)?;
                reject_duration("shield", duration)?;
                (SubroutineEffect::ShieldBuff { amount }, amount, 0)
            }
            SpecKind::AttributeModifier(spec) => {
                let effect = spec.build()?;
                if effect.is_inert() {
                    return Err(SubroutineError::InertEffect(spec.label.clone()));
                }
                let duration = match duration {
                    Some(rounds) if rounds > 0 => rounds,
                    _ => return Err(SubroutineError::MissingDuration("attribute modifier")),
                };
                let subroutine = Subroutine::from_parts(
                    SubroutineEffect::AttributeModifier { effect },
                    time_to_resolve.unwrap_or(0),
                    duration,
                    cpu_slots.unwrap_or(1),
                );
                return Ok(subroutine);
            }
            SpecKind::Wait => {
                reject_duration("wait", duration)?;
                let subroutine = Subroutine::from_parts(
                    SubroutineEffect::Wait,
                    time_to_resolve.unwrap_or(0),
                    0,
                    cpu_slots.unwrap_or(0),
                );
                return Ok(subroutine);
            }
        };

        let time_to_resolve = time_to_resolve.unwrap_or_else(|| total.isqrt());
        let cpu_slots = cpu_slots.unwrap_or_else(|| default_cpu_slots(total, time_to_resolve));

        Ok(Subroutine::from_parts(
            effect,
            time_to_resolve,
            duration,
            cpu_slots,
        ))
    }
}

/// `1 + total / (2 * time_to_resolve + 1)`.
pub(crate) fn default_cpu_slots(total: u32, time_to_resolve: u32) -> u32 {
    1 + total / (2 * time_to_resolve + 1)
}

fn non_negative(field: &'static str, value: Option<i32>) -> Result<Option<u32>, SubroutineError> {
    match value {
        Some(v) if v < 0 => Err(SubroutineError::NegativeParameter { field, value: v }),
        Some(v) => Ok(Some(v as u32)),
        None => Ok(None),
    }
}

fn amount_of(field: &'static str, value: i32) -> Result<u32, SubroutineError> {
    if value < 0 {
        return Err(SubroutineError::NegativeAmount { field, value });
    }
    Ok(value as u32)
}

fn reject_duration(kind: &'static str, duration: Option<u32>) -> Result<(), SubroutineError> {
    match duration {
        Some(rounds) if rounds > 0 => Err(SubroutineError::UnexpectedDuration { kind, rounds }),
        _ => Ok(()),
    }
}

/// Errors raised while constructing a [`Subroutine`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubroutineError {
    #[error("{field} amount must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: i32 },

    #[error("{field} must not be negative (got {value})")]
    NegativeParameter { field: &'static str, value: i32 },

    #[error("{0} requires a duration of at least one round")]
    MissingDuration(&'static str),

    #[error("{kind} resolves once and cannot last {rounds} rounds")]
    UnexpectedDuration { kind: &'static str, rounds: u32 },

    #[error("effect '{0}' changes nothing")]
    InertEffect(String),

    #[error(transparent)]
    Effect(#[from] StatusEffectError),
}

impl GameError for SubroutineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount { .. } => "SUBROUTINE_NEGATIVE_AMOUNT",
            Self::NegativeParameter { .. } => "SUBROUTINE_NEGATIVE_PARAMETER",
            Self::MissingDuration(_) => "SUBROUTINE_MISSING_DURATION",
            Self::UnexpectedDuration { .. } => "SUBROUTINE_UNEXPECTED_DURATION",
            Self::InertEffect(_) => "SUBROUTINE_INERT_EFFECT",
            Self::Effect(_) => "SUBROUTINE_INVALID_EFFECT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_defaults_follow_wind_up_curve() {
        let sub = SubroutineSpec::direct_damage(9).build().unwrap();
        assert_eq!(sub.time_to_resolve(), 3);
        assert_eq!(sub.cpu_slots(), 1 + 9 / 7);

        let sub = SubroutineSpec::direct_damage(3).build().unwrap();
        assert_eq!(sub.time_to_resolve(), 1);
        assert_eq!(sub.cpu_slots(), 2);

        let sub = SubroutineSpec::direct_damage(0).build().unwrap();
        assert_eq!(sub.time_to_resolve(), 0);
        assert_eq!(sub.cpu_slots(), 1);
    }

    #[test]
    fn longer_wind_up_is_cheaper() {
        let fast = SubroutineSpec::direct_damage(8)
            .time_to_resolve(0)
            .build()
            .unwrap();
        let slow = SubroutineSpec::direct_damage(8)
            .time_to_resolve(3)
            .build()
            .unwrap();

        assert_eq!(fast.cpu_slots(), 9);
        assert_eq!(slow.cpu_slots(), 2);
    }

    #[test]
    fn explicit_costs_override_defaults() {
        let sub = SubroutineSpec::direct_damage(3)
            .time_to_resolve(0)
            .cpu_slots(1)
            .build()
            .unwrap();

        assert_eq!(sub.time_to_resolve(), 0);
        assert_eq!(sub.cpu_slots(), 1);
        assert_eq!(sub.lifetime(), 0);
        assert!(!sub.multi_use());
    }

    #[test]
    fn damage_over_time_is_multi_use() {
        let sub = SubroutineSpec::damage_over_time(2, 2).build().unwrap();

        assert!(sub.multi_use());
        assert_eq!(sub.duration(), 2);
        // total = 2 * 3 rounds
        assert_eq!(sub.time_to_resolve(), 2);
        assert_eq!(sub.cpu_slots(), 1 + 6 / 5);
    }

    #[test]
    fn rejects_negative_parameters() {
        assert!(matches!(
            SubroutineSpec::direct_damage(-1).build(),
            Err(SubroutineError::NegativeAmount { field: "damage", value: -1 })
        ));
        assert!(matches!(
            SubroutineSpec::repair(-4).build(),
            Err(SubroutineError::NegativeAmount { field: "repair", .. })
        ));
        assert!(matches!(
            SubroutineSpec::shield(2).time_to_resolve(-1).build(),
            Err(SubroutineError::NegativeParameter { field: "time_to_resolve", .. })
        ));
        assert!(matches!(
            SubroutineSpec::damage_over_time(1, -2).build(),
            Err(SubroutineError::NegativeParameter { field: "duration", .. })
        ));
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(matches!(
            SubroutineSpec::damage_over_time(1, 0).build(),
            Err(SubroutineError::MissingDuration(_))
        ));
        assert!(matches!(
            SubroutineSpec::direct_damage(1).duration(2).build(),
            Err(SubroutineError::UnexpectedDuration { rounds: 2, .. })
        ));
    }

    #[test]
    fn rejects_malformed_effects() {
        let inert = SubroutineSpec::attribute_modifier(EffectSpec::new("nothing"))
            .duration(1)
            .build();
        assert!(matches!(inert, Err(SubroutineError::InertEffect(_))));

        let conflicting = SubroutineSpec::attribute_modifier(
            EffectSpec::new("glitch")
                .grant(States::DISABLED)
                .prevent(States::DISABLED),
        )
        .duration(1)
        .build();
        assert!(matches!(conflicting, Err(SubroutineError::Effect(_))));
    }
}
