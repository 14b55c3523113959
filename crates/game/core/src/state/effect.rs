//! Stackable status effects.
//!
//! A [`StatusEffect`] is an immutable bundle of state grants, state
//! preventions and attribute modifiers. Equality and hashing are structural,
//! so the exact effect that was added can later be found and removed once.

use std::collections::BTreeMap;

use super::{Attribute, States};
use crate::error::{ErrorSeverity, GameError};

/// Immutable modifier bundle applied to a [`Status`](super::Status).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusEffect {
    label: String,
    grants: States,
    prevents: States,
    modifiers: BTreeMap<Attribute, i32>,
}

impl StatusEffect {
    /// Starts building an effect with the given label.
    pub fn builder(label: impl Into<String>) -> StatusEffectBuilder {
        StatusEffectBuilder {
            label: label.into(),
            grants: States::empty(),
            prevents: States::empty(),
            modifiers: BTreeMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// States forced on while this effect is active.
    pub fn grants(&self) -> States {
        self.grants
    }

    /// States forced off while this effect is active.
    pub fn prevents(&self) -> States {
        self.prevents
    }

    /// Modifier this effect contributes to `attribute` (0 if none).
    pub fn modifier(&self, attribute: Attribute) -> i32 {
        self.modifiers.get(&attribute).copied().unwrap_or(0)
    }

    pub fn modifiers(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        self.modifiers.iter().map(|(&attr, &value)| (attr, value))
    }

    /// Returns true if the effect neither changes states nor attributes.
    pub fn is_inert(&self) -> bool {
        self.grants.is_empty() && self.prevents.is_empty() && self.modifiers.is_empty()
    }
}

/// Builder for [`StatusEffect`] that validates the finished effect.
#[derive(Clone, Debug)]
pub struct StatusEffectBuilder {
    label: String,
    grants: States,
    prevents: States,
    modifiers: BTreeMap<Attribute, i32>,
}

impl StatusEffectBuilder {
    pub fn grant(mut self, states: States) -> Self {
        self.grants |= states;
        self
    }

    pub fn prevent(mut self, states: States) -> Self {
        self.prevents |= states;
        self
    }

    /// Adds `amount` to the modifier for `attribute`. Zero-sum modifiers are dropped.
    pub fn modify(mut self, attribute: Attribute, amount: i32) -> Self {
        let entry = self.modifiers.entry(attribute).or_insert(0);
        *entry += amount;
        if *entry == 0 {
            self.modifiers.remove(&attribute);
        }
        self
    }

    pub fn build(self) -> Result<StatusEffect, StatusEffectError> {
        let overlap = self.grants & self.prevents;
        if !overlap.is_empty() {
            return Err(StatusEffectError::ConflictingStates {
                label: self.label,
                states: overlap,
            });
        }

        Ok(StatusEffect {
            label: self.label,
            grants: self.grants,
            prevents: self.prevents,
            modifiers: self.modifiers,
        })
    }
}

/// Errors raised while building a [`StatusEffect`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatusEffectError {
    #[error("effect '{label}' both grants and prevents {states:?}")]
    ConflictingStates { label: String, states: States },
}

impl GameError for StatusEffectError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ConflictingStates { .. } => "EFFECT_CONFLICTING_STATES",
        }
    }
}
