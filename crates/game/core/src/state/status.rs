//! Effect-aware attribute store for a single character.
//!
//! # Resolution Rules
//!
//! - Attribute reads are computed, never cached:
//!   `base + Σ effect modifiers`, then clamped to the registered bounds.
//! - States are recomputed on every effect add/remove as
//!   `granted − prevented`; directly-set states are suppressed wherever an
//!   effect prevents them.
//! - Effects stack by multiplicity: an effect added twice must be removed
//!   twice.

use std::collections::BTreeMap;

use super::{Attribute, Bound, States, StatusEffect};

/// Mutable numeric/boolean state of a character.
#[derive(Clone, Debug, Default)]
pub struct Status {
    base: BTreeMap<Attribute, i32>,
    states: States,
    granted: States,
    prevented: States,
    bounds: BTreeMap<Attribute, (Bound, Bound)>,
    effects: Vec<StatusEffect>,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // States
    // ========================================================================

    /// Returns true if every state in `state` is currently active.
    pub fn has_state(&self, state: States) -> bool {
        self.effective_states().contains(state)
    }

    /// Currently active states after effect grants and preventions.
    pub fn effective_states(&self) -> States {
        (self.states | self.granted) - self.prevented
    }

    /// Directly sets or clears `state`.
    ///
    /// No-op for any state currently forced on or off by an active effect.
    pub fn set_state(&mut self, state: States, active: bool) {
        let forced = self.granted | self.prevented;
        let settable = state - forced;
        if settable != state {
            tracing::trace!(?state, ?forced, "ignoring set_state for effect-forced state");
        }
        self.states.set(settable, active);
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Effective value: base plus effect modifiers, clamped to registered bounds.
    ///
    /// # Panics
    ///
    /// Panics if the registered bounds evaluate to `lower > upper`.
    pub fn get_attribute(&self, attribute: Attribute) -> i32 {
        let raw = self.unclamped(attribute);
        match self.evaluate_bounds(attribute) {
            Some((lower, upper)) => raw.clamp(lower, upper),
            None => raw,
        }
    }

    /// Stored value without effect modifiers or bounds.
    pub fn base_attribute(&self, attribute: Attribute) -> i32 {
        self.base.get(&attribute).copied().unwrap_or(0)
    }

    /// Adds `delta` to the base value, then clamps.
    pub fn increment_attribute(&mut self, attribute: Attribute, delta: i32) {
        let base = self.base_attribute(attribute).saturating_add(delta);
        self.store(attribute, base);
    }

    /// Replaces the base value, then clamps.
    pub fn set_attribute(&mut self, attribute: Attribute, value: i32) {
        self.store(attribute, value);
    }

    /// Registers clamp bounds for `attribute` and clamps the stored value.
    ///
    /// # Panics
    ///
    /// Panics if the bounds evaluate to `lower > upper`.
    pub fn set_attribute_bounds(
        &mut self,
        attribute: Attribute,
        lower: impl Into<Bound>,
        upper: impl Into<Bound>,
    ) {
        self.bounds.insert(attribute, (lower.into(), upper.into()));
        let base = self.base_attribute(attribute);
        self.store(attribute, base);
    }

    /// Returns the evaluated `(lower, upper)` bounds, if any are registered.
    ///
    /// # Panics
    ///
    /// Panics if the bounds evaluate to `lower > upper`.
    pub fn attribute_bounds(&self, attribute: Attribute) -> Option<(i32, i32)> {
        self.evaluate_bounds(attribute)
    }

    /// Dead means health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.get_attribute(Attribute::Health) == 0
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    pub fn add_status_effect(&mut self, effect: StatusEffect) {
        tracing::trace!(label = effect.label(), "adding status effect");
        self.effects.push(effect);
        self.recompute_states();
    }

    /// Removes one occurrence of `effect`.
    ///
    /// # Panics
    ///
    /// Panics if `effect` is not currently active.
    pub fn remove_status_effect(&mut self, effect: &StatusEffect) {
        let index = self
            .effects
            .iter()
            .position(|active| active == effect);
        let Some(index) = index else {
            panic!("status effect '{}' is not active", effect.label());
        };
        self.effects.remove(index);
        self.recompute_states();
    }

    pub fn has_status_effect(&self, effect: &StatusEffect) -> bool {
        self.effects.contains(effect)
    }

    /// Active effects in the order they were added.
    pub fn active_effects(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Active effects matching `filter`.
    pub fn active_effects_where<F>(&self, filter: F) -> impl Iterator<Item = &StatusEffect>
    where
        F: Fn(&StatusEffect) -> bool,
    {
        self.effects.iter().filter(move |effect| filter(effect))
    }

    /// Drops every active effect.
    pub fn clear_status_effects(&mut self) {
        self.effects.clear();
        self.recompute_states();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn modifier_sum(&self, attribute: Attribute) -> i32 {
        self.effects
            .iter()
            .fold(0i32, |sum, effect| sum.saturating_add(effect.modifier(attribute)))
    }

    fn unclamped(&self, attribute: Attribute) -> i32 {
        self.base_attribute(attribute)
            .saturating_add(self.modifier_sum(attribute))
    }

    fn evaluate_bounds(&self, attribute: Attribute) -> Option<(i32, i32)> {
        let (lower, upper) = self.bounds.get(&attribute)?;
        let lower = lower.evaluate(self);
        let upper = upper.evaluate(self);
        assert!(
            lower <= upper,
            "bounds for {attribute} are inverted: lower {lower} > upper {upper}"
        );
        Some((lower, upper))
    }

    /// Stores `base` clamped to the registered bounds. Effect modifiers are
    /// applied on read only.
    fn store(&mut self, attribute: Attribute, base: i32) {
        let clamped = match self.evaluate_bounds(attribute) {
            Some((lower, upper)) => base.clamp(lower, upper),
            None => base,
        };
        self.base.insert(attribute, clamped);
    }

    fn recompute_states(&mut self) {
        let (granted, prevented) = self
            .effects
            .iter()
            .fold((States::empty(), States::empty()), |(g, p), effect| {
                (g | effect.grants(), p | effect.prevents())
            });
        self.granted = granted;
        self.prevented = prevented;
    }
}
