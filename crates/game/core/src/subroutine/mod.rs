//! Subroutines: the actions characters can queue on the combat stack.
//!
//! A [`Subroutine`] is a value type: its effect, cost and timing are fixed
//! at construction (see [`SubroutineSpec`]) and two subroutines with the same
//! parameters compare equal. Occurrence identity is tracked separately by
//! [`MoveId`](crate::combat::MoveId).
//!
//! # Two-step use
//!
//! Callers check [`Subroutine::can_use`] before calling
//! [`Subroutine::execute`]. `execute` re-checks and panics on a stale move,
//! which surfaces bookkeeping bugs instead of silently applying an invalid
//! action.

mod apply;
mod spec;

pub use apply::{DamageDealt, damage_target, repair_target, shield_target};
pub use spec::{EffectSpec, SpecKind, SubroutineError, SubroutineSpec};

use crate::state::{Character, CharacterId, Roster, States, StatusEffect};

/// Which characters a subroutine may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    /// Only the user.
    SelfOnly,
    /// Any character except the user.
    Other,
    /// The user or any other character.
    Any,
}

/// What a subroutine does when it resolves.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SubroutineEffect {
    /// Single hit.
    DirectDamage { amount: u32 },
    /// Hits once per resolution round.
    DamageOverTime { per_round: u32 },
    /// Restores health.
    Repair { amount: u32 },
    /// Adds shield.
    ShieldBuff { amount: u32 },
    /// Applies a status effect that is removed when the lifetime ends.
    AttributeModifier { effect: StatusEffect },
    /// Does nothing.
    Wait,
    /// Placeholder that can never be used.
    Unusable,
}

/// Action template with cost and timing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Subroutine {
    effect: SubroutineEffect,
    time_to_resolve: u32,
    duration: u32,
    cpu_slots: u32,
}

impl Subroutine {
    pub(crate) fn from_parts(
        effect: SubroutineEffect,
        time_to_resolve: u32,
        duration: u32,
        cpu_slots: u32,
    ) -> Self {
        Self {
            effect,
            time_to_resolve,
            duration,
            cpu_slots,
        }
    }

    /// Free, instant no-op aimed at the user.
    pub fn wait() -> Self {
        Self::from_parts(SubroutineEffect::Wait, 0, 0, 0)
    }

    /// Stub that is never usable.
    pub fn unusable() -> Self {
        Self::from_parts(SubroutineEffect::Unusable, 0, 0, 0)
    }

    pub fn effect(&self) -> &SubroutineEffect {
        &self.effect
    }

    /// CPU slots reserved for the whole lifetime of a move.
    pub fn cpu_slots(&self) -> u32 {
        self.cpu_slots
    }

    /// Rounds before the first resolution.
    pub fn time_to_resolve(&self) -> u32 {
        self.time_to_resolve
    }

    /// Additional rounds after the first resolution.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Total rounds a move stays registered: wind-up plus duration.
    pub fn lifetime(&self) -> u32 {
        self.time_to_resolve + self.duration
    }

    /// Returns true if the effect resolves once per round of its duration.
    pub fn multi_use(&self) -> bool {
        matches!(self.effect, SubroutineEffect::DamageOverTime { .. })
    }

    pub fn targeting(&self) -> Targeting {
        match &self.effect {
            SubroutineEffect::DirectDamage { .. } | SubroutineEffect::DamageOverTime { .. } => {
                Targeting::Other
            }
            SubroutineEffect::Repair { .. } | SubroutineEffect::ShieldBuff { .. } => Targeting::Any,
            SubroutineEffect::AttributeModifier { effect } => {
                if is_hostile(effect) {
                    Targeting::Other
                } else {
                    Targeting::Any
                }
            }
            SubroutineEffect::Wait | SubroutineEffect::Unusable => Targeting::SelfOnly,
        }
    }

    /// Human-readable summary, also used to tell moves apart in AI cycles.
    pub fn description(&self) -> String {
        let what = match &self.effect {
            SubroutineEffect::DirectDamage { amount } => format!("deal {amount} damage"),
            SubroutineEffect::DamageOverTime { per_round } => format!(
                "deal {per_round} damage per round for {} rounds",
                self.duration + 1
            ),
            SubroutineEffect::Repair { amount } => format!("repair {amount} health"),
            SubroutineEffect::ShieldBuff { amount } => format!("add {amount} shield"),
            SubroutineEffect::AttributeModifier { effect } => {
                format!("apply '{}' for {} rounds", effect.label(), self.duration)
            }
            SubroutineEffect::Wait => return "wait".to_owned(),
            SubroutineEffect::Unusable => return "unavailable".to_owned(),
        };
        format!(
            "{what} (cpu {}, resolves in {})",
            self.cpu_slots, self.time_to_resolve
        )
    }

    /// Usability predicate checked before every [`Subroutine::execute`].
    ///
    /// CPU affordability is deliberately not part of this check: CPU stays
    /// reserved while a move is in flight, so it is only checked when moves
    /// are offered.
    pub fn can_use(&self, user: &Character, target: &Character) -> bool {
        let same = user.id() == target.id();
        match self.effect {
            SubroutineEffect::Unusable => return false,
            SubroutineEffect::Wait => return same && user.is_alive(),
            _ => {}
        }

        if !user.is_alive() || !target.is_alive() {
            return false;
        }
        if user.status.has_state(States::DISABLED) {
            return false;
        }

        let targetable = !target.status.has_state(States::UNTARGETABLE);
        match self.targeting() {
            Targeting::SelfOnly => same,
            Targeting::Other => !same && targetable,
            Targeting::Any => same || targetable,
        }
    }

    /// Applies the effect of one resolution.
    ///
    /// # Panics
    ///
    /// Panics if either id is unknown or if [`Subroutine::can_use`] is false.
    pub fn execute(&self, roster: &mut Roster, user: CharacterId, target: CharacterId) {
        {
            let user_ref = participant(roster, user);
            let target_ref = participant(roster, target);
            assert!(
                self.can_use(user_ref, target_ref),
                "'{}' executed by {user} on {target} while unusable",
                self.description()
            );
        }

        let Some(target_char) = roster.get_mut(target) else {
            unreachable!("target {target} checked above");
        };
        match &self.effect {
            SubroutineEffect::DirectDamage { amount } => {
                let dealt = damage_target(*amount, &mut target_char.status);
                tracing::debug!(%user, %target, shield = dealt.shield, health = dealt.health, "direct damage");
            }
            SubroutineEffect::DamageOverTime { per_round } => {
                let dealt = damage_target(*per_round, &mut target_char.status);
                tracing::debug!(%user, %target, shield = dealt.shield, health = dealt.health, "damage over time tick");
            }
            SubroutineEffect::Repair { amount } => {
                let restored = repair_target(*amount, &mut target_char.status);
                tracing::debug!(%user, %target, restored, "repair");
            }
            SubroutineEffect::ShieldBuff { amount } => {
                shield_target(*amount, &mut target_char.status);
                tracing::debug!(%user, %target, amount, "shield");
            }
            SubroutineEffect::AttributeModifier { effect } => {
                target_char.status.add_status_effect(effect.clone());
                tracing::debug!(%user, %target, label = effect.label(), "status effect applied");
            }
            SubroutineEffect::Wait => {}
            SubroutineEffect::Unusable => unreachable!("unusable subroutines never pass can_use"),
        }
    }

    /// Cleanup invoked once a move's lifetime ends (or a participant died).
    ///
    /// Removes the status effect applied by an attribute modifier if it is
    /// still present. Callers only invoke it for occurrences that executed.
    pub fn after_effect(&self, roster: &mut Roster, user: CharacterId, target: CharacterId) {
        let SubroutineEffect::AttributeModifier { effect } = &self.effect else {
            return;
        };
        let Some(target_char) = roster.get_mut(target) else {
            return;
        };
        if target_char.status.has_status_effect(effect) {
            target_char.status.remove_status_effect(effect);
            tracing::debug!(%user, %target, label = effect.label(), "status effect expired");
        }
    }
}

/// Effects that hinder their target are aimed at other characters.
fn is_hostile(effect: &StatusEffect) -> bool {
    effect.modifiers().any(|(_, amount)| amount < 0)
        || effect
            .grants()
            .intersects(States::DISABLED | States::CORRUPTED)
}

fn participant(roster: &Roster, id: CharacterId) -> &Character {
    match roster.get(id) {
        Some(character) => character,
        None => panic!("character {id} is not part of this combat"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Attribute;

    fn duel() -> (Roster, CharacterId, CharacterId) {
        let mut roster = Roster::new();
        let a = roster.add(Character::new("a", 10, 3)).unwrap();
        let b = roster.add(Character::new("b", 10, 3)).unwrap();
        (roster, a, b)
    }

    fn direct(amount: i32) -> Subroutine {
        SubroutineSpec::direct_damage(amount).build().unwrap()
    }

    #[test]
    fn damage_cannot_target_self_or_untargetable() {
        let (mut roster, a, b) = duel();
        let hit = direct(3);

        assert!(hit.can_use(roster.get(a).unwrap(), roster.get(b).unwrap()));
        assert!(!hit.can_use(roster.get(a).unwrap(), roster.get(a).unwrap()));

        roster
            .get_mut(b)
            .unwrap()
            .status
            .set_state(States::UNTARGETABLE, true);
        assert!(!hit.can_use(roster.get(a).unwrap(), roster.get(b).unwrap()));
    }

    #[test]
    fn disabled_user_can_only_wait() {
        let (mut roster, a, b) = duel();
        roster
            .get_mut(a)
            .unwrap()
            .status
            .set_state(States::DISABLED, true);

        let user = roster.get(a).unwrap();
        assert!(!direct(1).can_use(user, roster.get(b).unwrap()));
        assert!(Subroutine::wait().can_use(user, user));
        assert!(!Subroutine::wait().can_use(user, roster.get(b).unwrap()));
    }

    #[test]
    fn dead_characters_cannot_act_or_be_targeted() {
        let (mut roster, a, b) = duel();
        roster
            .get_mut(b)
            .unwrap()
            .status
            .set_attribute(Attribute::Health, 0);

        let hit = direct(1);
        assert!(!hit.can_use(roster.get(a).unwrap(), roster.get(b).unwrap()));
        assert!(!hit.can_use(roster.get(b).unwrap(), roster.get(a).unwrap()));
    }

    #[test]
    fn unusable_stub_is_never_usable() {
        let (roster, a, _) = duel();
        let user = roster.get(a).unwrap();
        assert!(!Subroutine::unusable().can_use(user, user));
    }

    #[test]
    fn execute_applies_damage() {
        let (mut roster, a, b) = duel();
        direct(3).execute(&mut roster, a, b);

        assert_eq!(
            roster.get(b).unwrap().status.get_attribute(Attribute::Health),
            7
        );
    }

    #[test]
    #[should_panic(expected = "while unusable")]
    fn execute_panics_on_stale_move() {
        let (mut roster, a, b) = duel();
        roster
            .get_mut(b)
            .unwrap()
            .status
            .set_attribute(Attribute::Health, 0);

        direct(3).execute(&mut roster, a, b);
    }

    #[test]
    fn modifier_is_removed_by_after_effect() {
        let (mut roster, a, _) = duel();
        let boost = SubroutineSpec::attribute_modifier(
            EffectSpec::new("overclock")
                .modify(Attribute::MaxCpu, 2)
                .grant(States::OVERCLOCKED),
        )
        .duration(2)
        .build()
        .unwrap();
        assert_eq!(boost.targeting(), Targeting::Any);

        boost.execute(&mut roster, a, a);
        let status = &roster.get(a).unwrap().status;
        assert_eq!(status.get_attribute(Attribute::MaxCpu), 5);
        assert!(status.has_state(States::OVERCLOCKED));

        boost.after_effect(&mut roster, a, a);
        boost.after_effect(&mut roster, a, a);
        let status = &roster.get(a).unwrap().status;
        assert_eq!(status.get_attribute(Attribute::MaxCpu), 3);
        assert!(!status.has_state(States::OVERCLOCKED));
    }

    #[test]
    fn debuffs_target_others() {
        let corrode = SubroutineSpec::attribute_modifier(
            EffectSpec::new("corrode").modify(Attribute::MaxHealth, -2),
        )
        .duration(1)
        .build()
        .unwrap();

        assert_eq!(corrode.targeting(), Targeting::Other);
    }

    #[test]
    fn identical_parameters_compare_equal() {
        assert_eq!(direct(4), direct(4));
        assert_ne!(direct(4), direct(5));
        assert_eq!(direct(4).description(), direct(4).description());
    }
}
