//! Round lifecycle for a single combat.
//!
//! # Round Flow
//!
//! 1. [`CombatLogic::start_round`] validates the submission, ages every
//!    tracked move, registers the new moves, pushes them onto the stack and
//!    advances stack time.
//! 2. [`CombatLogic::end_round`] executes resolved moves, expires moves whose
//!    lifetime ended (or whose participants died), purges the dead and
//!    recomputes CPU.
//!
//! # CPU Accounting
//!
//! `CpuAvailable` is recomputed from scratch after every phase: reset to
//! `MaxCpu`, then reduced by the `cpu_slots` of every tracked move the
//! character is using. CPU stays reserved until a move's full lifetime ends.

use std::collections::{BTreeMap, BTreeSet};

use super::{CombatError, CombatStack, Move, MoveId, TrackedMove};
use crate::error::ErrorContext;
use crate::state::{Attribute, Character, CharacterId, Roster};

/// Where a combat is within its round cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    Initialized,
    RoundStarted,
    RoundEnded,
}

/// Lifetime bookkeeping for one move occurrence.
#[derive(Clone, Debug)]
struct Registration {
    tracked: TrackedMove,
    elapsed: u32,
    lifetime: u32,
    /// Whether any resolution of this occurrence has executed.
    applied: bool,
}

impl Registration {
    fn expired(&self) -> bool {
        self.elapsed >= self.lifetime
    }
}

/// Orchestrates one combat over a fixed roster.
#[derive(Clone, Debug)]
pub struct CombatLogic {
    roster: Roster,
    active: Vec<CharacterId>,
    registry: BTreeMap<MoveId, Registration>,
    stack: CombatStack<TrackedMove>,
    next_move_id: u64,
    round: u32,
    phase: RoundPhase,
}

impl CombatLogic {
    /// Starts a combat: shields are zeroed and CPU recomputed.
    pub fn new(mut roster: Roster) -> Self {
        for character in roster.iter_mut() {
            character.status.set_attribute(Attribute::Shield, 0);
        }

        let mut logic = Self {
            roster,
            active: Vec::new(),
            registry: BTreeMap::new(),
            stack: CombatStack::new(),
            next_move_id: 0,
            round: 0,
            phase: RoundPhase::Initialized,
        };
        logic.recompute_cpu();
        logic.recompute_active();

        tracing::info!(participants = logic.roster.len(), "combat initialized");
        logic
    }

    // ========================================================================
    // Round lifecycle
    // ========================================================================

    /// Registers one move per acting character and advances stack time.
    ///
    /// Returns the ids assigned to `moves`, in order.
    pub fn start_round(&mut self, moves: Vec<Move>) -> Result<Vec<MoveId>, CombatError> {
        if self.phase == RoundPhase::RoundStarted {
            return Err(CombatError::RoundInProgress {
                context: ErrorContext::new(self.round),
            });
        }
        self.validate_submission(&moves)?;

        self.round += 1;
        self.phase = RoundPhase::RoundStarted;

        for registration in self.registry.values_mut() {
            registration.elapsed += 1;
        }

        let mut ids = Vec::with_capacity(moves.len());
        for mv in moves {
            let id = MoveId(self.next_move_id);
            self.next_move_id += 1;

            let subroutine = &mv.subroutine;
            let first = subroutine.time_to_resolve() + 1;
            let uses = if subroutine.multi_use() {
                subroutine.duration() + 1
            } else {
                1
            };
            let lifetime = subroutine.lifetime();

            tracing::debug!(%id, user = %mv.user, target = %mv.target, move_ = %mv.description(), lifetime, "move registered");

            let tracked = TrackedMove { id, mv };
            for offset in 0..uses {
                self.stack.add_move(tracked.clone(), first + offset);
            }
            self.registry.insert(
                id,
                Registration {
                    tracked,
                    elapsed: 0,
                    lifetime,
                    applied: false,
                },
            );
            ids.push(id);
        }

        self.stack.advance_time();
        self.recompute_cpu();

        tracing::info!(round = self.round, submitted = ids.len(), "round started");
        Ok(ids)
    }

    /// Resolves the round and returns the moves that were executed.
    pub fn end_round(&mut self) -> Result<Vec<TrackedMove>, CombatError> {
        if self.phase != RoundPhase::RoundStarted {
            return Err(CombatError::NoRoundInProgress {
                context: ErrorContext::new(self.round),
            });
        }

        let mut executed = Vec::new();
        for tracked in self.stack.extract_resolved_moves() {
            let mv = &tracked.mv;
            if !mv.can_use(&self.roster) {
                tracing::debug!(id = %tracked.id, user = %mv.user, target = %mv.target, "skipping move that is no longer usable");
                continue;
            }
            mv.subroutine.execute(&mut self.roster, mv.user, mv.target);
            if let Some(registration) = self.registry.get_mut(&tracked.id) {
                registration.applied = true;
            }
            executed.push(tracked);
        }

        let finished: Vec<MoveId> = self
            .registry
            .iter()
            .filter(|(_, registration)| {
                let mv = &registration.tracked.mv;
                registration.expired()
                    || !self.roster.is_alive(mv.user)
                    || !self.roster.is_alive(mv.target)
            })
            .map(|(&id, _)| id)
            .collect();
        for id in finished {
            if let Some(registration) = self.registry.remove(&id) {
                // An occurrence that never executed has nothing to undo.
                if registration.applied {
                    let mv = registration.tracked.mv;
                    mv.subroutine.after_effect(&mut self.roster, mv.user, mv.target);
                }
                tracing::trace!(%id, applied = registration.applied, "move lifetime ended");
            }
        }

        let roster = &self.roster;
        self.stack
            .retain(|tracked| roster.is_alive(tracked.mv.user) && roster.is_alive(tracked.mv.target));

        for character in self.roster.iter_mut().filter(|c| !c.is_alive()) {
            if character.status.active_effects().next().is_some() {
                character.status.clear_status_effects();
                character.status.set_attribute(Attribute::Health, 0);
            }
        }

        self.recompute_cpu();
        let previously_active = std::mem::take(&mut self.active);
        self.recompute_active();
        for id in previously_active {
            if !self.roster.is_alive(id) {
                tracing::info!(character = %id, round = self.round, "character defeated");
            }
        }

        self.phase = RoundPhase::RoundEnded;
        tracing::info!(
            round = self.round,
            executed = executed.len(),
            active = self.active.len(),
            "round ended"
        );
        Ok(executed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Living participants, in roster order.
    pub fn active_characters(&self) -> &[CharacterId] {
        &self.active
    }

    pub fn is_active(&self, id: CharacterId) -> bool {
        self.active.contains(&id)
    }

    /// Every tracked move occurrence, in submission order.
    pub fn all_moves_present(&self) -> impl Iterator<Item = &TrackedMove> {
        self.registry.values().map(|registration| &registration.tracked)
    }

    /// Rounds left before a tracked move's lifetime ends.
    pub fn rounds_remaining(&self, id: MoveId) -> Option<u32> {
        self.registry
            .get(&id)
            .map(|registration| registration.lifetime - registration.elapsed)
    }

    /// Every granted subroutine of `user` that fits its available CPU, aimed
    /// at every active character.
    ///
    /// Usability is not filtered here; selection policies check it.
    pub fn offered_moves(&self, user: CharacterId) -> Vec<Move> {
        let Some(character) = self.roster.get(user).filter(|c| c.is_alive()) else {
            return Vec::new();
        };
        let cpu = character.status.get_attribute(Attribute::CpuAvailable).max(0) as u32;

        character
            .subroutines()
            .iter()
            .filter(|subroutine| subroutine.cpu_slots() <= cpu)
            .flat_map(|subroutine| {
                self.active
                    .iter()
                    .map(move |&target| Move::new(subroutine.clone(), user, target))
            })
            .collect()
    }

    pub fn stack(&self) -> &CombatStack<TrackedMove> {
        &self.stack
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.roster.get(id)
    }

    /// Number of rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn validate_submission(&self, moves: &[Move]) -> Result<(), CombatError> {
        let round = self.round + 1;
        let mut users = BTreeSet::new();

        for mv in moves {
            for id in [mv.user, mv.target] {
                if !self.roster.contains(id) {
                    return Err(CombatError::UnknownCharacter {
                        id,
                        context: ErrorContext::new(round).with_actor(mv.user),
                    });
                }
            }
            if !self.roster.is_alive(mv.user) {
                return Err(CombatError::InactiveUser {
                    user: mv.user,
                    context: ErrorContext::new(round).with_actor(mv.user),
                });
            }
            if !users.insert(mv.user) {
                return Err(CombatError::DuplicateSubmission {
                    user: mv.user,
                    context: ErrorContext::new(round)
                        .with_actor(mv.user)
                        .with_message("one move per character per round"),
                });
            }
        }
        Ok(())
    }

    fn recompute_cpu(&mut self) {
        for character in self.roster.iter_mut() {
            let max_cpu = character.status.get_attribute(Attribute::MaxCpu);
            character
                .status
                .set_attribute(Attribute::CpuAvailable, max_cpu);
        }

        for registration in self.registry.values() {
            let mv = &registration.tracked.mv;
            if let Some(user) = self.roster.get_mut(mv.user) {
                user.status.increment_attribute(
                    Attribute::CpuAvailable,
                    -(mv.subroutine.cpu_slots() as i32),
                );
            }
        }
    }

    fn recompute_active(&mut self) {
        self.active = self
            .roster
            .iter()
            .filter(|character| character.is_alive())
            .map(Character::id)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{States, StatusEffect};
    use crate::subroutine::{EffectSpec, SubroutineSpec};

    fn instant_hit(amount: i32) -> crate::subroutine::Subroutine {
        SubroutineSpec::direct_damage(amount)
            .time_to_resolve(0)
            .build()
            .unwrap()
    }

    fn duel(attacker: Character) -> (CombatLogic, CharacterId, CharacterId) {
        let roster =
            Roster::from_characters([attacker, Character::new("defender", 10, 3)]).unwrap();
        (CombatLogic::new(roster), CharacterId(0), CharacterId(1))
    }

    fn attribute(logic: &CombatLogic, id: CharacterId, attribute: Attribute) -> i32 {
        logic.character(id).unwrap().status.get_attribute(attribute)
    }

    #[test]
    fn initialization_zeroes_shield_and_fills_cpu() {
        let mut attacker = Character::new("attacker", 10, 4);
        attacker.status.set_attribute(Attribute::Shield, 5);
        attacker.status.set_attribute(Attribute::CpuAvailable, 1);
        let (logic, a, _) = duel(attacker);

        assert_eq!(attribute(&logic, a, Attribute::Shield), 0);
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 4);
        assert_eq!(logic.phase(), RoundPhase::Initialized);
        assert_eq!(logic.active_characters(), [CharacterId(0), CharacterId(1)]);
    }

    #[test]
    fn instant_damage_resolves_in_the_same_round() {
        let hit = instant_hit(3);
        let cost = hit.cpu_slots() as i32;
        let (mut logic, a, b) = duel(Character::new("attacker", 10, 5).with_subroutine(hit.clone()));

        logic.start_round(vec![Move::new(hit, a, b)]).unwrap();
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 5 - cost);

        let executed = logic.end_round().unwrap();
        assert_eq!(executed.len(), 1);
        assert_eq!(attribute(&logic, b, Attribute::Health), 7);
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 5);
        assert_eq!(logic.all_moves_present().count(), 0);
    }

    #[test]
    fn cpu_stays_reserved_until_lifetime_ends() {
        let slow = SubroutineSpec::direct_damage(4)
            .time_to_resolve(2)
            .cpu_slots(2)
            .build()
            .unwrap();
        let (mut logic, a, b) = duel(Character::new("attacker", 10, 3));

        let ids = logic.start_round(vec![Move::new(slow, a, b)]).unwrap();
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 1);
        assert_eq!(logic.rounds_remaining(ids[0]), Some(2));
        logic.end_round().unwrap();
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 1);

        logic.start_round(vec![]).unwrap();
        logic.end_round().unwrap();
        assert_eq!(attribute(&logic, b, Attribute::Health), 10);
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 1);

        logic.start_round(vec![]).unwrap();
        logic.end_round().unwrap();
        assert_eq!(attribute(&logic, b, Attribute::Health), 6);
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 3);
    }

    #[test]
    fn identical_moves_are_tracked_independently() {
        let slow = SubroutineSpec::direct_damage(1)
            .time_to_resolve(1)
            .cpu_slots(1)
            .build()
            .unwrap();
        let (mut logic, a, b) = duel(Character::new("attacker", 10, 3));
        let mv = Move::new(slow, a, b);

        let first = logic.start_round(vec![mv.clone()]).unwrap();
        logic.end_round().unwrap();
        let second = logic.start_round(vec![mv]).unwrap();

        assert_ne!(first, second);
        assert_eq!(logic.all_moves_present().count(), 2);
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 1);

        let executed = logic.end_round().unwrap();
        assert_eq!(executed.iter().map(|t| t.id).collect::<Vec<_>>(), first);
        assert_eq!(logic.all_moves_present().count(), 1);
    }

    #[test]
    fn damage_over_time_hits_every_round_of_its_duration() {
        let dot = SubroutineSpec::damage_over_time(2, 2)
            .time_to_resolve(0)
            .cpu_slots(1)
            .build()
            .unwrap();
        let (mut logic, a, b) = duel(Character::new("attacker", 10, 3));

        logic.start_round(vec![Move::new(dot, a, b)]).unwrap();
        logic.end_round().unwrap();
        assert_eq!(attribute(&logic, b, Attribute::Health), 8);

        for expected in [6, 4] {
            logic.start_round(vec![]).unwrap();
            assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 2);
            logic.end_round().unwrap();
            assert_eq!(attribute(&logic, b, Attribute::Health), expected);
        }
        assert_eq!(attribute(&logic, a, Attribute::CpuAvailable), 3);
        assert!(logic.stack().is_empty());
    }

    #[test]
    fn modifier_expires_after_its_duration() {
        let boost = SubroutineSpec::attribute_modifier(
            EffectSpec::new("overclock")
                .modify(Attribute::MaxCpu, 2)
                .grant(States::OVERCLOCKED),
        )
        .duration(1)
        .build()
        .unwrap();
        let (mut logic, a, _) = duel(Character::new("attacker", 10, 3));

        logic.start_round(vec![Move::new(boost, a, a)]).unwrap();
        logic.end_round().unwrap();
        let status = &logic.character(a).unwrap().status;
        assert!(status.has_state(States::OVERCLOCKED));
        assert_eq!(status.get_attribute(Attribute::CpuAvailable), 4);

        logic.start_round(vec![]).unwrap();
        logic.end_round().unwrap();
        let status = &logic.character(a).unwrap().status;
        assert!(!status.has_state(States::OVERCLOCKED));
        assert_eq!(status.get_attribute(Attribute::CpuAvailable), 3);
    }

    #[test]
    fn death_purges_pending_moves_and_effects() {
        let lethal = instant_hit(10);
        let slow = SubroutineSpec::direct_damage(2)
            .time_to_resolve(2)
            .cpu_slots(1)
            .build()
            .unwrap();
        let (mut logic, a, b) = duel(Character::new("attacker", 10, 20));
        let mark = StatusEffect::builder("marked")
            .modify(Attribute::MaxCpu, 1)
            .build()
            .unwrap();
        logic
            .roster
            .get_mut(b)
            .unwrap()
            .status
            .add_status_effect(mark);

        logic.start_round(vec![Move::new(slow, b, a)]).unwrap();
        logic.end_round().unwrap();
        assert_eq!(logic.stack().len(), 1);

        logic.start_round(vec![Move::new(lethal, a, b)]).unwrap();
        logic.end_round().unwrap();

        assert_eq!(logic.active_characters(), [a]);
        assert!(logic.stack().is_empty());
        assert_eq!(logic.all_moves_present().count(), 0);
        let defender = logic.character(b).unwrap();
        assert_eq!(defender.status.active_effects().count(), 0);
        assert!(!defender.is_alive());
        assert!(logic.offered_moves(b).is_empty());
    }

    #[test]
    fn unexecuted_modifier_leaves_identical_effect_alone() {
        let jam = || {
            EffectSpec::new("jammed")
                .modify(Attribute::MaxCpu, -1)
                .grant(States::CORRUPTED)
        };
        let lasting = SubroutineSpec::attribute_modifier(jam())
            .time_to_resolve(0)
            .duration(3)
            .build()
            .unwrap();
        let delayed = SubroutineSpec::attribute_modifier(jam())
            .time_to_resolve(1)
            .duration(1)
            .build()
            .unwrap();
        let roster = Roster::from_characters([
            Character::new("jammer", 10, 3),
            Character::new("victim", 10, 3),
            Character::new("late", 10, 3),
        ])
        .unwrap();
        let (a, b, c) = (CharacterId(0), CharacterId(1), CharacterId(2));
        let mut logic = CombatLogic::new(roster);

        logic.start_round(vec![Move::new(lasting, a, b)]).unwrap();
        logic.end_round().unwrap();
        assert!(logic.character(b).unwrap().status.has_state(States::CORRUPTED));

        logic
            .start_round(vec![
                Move::new(delayed, c, b),
                Move::new(instant_hit(10), b, c),
            ])
            .unwrap();
        logic.end_round().unwrap();

        assert!(!logic.is_active(c));
        let victim = &logic.character(b).unwrap().status;
        assert_eq!(victim.active_effects().count(), 1);
        assert!(victim.has_state(States::CORRUPTED));
        assert_eq!(victim.get_attribute(Attribute::MaxCpu), 2);
    }

    #[test]
    fn stale_moves_are_skipped_at_resolution() {
        let lethal = instant_hit(10);
        let (mut logic, a, b) = duel(Character::new("attacker", 10, 20));

        logic
            .start_round(vec![
                Move::new(lethal.clone(), a, b),
                Move::new(lethal, b, a),
            ])
            .unwrap();
        let executed = logic.end_round().unwrap();

        assert_eq!(executed.len(), 1);
        assert_eq!(logic.active_characters(), [a]);
    }

    #[test]
    fn rejected_submissions_change_nothing() {
        let hit = instant_hit(1);
        let (mut logic, a, b) = duel(Character::new("attacker", 10, 3));

        let duplicate = logic.start_round(vec![Move::new(hit.clone(), a, b), Move::wait(a)]);
        assert!(matches!(
            duplicate,
            Err(CombatError::DuplicateSubmission { user, .. }) if user == a
        ));

        let unknown = logic.start_round(vec![Move::new(hit, a, CharacterId(9))]);
        assert!(matches!(
            unknown,
            Err(CombatError::UnknownCharacter { id: CharacterId(9), .. })
        ));

        assert_eq!(logic.round(), 0);
        assert_eq!(logic.phase(), RoundPhase::Initialized);
        assert!(logic.stack().is_empty());
    }

    #[test]
    fn lifecycle_calls_must_alternate() {
        let (mut logic, a, _) = duel(Character::new("attacker", 10, 3));

        assert!(matches!(
            logic.end_round(),
            Err(CombatError::NoRoundInProgress { .. })
        ));
        logic.start_round(vec![Move::wait(a)]).unwrap();
        assert!(matches!(
            logic.start_round(vec![]),
            Err(CombatError::RoundInProgress { .. })
        ));
        logic.end_round().unwrap();
        assert_eq!(logic.phase(), RoundPhase::RoundEnded);
    }

    #[test]
    fn offered_moves_respect_available_cpu() {
        let cheap = SubroutineSpec::direct_damage(1).cpu_slots(1).build().unwrap();
        let pricey = SubroutineSpec::direct_damage(1).cpu_slots(3).build().unwrap();
        let slow = SubroutineSpec::direct_damage(1)
            .time_to_resolve(1)
            .cpu_slots(1)
            .build()
            .unwrap();
        let attacker = Character::new("attacker", 10, 3)
            .with_subroutine(cheap)
            .with_subroutine(pricey);
        let (mut logic, a, b) = duel(attacker);

        assert_eq!(logic.offered_moves(a).len(), 4);

        logic.start_round(vec![Move::new(slow, a, b)]).unwrap();
        logic.end_round().unwrap();

        let offered = logic.offered_moves(a);
        assert_eq!(offered.len(), 2);
        assert!(offered.iter().all(|mv| mv.subroutine.cpu_slots() == 1));
    }
}
