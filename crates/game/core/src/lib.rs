//! Deterministic combat rules shared across the runtime and content crates.
//!
//! `combat-core` defines the canonical combat model: the effect-aware
//! attribute store ([`Status`]), the closed set of [`Subroutine`] variants,
//! the timed [`CombatStack`] and the round orchestrator [`CombatLogic`].
//! All combat state mutation flows through [`CombatLogic`]; presentation
//! layers only read it back through queries and [`CharacterSnapshot`]s.
pub mod combat;
pub mod config;
pub mod context;
pub mod error;
pub mod state;
pub mod subroutine;

pub use combat::{
    CombatError, CombatLogic, CombatStack, Move, MoveId, RoundPhase, StackEntry, TrackedMove,
};
pub use config::CombatConfig;
pub use context::CombatContext;
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    Attribute, Bound, Character, CharacterId, CharacterSnapshot, Roster, RosterError, States,
    Status, StatusEffect, StatusEffectBuilder, StatusEffectError,
};
pub use subroutine::{
    DamageDealt, EffectSpec, SpecKind, Subroutine, SubroutineEffect, SubroutineError,
    SubroutineSpec, Targeting, damage_target,
};
