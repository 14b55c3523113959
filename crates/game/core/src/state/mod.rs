//! Per-character combat state.
//!
//! This module owns the attribute store ([`Status`]), the modifier bundles
//! that stack on it ([`StatusEffect`]) and the participants that carry a
//! status ([`Character`], [`Roster`]).
pub mod attribute;
pub mod bounds;
pub mod character;
pub mod effect;
pub mod status;

pub use attribute::{Attribute, States};
pub use bounds::{Bound, BoundFn};
pub use character::{Character, CharacterId, CharacterSnapshot, Roster, RosterError};
pub use effect::{StatusEffect, StatusEffectBuilder, StatusEffectError};
pub use status::Status;
