//! Round-based combat resolution.
//!
//! # Architecture
//!
//! - [`Move`]: a subroutine bound to a user and a target
//! - [`CombatStack`]: timed buffer of pending move occurrences
//! - [`CombatLogic`]: round lifecycle, lifetime tracking and CPU accounting
//!
//! Every submitted move receives a fresh [`MoveId`], so two structurally
//! identical moves submitted in different rounds are tracked independently.

mod errors;
mod logic;
mod moves;
mod stack;

pub use errors::CombatError;
pub use logic::{CombatLogic, RoundPhase};
pub use moves::{Move, MoveId, TrackedMove};
pub use stack::{CombatStack, StackEntry};
