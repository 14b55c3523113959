//! Runtime orchestration for round-based subroutine combat.
//!
//! This crate wires the move provider abstraction and the combat engine into
//! a round driver. Consumers build a [`CombatRuntime`] with one provider per
//! character and play it round by round.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the round driver and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] holds the AI and human move providers
//! - [`report`] describes round results and combat outcomes
pub mod api;
pub mod config;
pub mod providers;
pub mod report;
pub mod runtime;

pub use api::{
    MoveProvider, Result, RuntimeError, Selection, SelectionError, WaitMoveProvider,
};
pub use config::RuntimeConfig;
pub use providers::HumanProvider;
pub use providers::ai::{RandomAi, ShuffleAi};
pub use report::{Outcome, RoundReport, Team};
pub use runtime::{CombatRuntime, RuntimeBuilder};
