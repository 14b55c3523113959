//! Automatic move-selection policies.
//!
//! Both policies draw randomness from the session's
//! [`CombatContext`](combat_core::CombatContext), so a seeded context replays
//! the same choices.
//!
//! - [`RandomAi`]: uniform pick among usable moves
//! - [`ShuffleAi`]: round-robin over distinct usable moves

pub mod random;
pub mod shuffle;

pub use random::RandomAi;
pub use shuffle::ShuffleAi;
