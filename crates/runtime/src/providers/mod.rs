//! Move provider implementations for different character behaviors.

pub mod ai;
pub mod human;

pub use human::HumanProvider;
