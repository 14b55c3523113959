//! Public API surface for runtime consumers.
pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{MoveProvider, Selection, SelectionError, WaitMoveProvider};
