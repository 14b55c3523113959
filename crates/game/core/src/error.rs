//! Common error infrastructure for combat-core.
//!
//! This module provides shared types and traits used across all error types in
//! combat-core. Domain-specific errors (e.g., `SubroutineError`, `CombatError`)
//! are defined in their respective modules alongside the operations they
//! validate.
//!
//! # Error Categories
//!
//! - **Invariant violations** are never returned as errors. They panic at the
//!   call site (using a subroutine whose `can_use` is false, removing an absent
//!   status effect, inverted attribute bounds, advancing the stack twice).
//! - **Construction errors** reject malformed subroutines and effects before
//!   they ever reach combat.
//! - **Submission errors** reject malformed round submissions without mutating
//!   the combat.

use crate::state::CharacterId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed with an alternative move
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted combat state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller can pick a different move.
    ///
    /// Examples: no usable move, dead character submitted
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative damage, overlapping granted/prevented states
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: round phases called out of order
    Internal,

    /// Fatal error - combat state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Character that triggered the error (if applicable).
    pub actor: Option<CharacterId>,

    /// Combat round at the time of error.
    pub round: u32,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given round.
    #[must_use]
    pub const fn new(round: u32) -> Self {
        Self {
            actor: None,
            round,
            message: None,
        }
    }

    /// Attaches an actor to this context (builder pattern).
    #[must_use]
    pub const fn with_actor(mut self, actor: CharacterId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl core::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "round {}", self.round)?;
        if let Some(actor) = self.actor {
            write!(f, ", actor {actor}")?;
        }
        if let Some(message) = self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all combat errors.
///
/// This trait provides a uniform interface for error classification and context
/// retrieval across all error types in the workspace.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Include `ErrorContext` in variants that need debugging info
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_display_lists_known_fields() {
        assert_eq!(ErrorContext::new(3).to_string(), "round 3");
        assert_eq!(
            ErrorContext::new(2)
                .with_actor(CharacterId(1))
                .with_message("one move per character per round")
                .to_string(),
            "round 2, actor #1: one move per character per round"
        );
    }
}
