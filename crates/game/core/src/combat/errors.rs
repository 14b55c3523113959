//! Errors raised by the round lifecycle.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::CharacterId;

/// Rejected round submissions and out-of-order lifecycle calls.
///
/// A call that returns one of these leaves the combat unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("character {id} is not part of this combat")]
    UnknownCharacter {
        id: CharacterId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("character {user} is dead and cannot submit a move")]
    InactiveUser {
        user: CharacterId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("character {user} submitted more than one move in round {}", .context.round)]
    DuplicateSubmission {
        user: CharacterId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("round {} has already started", .context.round)]
    RoundInProgress {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("no round is in progress (last round {})", .context.round)]
    NoRoundInProgress {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCharacter { .. } | Self::DuplicateSubmission { .. } => {
                ErrorSeverity::Validation
            }
            Self::InactiveUser { .. } => ErrorSeverity::Recoverable,
            Self::RoundInProgress { .. } | Self::NoRoundInProgress { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::UnknownCharacter { context, .. }
            | Self::InactiveUser { context, .. }
            | Self::DuplicateSubmission { context, .. }
            | Self::RoundInProgress { context }
            | Self::NoRoundInProgress { context } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCharacter { .. } => "COMBAT_UNKNOWN_CHARACTER",
            Self::InactiveUser { .. } => "COMBAT_INACTIVE_USER",
            Self::DuplicateSubmission { .. } => "COMBAT_DUPLICATE_SUBMISSION",
            Self::RoundInProgress { .. } => "COMBAT_ROUND_IN_PROGRESS",
            Self::NoRoundInProgress { .. } => "COMBAT_NO_ROUND_IN_PROGRESS",
        }
    }
}
