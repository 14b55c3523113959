//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat engine and move providers so clients can
//! bubble them up with consistent context.
use combat_core::{
    CharacterId, CombatError, ErrorContext, ErrorSeverity, GameError, RosterError,
};
use thiserror::Error;

use crate::report::Outcome;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no move provider set for {character}")]
    ProviderNotSet { character: CharacterId },

    #[error("waiting for external input for {character}")]
    AwaitingInput { character: CharacterId },

    #[error("combat already finished: {outcome}")]
    CombatFinished { outcome: Outcome },

    #[error("runtime requires at least one combatant")]
    NoCombatants,

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AwaitingInput { .. } => ErrorSeverity::Recoverable,
            Self::ProviderNotSet { .. } | Self::NoCombatants => ErrorSeverity::Validation,
            Self::CombatFinished { .. } => ErrorSeverity::Internal,
            Self::Combat(err) => err.severity(),
            Self::Roster(err) => err.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Combat(err) => err.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            Self::AwaitingInput { .. } => "RUNTIME_AWAITING_INPUT",
            Self::CombatFinished { .. } => "RUNTIME_COMBAT_FINISHED",
            Self::NoCombatants => "RUNTIME_NO_COMBATANTS",
            Self::Combat(err) => err.error_code(),
            Self::Roster(err) => err.error_code(),
        }
    }
}
