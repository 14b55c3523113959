//! Abstraction for sourcing each character's move.
//!
//! Runtime users plug in [`MoveProvider`] implementations so a combat can run
//! with human input, scripted fixtures, or AI policies.
use combat_core::{CharacterId, CombatContext, ErrorSeverity, GameError, Move, Roster};

/// Successful outcome of a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// A move picked from the offered candidates.
    Chosen(Move),
    /// No candidates were offered at all; a no-op wait aimed at the user.
    ImplicitWait(Move),
}

impl Selection {
    pub fn into_move(self) -> Move {
        match self {
            Selection::Chosen(mv) | Selection::ImplicitWait(mv) => mv,
        }
    }
}

/// Reasons a provider could not pick a move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no usable move offered to {user}")]
    NoUsableMove { user: CharacterId },

    #[error("{user} is controlled by external input")]
    RequiresInput { user: CharacterId },
}

impl GameError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoUsableMove { .. } => "SELECTION_NO_USABLE_MOVE",
            Self::RequiresInput { .. } => "SELECTION_REQUIRES_INPUT",
        }
    }
}

/// Trait for choosing a move for one character each round.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI policies
/// - Scripted/replayed moves
/// - Testing fixtures
pub trait MoveProvider {
    /// Pick one of `offered` for `user`.
    ///
    /// # Arguments
    /// * `user` - The character that needs to act
    /// * `offered` - Candidate moves; not all of them are necessarily usable
    /// * `roster` - Read-only view of every participant, for usability checks
    /// * `context` - Session context holding the shared random source
    fn select_move(
        &mut self,
        user: CharacterId,
        offered: &[Move],
        roster: &Roster,
        context: &mut CombatContext,
    ) -> Result<Selection, SelectionError>;

    /// Returns true if this provider never selects on its own and its moves
    /// must arrive with the round as external input.
    fn requires_input(&self) -> bool {
        false
    }
}

/// A simple move provider that always waits.
/// Useful for testing or as a fallback.
pub struct WaitMoveProvider;

impl MoveProvider for WaitMoveProvider {
    fn select_move(
        &mut self,
        user: CharacterId,
        _offered: &[Move],
        _roster: &Roster,
        _context: &mut CombatContext,
    ) -> Result<Selection, SelectionError> {
        Ok(Selection::Chosen(Move::wait(user)))
    }
}
