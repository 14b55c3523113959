use combat_core::{CharacterId, CombatContext, Move, Roster};

use crate::api::{MoveProvider, Selection, SelectionError};

/// Marks a character as driven by external input.
///
/// Never selects anything on its own; the runtime expects the move to be
/// supplied with the round instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct HumanProvider;

impl MoveProvider for HumanProvider {
    fn select_move(
        &mut self,
        user: CharacterId,
        _offered: &[Move],
        _roster: &Roster,
        _context: &mut CombatContext,
    ) -> Result<Selection, SelectionError> {
        Err(SelectionError::RequiresInput { user })
    }

    fn requires_input(&self) -> bool {
        true
    }
}
