use combat_core::{CharacterId, CombatContext, Move, Roster};
use rand::seq::SliceRandom;

use crate::api::{MoveProvider, Selection, SelectionError};

/// Picks uniformly among the usable offered moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAi;

impl RandomAi {
    pub fn new() -> Self {
        Self
    }
}

impl MoveProvider for RandomAi {
    fn select_move(
        &mut self,
        user: CharacterId,
        offered: &[Move],
        roster: &Roster,
        context: &mut CombatContext,
    ) -> Result<Selection, SelectionError> {
        let usable: Vec<&Move> = offered.iter().filter(|mv| mv.can_use(roster)).collect();

        let Some(&chosen) = usable.choose(context.rng_mut()) else {
            return Err(SelectionError::NoUsableMove { user });
        };
        tracing::debug!(%user, choice = %chosen, candidates = usable.len(), "random selection");
        Ok(Selection::Chosen(chosen.clone()))
    }
}
