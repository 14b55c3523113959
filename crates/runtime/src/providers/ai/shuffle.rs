use std::collections::BTreeSet;

use combat_core::{CharacterId, CombatContext, Move, Roster};
use rand::seq::SliceRandom;

use crate::api::{MoveProvider, Selection, SelectionError};

/// Round-robin selection over distinct usable moves.
///
/// Moves count as the same when their descriptions match, so targets of one
/// subroutine share a slot in the cycle. Each call shuffles the candidates and
/// takes the first usable move not yet used this cycle. Once every usable
/// move has been used the cycle starts over, avoiding the move that closed
/// the previous cycle when another one is usable.
#[derive(Clone, Debug, Default)]
pub struct ShuffleAi {
    used: BTreeSet<String>,
    last: Option<String>,
}

impl ShuffleAi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the moves used in the current cycle.
    pub fn reset(&mut self) {
        self.used.clear();
        self.last = None;
    }

    fn next_unused<'a>(&self, candidates: &[&'a Move]) -> Option<&'a Move> {
        candidates
            .iter()
            .copied()
            .find(|mv| !self.used.contains(&mv.description()))
    }
}

impl MoveProvider for ShuffleAi {
    fn select_move(
        &mut self,
        user: CharacterId,
        offered: &[Move],
        roster: &Roster,
        context: &mut CombatContext,
    ) -> Result<Selection, SelectionError> {
        if offered.is_empty() {
            tracing::debug!(%user, "nothing offered, waiting");
            return Ok(Selection::ImplicitWait(Move::wait(user)));
        }

        let mut usable: Vec<&Move> = offered.iter().filter(|mv| mv.can_use(roster)).collect();
        if usable.is_empty() {
            return Err(SelectionError::NoUsableMove { user });
        }
        usable.shuffle(context.rng_mut());

        let chosen = match self.next_unused(&usable) {
            Some(mv) => mv,
            None => {
                tracing::trace!(%user, "shuffle cycle exhausted");
                self.used.clear();
                usable
                    .iter()
                    .copied()
                    .find(|mv| self.last.as_deref() != Some(mv.description().as_str()))
                    .unwrap_or(usable[0])
            }
        };
        let description = chosen.description();
        self.used.insert(description.clone());
        self.last = Some(description);

        tracing::debug!(%user, choice = %chosen, "shuffle selection");
        Ok(Selection::Chosen(chosen.clone()))
    }
}
