use std::fmt;

use crate::state::{CharacterId, Roster};
use crate::subroutine::Subroutine;

/// A subroutine bound to a user and a target.
///
/// Equality is structural; use [`MoveId`] to tell occurrences apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Move {
    pub subroutine: Subroutine,
    pub user: CharacterId,
    pub target: CharacterId,
}

impl Move {
    pub fn new(subroutine: Subroutine, user: CharacterId, target: CharacterId) -> Self {
        Self {
            subroutine,
            user,
            target,
        }
    }

    /// No-op move aimed at `user`.
    pub fn wait(user: CharacterId) -> Self {
        Self::new(Subroutine::wait(), user, user)
    }

    /// Returns true if both participants exist and the subroutine is usable.
    pub fn can_use(&self, roster: &Roster) -> bool {
        match (roster.get(self.user), roster.get(self.target)) {
            (Some(user), Some(target)) => self.subroutine.can_use(user, target),
            _ => false,
        }
    }

    pub fn description(&self) -> String {
        self.subroutine.description()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.user,
            self.target,
            self.subroutine.description()
        )
    }
}

/// Identity of one move occurrence, assigned when the move is submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveId(pub u64);

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// A submitted move together with its occurrence id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackedMove {
    pub id: MoveId,
    pub mv: Move,
}
