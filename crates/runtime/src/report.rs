//! Round reports and combat outcomes.

use std::fmt;

use combat_core::{CharacterSnapshot, TrackedMove};
use serde::Serialize;

/// Side a character fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Team(pub u8);

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", self.0)
    }
}

/// State of a combat after a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// At least two teams still have living members.
    Ongoing,
    /// Only this team has living members.
    Victory(Team),
    /// Every character is dead.
    Draw,
    /// The round limit was reached first.
    Stalemate,
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Victory(team) => write!(f, "{team} wins"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Everything that happened in one round.
#[derive(Clone, Debug, Serialize)]
pub struct RoundReport {
    pub round: u32,
    /// Moves submitted this round, with their assigned ids.
    pub submitted: Vec<TrackedMove>,
    /// Moves executed at the end of this round.
    pub resolved: Vec<TrackedMove>,
    pub outcome: Outcome,
    /// Every participant after the round, in roster order.
    pub characters: Vec<CharacterSnapshot>,
}
