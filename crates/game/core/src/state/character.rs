//! Combat participants and the roster that owns them.

use std::fmt;

use arrayvec::ArrayVec;

use super::{Attribute, Bound, Status};
use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::subroutine::Subroutine;

/// Identity of a character within a [`Roster`].
///
/// Moves target characters by identity, never by value: two characters with
/// identical stats are still different participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A combat participant: a status plus the subroutines its mods grant.
#[derive(Clone, Debug)]
pub struct Character {
    id: CharacterId,
    name: String,
    pub status: Status,
    subroutines: Vec<Subroutine>,
}

impl Character {
    /// Creates a character with the default attribute bounds:
    ///
    /// - `Health ∈ [0, MaxHealth]`, starting full
    /// - `MaxHealth ∈ [1, ∞)`
    /// - `Shield ∈ [0, ∞)`
    /// - `CpuAvailable ∈ [0, MaxCpu]`, starting full
    /// - `MaxCpu ∈ [0, ∞)`
    ///
    /// The id is assigned when the character joins a [`Roster`].
    pub fn new(name: impl Into<String>, max_health: i32, max_cpu: i32) -> Self {
        let mut status = Status::new();
        status.set_attribute_bounds(Attribute::MaxHealth, 1, Bound::MAX);
        status.set_attribute(Attribute::MaxHealth, max_health);
        status.set_attribute_bounds(Attribute::Health, 0, Attribute::MaxHealth);
        status.set_attribute(Attribute::Health, max_health);
        status.set_attribute_bounds(Attribute::Shield, 0, Bound::MAX);
        status.set_attribute_bounds(Attribute::MaxCpu, 0, Bound::MAX);
        status.set_attribute(Attribute::MaxCpu, max_cpu);
        status.set_attribute_bounds(Attribute::CpuAvailable, 0, Attribute::MaxCpu);
        status.set_attribute(Attribute::CpuAvailable, max_cpu);

        Self {
            id: CharacterId(u32::MAX),
            name: name.into(),
            status,
            subroutines: Vec::new(),
        }
    }

    /// Builder-style variant of [`Character::grant`].
    pub fn with_subroutine(mut self, subroutine: Subroutine) -> Self {
        self.grant(subroutine);
        self
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Makes `subroutine` available to this character.
    pub fn grant(&mut self, subroutine: Subroutine) {
        self.subroutines.push(subroutine);
    }

    /// Subroutines this character can currently pick from.
    pub fn subroutines(&self) -> &[Subroutine] {
        &self.subroutines
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.status.is_dead()
    }

    /// Read-only view used for health/CPU bar rendering.
    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            id: self.id,
            name: self.name.clone(),
            health: self.status.get_attribute(Attribute::Health),
            max_health: self.status.get_attribute(Attribute::MaxHealth),
            shield: self.status.get_attribute(Attribute::Shield),
            cpu_available: self.status.get_attribute(Attribute::CpuAvailable),
            max_cpu: self.status.get_attribute(Attribute::MaxCpu),
            effects: self
                .status
                .active_effects()
                .map(|effect| effect.label().to_owned())
                .collect(),
            alive: self.is_alive(),
        }
    }
}

/// Presentation snapshot of a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub id: CharacterId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub shield: i32,
    pub cpu_available: i32,
    pub max_cpu: i32,
    pub effects: Vec<String>,
    pub alive: bool,
}

/// Fixed set of characters taking part in one combat.
///
/// Ids are handed out sequentially on insertion and index directly into the
/// roster.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    characters: ArrayVec<Character, { CombatConfig::MAX_PARTICIPANTS }>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from `characters`, assigning ids in iteration order.
    pub fn from_characters(
        characters: impl IntoIterator<Item = Character>,
    ) -> Result<Self, RosterError> {
        let mut roster = Self::new();
        for character in characters {
            roster.add(character)?;
        }
        Ok(roster)
    }

    /// Adds a character and returns its assigned id.
    pub fn add(&mut self, mut character: Character) -> Result<CharacterId, RosterError> {
        let id = CharacterId(self.characters.len() as u32);
        character.id = id;
        self.characters
            .try_push(character)
            .map_err(|_| RosterError::Full {
                capacity: CombatConfig::MAX_PARTICIPANTS,
            })?;
        Ok(id)
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0 as usize)
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up a character by display name.
    pub fn find(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.characters.iter().map(Character::id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Returns true if `id` names a living character.
    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.get(id).is_some_and(Character::is_alive)
    }
}

/// Errors raised while assembling a [`Roster`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("roster is full ({capacity} participants)")]
    Full { capacity: usize },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "ROSTER_FULL",
        }
    }
}
