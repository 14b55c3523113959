//! Attribute keys and boolean states tracked by [`Status`](super::Status).

use bitflags::bitflags;

/// Numeric attribute tracked per character.
///
/// Attribute values default to 0 until set. Bounds are registered separately
/// through [`Status::set_attribute_bounds`](super::Status::set_attribute_bounds).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Attribute {
    /// Current hit points. A character with 0 health is dead.
    Health,
    /// Upper bound for [`Attribute::Health`].
    MaxHealth,
    /// Absorbs damage before health does.
    Shield,
    /// CPU slots free for new moves this round.
    CpuAvailable,
    /// CPU budget restored at the start of every round.
    MaxCpu,
}

bitflags! {
    /// Boolean states a character can be in.
    ///
    /// States can be set directly or forced by status effects. A state
    /// prevented by any active effect always reads as unset.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct States: u8 {
        /// Cannot use any subroutine except waiting.
        const DISABLED     = 1 << 0;
        /// Cannot be targeted by other characters.
        const UNTARGETABLE = 1 << 1;
        /// Marker granted by CPU boosts.
        const OVERCLOCKED  = 1 << 2;
        /// Marker granted by debuffs.
        const CORRUPTED    = 1 << 3;
    }
}
