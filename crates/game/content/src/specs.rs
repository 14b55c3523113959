//! Serializable content formats.
//!
//! These mirror the RON files under `data/`. Subroutine parameters stay raw
//! [`SubroutineSpec`]s here and are validated when a catalog is built.

use combat_core::SubroutineSpec;
use serde::{Deserialize, Serialize};

/// Chassis and mods available to characters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSpec {
    #[serde(default)]
    pub chassis: Vec<ChassisSpec>,
    #[serde(default)]
    pub mods: Vec<ModSpec>,
}

/// Base body of a character. Missing stats fall back to
/// [`CombatConfig`](combat_core::CombatConfig) defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChassisSpec {
    pub name: String,
    #[serde(default)]
    pub max_health: Option<i32>,
    #[serde(default)]
    pub max_cpu: Option<i32>,
}

/// Equippable mod granting one or more subroutines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSpec {
    pub name: String,
    pub subroutines: Vec<SubroutineSpec>,
}

/// Characters taking part in one combat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSpec {
    pub members: Vec<MemberSpec>,
}

/// One named character: its chassis, its mods and its team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    pub team: u8,
    pub chassis: String,
    #[serde(default)]
    pub mods: Vec<String>,
}
