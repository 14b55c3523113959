/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// CPU budget given to characters whose chassis does not specify one.
    pub default_max_cpu: i32,
    /// Health given to characters whose chassis does not specify one.
    pub default_max_health: i32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of characters taking part in a single combat.
    pub const MAX_PARTICIPANTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_CPU: i32 = 3;
    pub const DEFAULT_MAX_HEALTH: i32 = 10;

    pub fn new() -> Self {
        Self {
            default_max_cpu: Self::DEFAULT_MAX_CPU,
            default_max_health: Self::DEFAULT_MAX_HEALTH,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
