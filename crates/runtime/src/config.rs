//! Runtime configuration.

use std::env;

/// Settings for one combat session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Seed for the session's random source.
    pub seed: u64,
    /// Rounds played by [`CombatRuntime::run_to_completion`](crate::CombatRuntime::run_to_completion)
    /// before declaring a stalemate.
    pub max_rounds: u32,
    /// Name of the character driven by external input, if any.
    pub player: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            player: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_SEED: u64 = 0;
    pub const DEFAULT_MAX_ROUNDS: u32 = 50;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Random seed (default: 0)
    /// - `COMBAT_MAX_ROUNDS` - Round limit (default: 50, minimum 1)
    /// - `COMBAT_PLAYER` - Name of the human-controlled character (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("COMBAT_SEED") {
            config.seed = seed;
        }
        if let Some(rounds) = read_env::<u32>("COMBAT_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Some(player) = env::var("COMBAT_PLAYER").ok().filter(|name| !name.is_empty()) {
            config.player = Some(player);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
