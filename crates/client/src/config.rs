//! Simulator configuration.

use std::env;
use std::path::PathBuf;

/// Where the simulator reads content from and how it prints results.
#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    /// Catalog file; the embedded catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Roster file; the embedded roster is used when unset.
    pub roster_path: Option<PathBuf>,
    /// Print a JSON summary instead of the round log.
    pub json_output: bool,
}

impl SimConfig {
    /// Environment variables:
    /// - `SIM_CATALOG` - Path to a catalog RON file
    /// - `SIM_ROSTER` - Path to a roster RON file
    /// - `SIM_JSON` - Emit a JSON summary (default: false)
    pub fn from_env() -> Self {
        Self {
            catalog_path: read_env_path("SIM_CATALOG"),
            roster_path: read_env_path("SIM_ROSTER"),
            json_output: read_env_bool("SIM_JSON").unwrap_or(false),
        }
    }
}

fn read_env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
