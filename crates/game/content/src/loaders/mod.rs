//! Content loaders for reading combat data from files.
//!
//! This module converts RON files into validated catalogs and rosters.
//! All loaders use the formats defined in [`crate::specs`].

pub mod catalog;
pub mod factory;
pub mod roster;

pub use catalog::{Catalog, CatalogLoader, ChassisDefinition, ModDefinition};
pub use factory::ContentFactory;
pub use roster::{Combatant, RosterLoader, build_combatants};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
