//! Content factory for building catalogs and rosters from data files.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;

use crate::loaders::{Catalog, CatalogLoader, LoadResult, RosterLoader};
use crate::specs::RosterSpec;

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── catalog.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the chassis/mod catalog from `catalog.ron`.
    pub fn load_catalog(&self, config: &CombatConfig) -> LoadResult<Catalog> {
        let path = self.data_dir.join("catalog.ron");
        CatalogLoader::load(&path, config)
    }

    /// Load the roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<RosterSpec> {
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
