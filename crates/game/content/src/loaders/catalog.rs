//! Chassis and mod catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{Character, CombatConfig, Subroutine};

use crate::loaders::{LoadResult, read_file};
use crate::specs::{CatalogSpec, MemberSpec};

/// Catalog bundled with the crate.
pub const DEFAULT_CATALOG: &str = include_str!("../../data/catalog.ron");

/// Chassis with its stats resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChassisDefinition {
    pub name: String,
    pub max_health: i32,
    pub max_cpu: i32,
}

/// Mod with every subroutine validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModDefinition {
    pub name: String,
    pub subroutines: Vec<Subroutine>,
}

/// Validated catalog, indexed by name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    chassis: BTreeMap<String, ChassisDefinition>,
    mods: BTreeMap<String, ModDefinition>,
}

impl Catalog {
    /// Validates `spec`, filling missing chassis stats from `config`.
    pub fn from_spec(spec: CatalogSpec, config: &CombatConfig) -> LoadResult<Self> {
        let mut catalog = Self::default();

        for chassis in spec.chassis {
            let definition = ChassisDefinition {
                max_health: chassis.max_health.unwrap_or(config.default_max_health),
                max_cpu: chassis.max_cpu.unwrap_or(config.default_max_cpu),
                name: chassis.name,
            };
            if definition.max_health < 1 || definition.max_cpu < 0 {
                return Err(anyhow::anyhow!(
                    "Invalid chassis '{}': max_health must be at least 1 and max_cpu non-negative",
                    definition.name
                ));
            }
            if catalog.chassis.contains_key(&definition.name) {
                return Err(anyhow::anyhow!("Duplicate chassis '{}'", definition.name));
            }
            catalog.chassis.insert(definition.name.clone(), definition);
        }

        for module in spec.mods {
            let subroutines = module
                .subroutines
                .iter()
                .enumerate()
                .map(|(index, sub)| {
                    sub.build().map_err(|e| {
                        anyhow::anyhow!(
                            "Invalid subroutine #{} in mod '{}': {}",
                            index,
                            module.name,
                            e
                        )
                    })
                })
                .collect::<LoadResult<Vec<_>>>()?;
            if catalog.mods.contains_key(&module.name) {
                return Err(anyhow::anyhow!("Duplicate mod '{}'", module.name));
            }
            catalog.mods.insert(
                module.name.clone(),
                ModDefinition {
                    name: module.name,
                    subroutines,
                },
            );
        }

        tracing::debug!(
            chassis = catalog.chassis.len(),
            mods = catalog.mods.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses and validates a RON catalog.
    pub fn from_ron(content: &str, config: &CombatConfig) -> LoadResult<Self> {
        let spec: CatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        Self::from_spec(spec, config)
    }

    /// The catalog bundled with the crate.
    pub fn embedded(config: &CombatConfig) -> LoadResult<Self> {
        Self::from_ron(DEFAULT_CATALOG, config)
    }

    pub fn chassis(&self, name: &str) -> Option<&ChassisDefinition> {
        self.chassis.get(name)
    }

    pub fn module(&self, name: &str) -> Option<&ModDefinition> {
        self.mods.get(name)
    }

    pub fn chassis_names(&self) -> impl Iterator<Item = &str> {
        self.chassis.keys().map(String::as_str)
    }

    pub fn mod_names(&self) -> impl Iterator<Item = &str> {
        self.mods.keys().map(String::as_str)
    }

    /// Builds a character from a roster member.
    ///
    /// Fails with an error naming the chassis or mod if either is unknown.
    pub fn build_character(&self, member: &MemberSpec) -> LoadResult<Character> {
        let chassis = self.chassis(&member.chassis).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown chassis '{}' for character '{}'",
                member.chassis,
                member.name
            )
        })?;

        let mut character = Character::new(&member.name, chassis.max_health, chassis.max_cpu);
        for mod_name in &member.mods {
            let module = self.module(mod_name).ok_or_else(|| {
                anyhow::anyhow!("Unknown mod '{}' for character '{}'", mod_name, member.name)
            })?;
            for subroutine in &module.subroutines {
                character.grant(subroutine.clone());
            }
        }
        Ok(character)
    }
}

/// Loader for catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    ///
    /// RON format: [`CatalogSpec`]
    pub fn load(path: &Path, config: &CombatConfig) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Catalog::from_ron(&content, config)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }
}
