//! Roster loader.

use std::path::Path;

use combat_core::Character;

use crate::loaders::{Catalog, LoadResult, read_file};
use crate::specs::RosterSpec;

/// Roster bundled with the crate, built from the default catalog.
pub const DEFAULT_ROSTER: &str = include_str!("../../data/roster.ron");

/// A character assembled from the catalog, with its team.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub character: Character,
    pub team: u8,
}

/// Loader for roster definitions from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: [`RosterSpec`]
    pub fn load(path: &Path) -> LoadResult<RosterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RosterSpec> {
        let spec: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        if spec.members.is_empty() {
            return Err(anyhow::anyhow!("Roster has no members"));
        }
        Ok(spec)
    }

    /// The roster bundled with the crate.
    pub fn embedded() -> LoadResult<RosterSpec> {
        Self::parse(DEFAULT_ROSTER)
    }
}

/// Builds every roster member against `catalog`, in roster order.
pub fn build_combatants(catalog: &Catalog, spec: &RosterSpec) -> LoadResult<Vec<Combatant>> {
    let mut seen = std::collections::BTreeSet::new();
    spec.members
        .iter()
        .map(|member| {
            if !seen.insert(member.name.as_str()) {
                return Err(anyhow::anyhow!("Duplicate character name '{}'", member.name));
            }
            Ok(Combatant {
                character: catalog.build_character(member)?,
                team: member.team,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::CombatConfig;

    #[test]
    fn embedded_roster_builds_against_embedded_catalog() {
        let catalog = Catalog::embedded(&CombatConfig::default()).unwrap();
        let roster = RosterLoader::embedded().unwrap();

        let combatants = build_combatants(&catalog, &roster).unwrap();
        assert_eq!(combatants.len(), roster.members.len());

        let teams: std::collections::BTreeSet<_> = combatants.iter().map(|c| c.team).collect();
        assert!(teams.len() >= 2);
        assert!(
            combatants
                .iter()
                .all(|c| !c.character.subroutines().is_empty())
        );
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(RosterLoader::parse("(members: [])").is_err());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let catalog = Catalog::from_ron(
            r#"(chassis: [(name: "frame")])"#,
            &CombatConfig::default(),
        )
        .unwrap();
        let roster = RosterLoader::parse(
            r#"(members: [
                (name: "vex", team: 0, chassis: "frame"),
                (name: "vex", team: 1, chassis: "frame"),
            ])"#,
        )
        .unwrap();

        let err = build_combatants(&catalog, &roster).unwrap_err();
        assert!(err.to_string().contains("vex"));
    }
}
