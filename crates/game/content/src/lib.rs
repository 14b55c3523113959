//! Data-driven combat content and loaders.
//!
//! This crate houses the chassis/mod catalog and roster definitions:
//! - Chassis: base health and CPU budget (data-driven via RON)
//! - Mods: named bundles of subroutine specs (data-driven via RON)
//! - Rosters: named characters assembled from a chassis and mods, on teams
//!
//! Every subroutine spec is validated through the combat-core builders when
//! a catalog is loaded, so malformed content is rejected before combat starts.

pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use specs::{CatalogSpec, ChassisSpec, MemberSpec, ModSpec, RosterSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    Catalog, CatalogLoader, ChassisDefinition, Combatant, ContentFactory, ModDefinition,
    RosterLoader, build_combatants,
};
