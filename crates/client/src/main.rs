//! Command-line combat simulator.
mod config;
mod input;
mod presentation;

use std::io;

use anyhow::Result;
use combat_content::{Catalog, CatalogLoader, RosterLoader, build_combatants};
use combat_core::{CharacterId, CharacterSnapshot, CombatConfig, GameError};
use combat_runtime::{
    CombatRuntime, HumanProvider, Outcome, RoundReport, RuntimeConfig, RuntimeError, ShuffleAi,
    Team,
};
use config::SimConfig;
use serde::Serialize;

/// Final state printed with `SIM_JSON`.
#[derive(Serialize)]
struct Summary {
    seed: u64,
    rounds: u32,
    outcome: Outcome,
    characters: Vec<CharacterSnapshot>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let sim = SimConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();
    let mut runtime = build_runtime(&sim, runtime_config)?;

    let mut last_report = None;
    let outcome = match runtime.context().player() {
        Some(player) => {
            play_interactive(&mut runtime, player, sim.json_output, &mut last_report)?
        }
        None => runtime
            .run_to_completion(|report| {
                if !sim.json_output {
                    print!("{}", presentation::render_round(report));
                }
                last_report = Some(report.clone());
            })
            .map_err(describe_error)?,
    };

    if sim.json_output {
        let summary = Summary {
            seed: runtime.config().seed,
            rounds: runtime.logic().round(),
            outcome,
            characters: last_report
                .map(|report| report.characters)
                .unwrap_or_else(|| {
                    runtime
                        .logic()
                        .roster()
                        .iter()
                        .map(|character| character.snapshot())
                        .collect()
                }),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{outcome} after {} rounds", runtime.logic().round());
    }

    Ok(())
}

/// Stderr logging; `RUST_LOG` refines the default `info` level.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn build_runtime(sim: &SimConfig, config: RuntimeConfig) -> Result<CombatRuntime> {
    let combat_config = CombatConfig::default();
    let catalog = match &sim.catalog_path {
        Some(path) => CatalogLoader::load(path, &combat_config)?,
        None => Catalog::embedded(&combat_config)?,
    };
    let roster = match &sim.roster_path {
        Some(path) => RosterLoader::load(path)?,
        None => RosterLoader::embedded()?,
    };
    tracing::info!(
        chassis = catalog.chassis_names().count(),
        mods = catalog.mod_names().count(),
        members = roster.members.len(),
        seed = config.seed,
        "content loaded"
    );

    let player = config.player.clone();
    let mut builder = CombatRuntime::builder().config(config);
    for combatant in build_combatants(&catalog, &roster)? {
        let team = Team(combatant.team);
        builder = if player.as_deref() == Some(combatant.character.name()) {
            builder.combatant(combatant.character, team, HumanProvider)
        } else {
            builder.combatant(combatant.character, team, ShuffleAi::new())
        };
    }
    builder.build().map_err(describe_error)
}

fn play_interactive(
    runtime: &mut CombatRuntime,
    player: CharacterId,
    quiet: bool,
    last_report: &mut Option<RoundReport>,
) -> Result<Outcome> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    while !runtime.outcome().is_finished() && !runtime.enforce_round_limit() {
        let mut external = Vec::new();
        if runtime.logic().is_active(player) {
            let characters: Vec<CharacterSnapshot> = runtime
                .logic()
                .roster()
                .iter()
                .map(|character| character.snapshot())
                .collect();
            let offered = runtime.offered_moves(player);
            external.push(input::prompt_move(
                player,
                &offered,
                &characters,
                &mut input,
                &mut output,
            )?);
        }

        let report = runtime.run_round(external).map_err(describe_error)?;
        if !quiet {
            print!("{}", presentation::render_round(&report));
        }
        *last_report = Some(report);
    }

    Ok(runtime.outcome())
}

/// Tags a runtime error with its code and, when present, its round context.
fn describe_error(err: RuntimeError) -> anyhow::Error {
    let tag = match err.context() {
        Some(context) => format!("{} ({context})", err.error_code()),
        None => err.error_code().to_owned(),
    };
    anyhow::Error::new(err).context(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatError, ErrorContext};

    #[test]
    fn described_errors_carry_code_and_context() {
        let err = RuntimeError::Combat(CombatError::InactiveUser {
            user: CharacterId(1),
            context: ErrorContext::new(4).with_actor(CharacterId(1)),
        });

        let described = describe_error(err);
        assert_eq!(
            described.to_string(),
            "COMBAT_INACTIVE_USER (round 4, actor #1)"
        );
        assert!(described.downcast_ref::<RuntimeError>().is_some());
    }

    #[test]
    fn context_free_errors_carry_the_code() {
        let described = describe_error(RuntimeError::NoCombatants);
        assert_eq!(described.to_string(), "RUNTIME_NO_COMBATANTS");
    }
}
