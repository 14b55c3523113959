use combat_content::{Catalog, RosterLoader, build_combatants};
use combat_core::{
    Attribute, Character, CharacterId, CombatConfig, GameError, Move, SubroutineSpec,
};
use combat_runtime::{
    CombatRuntime, HumanProvider, Outcome, RuntimeConfig, RuntimeError, ShuffleAi, Team,
    WaitMoveProvider,
};

fn jab() -> combat_core::Subroutine {
    SubroutineSpec::direct_damage(3)
        .time_to_resolve(0)
        .cpu_slots(1)
        .build()
        .unwrap()
}

#[test]
fn instant_hit_lands_and_cpu_returns_next_round() {
    let mut runtime = CombatRuntime::builder()
        .combatant(
            Character::new("striker", 10, 3).with_subroutine(jab()),
            Team(0),
            HumanProvider,
        )
        .combatant(Character::new("dummy", 10, 3), Team(1), WaitMoveProvider)
        .build()
        .unwrap();
    let (striker, dummy) = (CharacterId(0), CharacterId(1));

    let report = runtime
        .run_round(vec![Move::new(jab(), striker, dummy)])
        .unwrap();

    assert_eq!(report.round, 1);
    assert_eq!(report.submitted.len(), 2);
    assert_eq!(report.resolved.len(), 2);
    assert_eq!(report.characters[1].health, 7);
    assert_eq!(report.characters[0].cpu_available, 3);
    assert_eq!(report.outcome, Outcome::Ongoing);
}

#[test]
fn human_characters_wait_for_input() {
    let mut runtime = CombatRuntime::builder()
        .combatant(Character::new("player", 10, 3), Team(0), HumanProvider)
        .combatant(Character::new("dummy", 10, 3), Team(1), WaitMoveProvider)
        .build()
        .unwrap();

    let err = runtime.run_round(Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::AwaitingInput { character: CharacterId(0) }
    ));
    assert_eq!(runtime.logic().round(), 0);

    runtime.run_round(vec![Move::wait(CharacterId(0))]).unwrap();
    assert_eq!(runtime.logic().round(), 1);
}

#[test]
fn victory_ends_the_combat() {
    let mut runtime = CombatRuntime::builder()
        .combatant(
            Character::new("striker", 10, 3).with_subroutine(jab()),
            Team(0),
            ShuffleAi::new(),
        )
        .combatant(Character::new("dummy", 3, 3), Team(1), ShuffleAi::new())
        .build()
        .unwrap();

    let mut rounds = 0;
    let outcome = runtime.run_to_completion(|_| rounds += 1).unwrap();

    assert_eq!(outcome, Outcome::Victory(Team(0)));
    assert_eq!(rounds, 1);
    assert!(matches!(
        runtime.run_round(Vec::new()),
        Err(RuntimeError::CombatFinished { .. })
    ));
}

#[test]
fn round_limit_yields_stalemate() {
    let config = RuntimeConfig {
        max_rounds: 4,
        ..Default::default()
    };
    let mut runtime = CombatRuntime::builder()
        .config(config)
        .combatant(Character::new("a", 10, 3), Team(0), WaitMoveProvider)
        .combatant(Character::new("b", 10, 3), Team(1), ShuffleAi::new())
        .build()
        .unwrap();

    let outcome = runtime.run_to_completion(|_| {}).unwrap();

    assert_eq!(outcome, Outcome::Stalemate);
    assert_eq!(runtime.logic().round(), 4);
}

#[test]
fn roster_without_survivors_is_a_draw() {
    let mut fallen = Character::new("fallen", 5, 3);
    fallen.status.set_attribute(Attribute::Health, 0);
    let mut runtime = CombatRuntime::builder()
        .combatant(fallen.clone(), Team(0), WaitMoveProvider)
        .combatant(fallen, Team(1), WaitMoveProvider)
        .build()
        .unwrap();

    assert_eq!(runtime.outcome(), Outcome::Draw);
    assert!(matches!(
        runtime.run_round(Vec::new()),
        Err(RuntimeError::CombatFinished {
            outcome: Outcome::Draw
        })
    ));
}

#[test]
fn external_moves_are_validated_by_the_engine() {
    let mut runtime = CombatRuntime::builder()
        .combatant(Character::new("a", 10, 3), Team(0), HumanProvider)
        .combatant(Character::new("b", 10, 3), Team(1), WaitMoveProvider)
        .build()
        .unwrap();

    let err = runtime
        .run_round(vec![Move::wait(CharacterId(0)), Move::wait(CharacterId(7))])
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Combat(_)));
    assert_eq!(err.error_code(), "COMBAT_UNKNOWN_CHARACTER");
    let context = err.context().unwrap();
    assert_eq!((context.round, context.actor), (1, Some(CharacterId(7))));
    assert_eq!(runtime.logic().round(), 0);
}

#[test]
fn embedded_skirmish_runs_to_an_outcome() {
    let catalog = Catalog::embedded(&CombatConfig::default()).unwrap();
    let roster = RosterLoader::embedded().unwrap();
    let config = RuntimeConfig {
        seed: 7,
        max_rounds: 200,
        player: None,
    };

    let mut builder = CombatRuntime::builder().config(config);
    for combatant in build_combatants(&catalog, &roster).unwrap() {
        builder = builder.combatant(combatant.character, Team(combatant.team), ShuffleAi::new());
    }
    let mut runtime = builder.build().unwrap();

    let mut last_round = 0;
    let outcome = runtime
        .run_to_completion(|report| {
            assert_eq!(report.round, last_round + 1);
            last_round = report.round;
            for snapshot in &report.characters {
                assert!(snapshot.health >= 0 && snapshot.health <= snapshot.max_health);
                assert!(snapshot.cpu_available >= 0 && snapshot.cpu_available <= snapshot.max_cpu);
            }
        })
        .unwrap();

    assert!(outcome.is_finished());
    let alive = runtime
        .logic()
        .roster()
        .iter()
        .filter(|c| c.is_alive())
        .count();
    match outcome {
        Outcome::Victory(_) => assert!(alive >= 1),
        Outcome::Draw => assert_eq!(alive, 0),
        Outcome::Stalemate => assert_eq!(runtime.logic().round(), 200),
        Outcome::Ongoing => unreachable!(),
    }
}

#[test]
fn manual_driver_hits_the_round_limit() {
    let config = RuntimeConfig {
        max_rounds: 2,
        ..Default::default()
    };
    let mut runtime = CombatRuntime::builder()
        .config(config)
        .combatant(Character::new("a", 10, 3), Team(0), HumanProvider)
        .combatant(Character::new("b", 10, 3), Team(1), WaitMoveProvider)
        .build()
        .unwrap();

    let mut rounds = 0;
    while !runtime.enforce_round_limit() {
        runtime.run_round(vec![Move::wait(CharacterId(0))]).unwrap();
        rounds += 1;
    }

    assert_eq!(rounds, 2);
    assert_eq!(runtime.outcome(), Outcome::Stalemate);
    assert!(runtime.enforce_round_limit());
}

#[test]
fn awaiting_input_leaves_ai_and_rng_untouched() {
    let heavy = || SubroutineSpec::direct_damage(2).cpu_slots(1).build().unwrap();
    let build = || {
        CombatRuntime::builder()
            .config(RuntimeConfig {
                seed: 11,
                ..Default::default()
            })
            .combatant(
                Character::new("ai-1", 10, 3)
                    .with_subroutine(jab())
                    .with_subroutine(heavy()),
                Team(0),
                ShuffleAi::new(),
            )
            .combatant(
                Character::new("ai-2", 10, 3)
                    .with_subroutine(jab())
                    .with_subroutine(heavy()),
                Team(0),
                ShuffleAi::new(),
            )
            .combatant(Character::new("player", 30, 3), Team(1), HumanProvider)
            .build()
            .unwrap()
    };
    let player_move = || vec![Move::wait(CharacterId(2))];

    let mut interrupted = build();
    assert!(matches!(
        interrupted.run_round(Vec::new()),
        Err(RuntimeError::AwaitingInput { character: CharacterId(2) })
    ));
    let mut fresh = build();

    for _ in 0..3 {
        let resumed = interrupted.run_round(player_move()).unwrap();
        let expected = fresh.run_round(player_move()).unwrap();
        assert_eq!(resumed.submitted, expected.submitted);
    }
}
