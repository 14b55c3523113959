//! Round driver binding combat logic to move providers.

use std::collections::{BTreeMap, BTreeSet};

use combat_core::{
    Character, CharacterId, CombatContext, CombatLogic, GameError, Move, Roster, TrackedMove,
};

use crate::api::{MoveProvider, Result, RuntimeError, Selection, SelectionError};
use crate::config::RuntimeConfig;
use crate::report::{Outcome, RoundReport, Team};

/// Drives a combat round by round.
///
/// Each round collects one move per active character (external input first,
/// then the character's provider), starts and ends the round on
/// [`CombatLogic`], and reports the outcome.
pub struct CombatRuntime {
    logic: CombatLogic,
    context: CombatContext,
    teams: BTreeMap<CharacterId, Team>,
    providers: BTreeMap<CharacterId, Box<dyn MoveProvider>>,
    config: RuntimeConfig,
    outcome: Outcome,
}

impl CombatRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Plays one round.
    ///
    /// `external` supplies moves for characters driven by input; any other
    /// character's move comes from its provider. Nothing is consumed if an
    /// input-driven character has no move in `external`: the check runs
    /// before any provider is asked.
    pub fn run_round(&mut self, mut external: Vec<Move>) -> Result<RoundReport> {
        if self.outcome.is_finished() {
            return Err(RuntimeError::CombatFinished {
                outcome: self.outcome,
            });
        }
        if let Some(character) = self.missing_input(&external) {
            return Err(RuntimeError::AwaitingInput { character });
        }

        let mut moves = Vec::new();
        for id in self.logic.active_characters().to_vec() {
            if let Some(index) = external.iter().position(|mv| mv.user == id) {
                moves.push(external.swap_remove(index));
                continue;
            }
            moves.push(self.select_for(id)?);
        }
        moves.append(&mut external);

        let ids = self.logic.start_round(moves.clone()).inspect_err(|err| {
            tracing::warn!(
                code = err.error_code(),
                severity = err.severity().as_str(),
                context = ?err.context(),
                %err,
                "round submission rejected"
            );
        })?;
        let resolved = self.logic.end_round()?;
        self.outcome = self.evaluate_outcome();

        let round = self.logic.round();
        if self.outcome.is_finished() {
            tracing::info!(round, outcome = %self.outcome, "combat finished");
        }

        Ok(RoundReport {
            round,
            submitted: ids
                .into_iter()
                .zip(moves)
                .map(|(id, mv)| TrackedMove { id, mv })
                .collect(),
            resolved,
            outcome: self.outcome,
            characters: self.logic.roster().iter().map(Character::snapshot).collect(),
        })
    }

    /// Plays rounds until the combat finishes or the round limit is reached.
    ///
    /// `on_round` sees every report as it is produced.
    pub fn run_to_completion(
        &mut self,
        mut on_round: impl FnMut(&RoundReport),
    ) -> Result<Outcome> {
        while !self.outcome.is_finished() && !self.enforce_round_limit() {
            let report = self.run_round(Vec::new())?;
            on_round(&report);
        }
        Ok(self.outcome)
    }

    /// Declares a stalemate once `max_rounds` rounds have been played.
    ///
    /// Returns whether the limit has been reached.
    pub fn enforce_round_limit(&mut self) -> bool {
        if self.logic.round() < self.config.max_rounds {
            return false;
        }
        if !self.outcome.is_finished() {
            tracing::warn!(max_rounds = self.config.max_rounds, "round limit reached");
            self.outcome = Outcome::Stalemate;
        }
        true
    }

    /// Moves currently on offer to `character`.
    pub fn offered_moves(&self, character: CharacterId) -> Vec<Move> {
        self.logic.offered_moves(character)
    }

    pub fn logic(&self) -> &CombatLogic {
        &self.logic
    }

    pub fn context(&self) -> &CombatContext {
        &self.context
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn team(&self, character: CharacterId) -> Option<Team> {
        self.teams.get(&character).copied()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// First active input-driven character without a move in `external`.
    fn missing_input(&self, external: &[Move]) -> Option<CharacterId> {
        self.logic.active_characters().iter().copied().find(|id| {
            self.providers
                .get(id)
                .is_some_and(|provider| provider.requires_input())
                && !external.iter().any(|mv| mv.user == *id)
        })
    }

    fn select_for(&mut self, id: CharacterId) -> Result<Move> {
        let offered = self.logic.offered_moves(id);
        let provider = self
            .providers
            .get_mut(&id)
            .ok_or(RuntimeError::ProviderNotSet { character: id })?;

        match provider.select_move(id, &offered, self.logic.roster(), &mut self.context) {
            Ok(Selection::Chosen(mv)) => Ok(mv),
            Ok(Selection::ImplicitWait(mv)) => {
                tracing::warn!(character = %id, "no subroutines on offer, waiting");
                Ok(mv)
            }
            Err(SelectionError::NoUsableMove { .. }) => {
                tracing::warn!(character = %id, "no usable move, substituting wait");
                Ok(Move::wait(id))
            }
            Err(SelectionError::RequiresInput { .. }) => {
                Err(RuntimeError::AwaitingInput { character: id })
            }
        }
    }

    fn evaluate_outcome(&self) -> Outcome {
        let standing: BTreeSet<Team> = self
            .logic
            .active_characters()
            .iter()
            .filter_map(|id| self.teams.get(id).copied())
            .collect();

        let mut teams = standing.into_iter();
        match (teams.next(), teams.next()) {
            (None, _) => Outcome::Draw,
            (Some(team), None) => Outcome::Victory(team),
            (Some(_), Some(_)) => Outcome::Ongoing,
        }
    }
}

/// Builder for [`CombatRuntime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    combatants: Vec<(Character, Team, Box<dyn MoveProvider>)>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            combatants: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a character on `team`, driven by `provider`.
    pub fn combatant(
        mut self,
        character: Character,
        team: Team,
        provider: impl MoveProvider + 'static,
    ) -> Self {
        self.combatants.push((character, team, Box::new(provider)));
        self
    }

    /// Builds the roster and starts the combat.
    ///
    /// The character named by [`RuntimeConfig::player`] becomes the context's
    /// player.
    pub fn build(self) -> Result<CombatRuntime> {
        if self.combatants.is_empty() {
            return Err(RuntimeError::NoCombatants);
        }

        let mut roster = Roster::new();
        let mut teams = BTreeMap::new();
        let mut providers = BTreeMap::new();
        for (character, team, provider) in self.combatants {
            let id = roster.add(character)?;
            teams.insert(id, team);
            providers.insert(id, provider);
        }

        let mut context = CombatContext::new(self.config.seed);
        if let Some(name) = &self.config.player {
            match roster.find(name) {
                Some(character) => context.set_player(Some(character.id())),
                None => tracing::warn!(player = %name, "configured player is not in the roster"),
            }
        }

        let logic = CombatLogic::new(roster);
        let mut runtime = CombatRuntime {
            logic,
            context,
            teams,
            providers,
            config: self.config,
            outcome: Outcome::Ongoing,
        };
        runtime.outcome = runtime.evaluate_outcome();
        Ok(runtime)
    }
}
