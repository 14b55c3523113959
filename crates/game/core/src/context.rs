//! Per-session combat context.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::state::CharacterId;

/// State shared by everything taking part in one combat session.
///
/// Holds the human-controlled character (if any) and the single random source
/// used by selection policies. [`CombatContext::reset`] restores both to their
/// initial values for a restarted combat.
#[derive(Clone, Debug)]
pub struct CombatContext {
    player: Option<CharacterId>,
    seed: u64,
    rng: StdRng,
}

impl CombatContext {
    pub fn new(seed: u64) -> Self {
        Self {
            player: None,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builder-style variant of [`CombatContext::set_player`].
    pub fn with_player(mut self, player: CharacterId) -> Self {
        self.player = Some(player);
        self
    }

    pub fn player(&self) -> Option<CharacterId> {
        self.player
    }

    pub fn set_player(&mut self, player: Option<CharacterId>) {
        self.player = player;
    }

    pub fn is_player(&self, id: CharacterId) -> bool {
        self.player == Some(id)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Clears the player and reseeds the random source.
    pub fn reset(&mut self) {
        tracing::debug!(seed = self.seed, "combat context reset");
        self.player = None;
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

impl Default for CombatContext {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn reset_replays_the_random_sequence() {
        let mut context = CombatContext::new(7).with_player(CharacterId(1));
        let first: Vec<u32> = (0..4).map(|_| context.rng_mut().gen_range(0..100)).collect();

        context.reset();
        let replay: Vec<u32> = (0..4).map(|_| context.rng_mut().gen_range(0..100)).collect();

        assert_eq!(first, replay);
        assert_eq!(context.player(), None);
    }
}
