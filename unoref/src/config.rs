use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// How long watchers let a missing-UNO notice sit before the board
    /// that shows its penalty goes out.
    pub notice_pause: Duration,
    /// Fixes the deal and every draw when set.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            notice_pause: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
