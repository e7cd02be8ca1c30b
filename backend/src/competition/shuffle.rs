use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of seeding order for brackets and round robin slots
///
/// Implementations are passed explicitly into every generation call so no
/// draw ever depends on a hidden global generator.
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Fisher-Yates shuffle driven by an injected RNG
#[derive(Debug, Clone)]
pub struct RandomShuffler<R> {
    rng: R,
}

impl<R: RngCore> RandomShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomShuffler<ChaCha20Rng> {
    /// Deterministic shuffler for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }

    /// ChaCha20 seeded from OS entropy, for live draws
    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy())
    }
}

impl<R: RngCore> Shuffler for RandomShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Keeps the caller's order, e.g. when replaying a persisted seeding
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}
