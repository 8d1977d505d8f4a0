use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Permutes answer lists. Pluggable so tests can fix the order.
pub trait Shuffle: Send {
    fn shuffle(&mut self, items: &mut [String]);
}

impl<F> Shuffle for F
where
    F: FnMut(&mut [String]) + Send,
{
    fn shuffle(&mut self, items: &mut [String]) {
        self(items)
    }
}

/// Uniform shuffle backed by a `StdRng`.
pub struct RandomShuffle {
    rng: StdRng,
}

impl RandomShuffle {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffle for RandomShuffle {
    fn shuffle(&mut self, items: &mut [String]) {
        items.shuffle(&mut self.rng);
    }
}
