//! Random prompt selection for accepted check-ins, first or repeat.

use parking_lot::Mutex;

/// Picks prompts uniformly at random from a pool.
///
/// A fixed seed makes the sequence reproducible, which tests rely on.
#[derive(Debug)]
pub struct PromptPicker {
    rng: Mutex<fastrand::Rng>,
}

impl PromptPicker {
    /// Creates a picker, seeded when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self { rng: Mutex::new(rng) }
    }

    /// Picks one entry of `pool`, or `None` when the pool is empty.
    pub fn pick<'a>(&self, pool: &'a [String]) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        let index = self.rng.lock().usize(..pool.len());
        pool.get(index).map(String::as_str)
    }
}

impl Default for PromptPicker {
    fn default() -> Self {
        Self::new(None)
    }
}
