/// Depleting pool of reusable identifiers with cyclic replenishment.
use rand::rngs::StdRng;
use rand::Rng;

/// Holds every identifier either as available or as exhausted.
///
/// `extract` draws uniformly from the available side. Once that side runs
/// dry the two sides swap, so no identifier repeats before all have been
/// handed out once in the current round.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    available: Vec<T>,
    exhausted: Vec<T>,
}

impl<T: Clone> Pool<T> {
    /// Create a pool. Returns `None` for an empty identifier set.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            available: items,
            exhausted: Vec::new(),
        })
    }

    /// Remove a random available identifier, park it as exhausted and return it.
    pub fn extract(&mut self, rng: &mut StdRng) -> T {
        if self.available.is_empty() {
            tracing::debug!(size = self.exhausted.len(), "pool round complete, replenishing");
            std::mem::swap(&mut self.available, &mut self.exhausted);
        }
        let idx = rng.gen_range(0..self.available.len());
        let item = self.available.swap_remove(idx);
        self.exhausted.push(item.clone());
        item
    }

    pub fn available(&self) -> &[T] {
        &self.available
    }

    pub fn exhausted(&self) -> &[T] {
        &self.exhausted
    }

    /// Total number of identifiers; constant over the pool's life.
    pub fn len(&self) -> usize {
        self.available.len() + self.exhausted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
