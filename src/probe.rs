//! Quadratic probe sequence

use std::iter::FusedIterator;

/// The slot indices examined while resolving a key.
///
/// The `j`-th index is `(hash mod C + j²) mod C` for a table of capacity `C`. The
/// sequence yields exactly `C` indices, after which `j²` starts repeating modulo `C`.
/// It only covers every slot for some capacities; for the rest, some indices come up
/// more than once and others never do.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    /// Index of the first probe, `hash mod capacity`
    home: usize,
    /// Number of slots in the probed table
    capacity: usize,
    /// Number of indices yielded so far (`j`)
    step: usize,
    /// `j²` reduced modulo capacity
    offset: usize,
}

impl ProbeSequence {
    /// Starts the probe sequence of `hash` in a table of `capacity` slots
    #[must_use]
    pub fn new(hash: usize, capacity: usize) -> Self {
        let home = hash.checked_rem(capacity).unwrap_or(0);
        Self { home, capacity, step: 0, offset: 0 }
    }

    /// Index of the first probe
    #[must_use]
    pub fn home(&self) -> usize {
        self.home
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    // Operands stay below twice the capacity of an allocated slot array.
    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }

        let index = (self.home + self.offset) % self.capacity;

        // (j + 1)² = j² + 2j + 1
        let delta = (2 * self.step + 1) % self.capacity;
        self.offset = (self.offset + delta) % self.capacity;
        self.step += 1;

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity.saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl FusedIterator for ProbeSequence {}
