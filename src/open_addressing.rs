use std::fmt;

use crate::{
    error::{MapError, Result},
    hash::{KeyHasher, SipKeyHasher},
    probe::ProbeSequence,
    store::{BackingStore, Slot},
};

/// Capacity used by `Default`
const DEFAULT_CAPACITY: usize = 61;

/// Default growth threshold, as a percentage of non-empty slots
const DEFAULT_LOAD_FACTOR_THRESHOLD: usize = 50;

/// Outcome of walking a key's probe sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// A live entry with the key sits at this index
    Live(usize),
    /// The key is absent and may be written at this index
    Vacant(usize),
    /// The whole probe cycle was walked without a hit or a free slot
    Exhausted,
}

/// A hash map with quadratic probing and tombstone deletion.
///
/// Keys are strings hashed by an injected [`KeyHasher`]. Removing a key leaves a
/// tombstone behind so that probe chains running through the slot stay intact.
/// Tombstones count towards the load factor, and the table doubles its capacity
/// before an insert whenever half of its slots are no longer empty. Only a resize
/// reclaims tombstones.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<V, H = SipKeyHasher> {
    /// The slots storing the key-value pairs
    store: BackingStore<V>,
    /// Number of live entries
    size: usize,
    /// Number of tombstoned slots
    tombstones: usize,
    /// Threshold for load factor before resizing - stored as percentage (0-100)
    load_factor_threshold: usize,
    /// Maps keys to their home slot
    hasher: H,
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V> OpenAddressingMap<V> {
    /// Creates a map with `capacity` slots that hashes keys with SipHash
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, SipKeyHasher)
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: KeyHasher,
{
    /// Creates a map with `capacity` empty slots (at least one) and the given hash function
    #[must_use]
    pub fn new(capacity: usize, hasher: H) -> Self {
        Self {
            store: BackingStore::new(capacity.max(1)),
            size: 0,
            tombstones: 0,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            hasher,
        }
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Returns the number of tombstoned slots
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the number of slots that have never held an entry since the last rebuild
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.capacity().saturating_sub(self.size).saturating_sub(self.tombstones)
    }

    /// Returns the fraction of slots that are live or tombstoned
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        let capacity = self.capacity();
        capacity.saturating_sub(self.empty_buckets()) as f64 / capacity as f64
    }

    /// Provide a way to configure the load factor threshold
    pub fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.load_factor_threshold = threshold.clamp(1, 95);
    }

    /// Whether the next insert has to grow the table first
    fn needs_growth(&self) -> bool {
        self.size.saturating_add(self.tombstones).saturating_mul(100) >=
            self.load_factor_threshold.saturating_mul(self.capacity())
    }

    /// Walks the probe sequence of `key`, returning the resolution and the number
    /// of slots visited.
    ///
    /// With `reuse_tombstone`, a tombstone left by the same key resolves as vacant.
    fn resolve(&self, key: &str, reuse_tombstone: bool) -> (Resolution, usize) {
        let mut probes: usize = 0;

        for index in ProbeSequence::new(self.hasher.hash_key(key), self.capacity()) {
            probes = probes.saturating_add(1);
            match self.store.get(index) {
                None => break,
                Some(Slot::Empty) => return (Resolution::Vacant(index), probes),
                Some(Slot::Occupied { key: existing, .. }) if existing == key => {
                    return (Resolution::Live(index), probes);
                }
                Some(Slot::Tombstone { key: buried }) if reuse_tombstone && buried == key => {
                    return (Resolution::Vacant(index), probes);
                }
                Some(Slot::Occupied { .. } | Slot::Tombstone { .. }) => {}
            }
        }

        (Resolution::Exhausted, probes)
    }

    /// Inserts a key-value pair, returning the previous value if the key was present.
    ///
    /// Grows the table to twice its capacity first when the load factor has reached
    /// the threshold, even if the key is already present.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ProbeExhausted`] when the growth or the insert cannot reach a
    /// free slot. No entry is added, updated or lost, though a growth that succeeded
    /// before the insert failed is kept.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        if self.needs_growth() {
            let doubled = self.capacity().saturating_mul(2);
            log::trace!("load {:.3} reached threshold, growing to {doubled}", self.table_load());
            self.resize(doubled)?;
        }

        let key = key.into();
        match self.resolve(&key, true).0 {
            Resolution::Live(index) | Resolution::Vacant(index) => {
                match self.store.put(index, key, value) {
                    Some(Slot::Occupied { value: previous, .. }) => Ok(Some(previous)),
                    Some(Slot::Tombstone { .. }) => {
                        self.tombstones = self.tombstones.saturating_sub(1);
                        self.size = self.size.saturating_add(1);
                        Ok(None)
                    }
                    Some(Slot::Empty) | None => {
                        self.size = self.size.saturating_add(1);
                        Ok(None)
                    }
                }
            }
            Resolution::Exhausted => {
                log::error!(
                    "no free slot reachable for {key:?} at capacity {} ({} live, {} tombstones)",
                    self.capacity(),
                    self.size,
                    self.tombstones
                );
                Err(MapError::ProbeExhausted { capacity: self.capacity() })
            }
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.resolve(key, false).0 {
            Resolution::Live(index) => self.store.get(index).and_then(Slot::value),
            Resolution::Vacant(_) | Resolution::Exhausted => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.resolve(key, false).0 {
            Resolution::Live(index) => self.store.get_mut(index).and_then(Slot::value_mut),
            Resolution::Vacant(_) | Resolution::Exhausted => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.resolve(key, false).0, Resolution::Live(_))
    }

    /// Removes `key`, leaving a tombstone in its slot. Absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let Resolution::Live(index) = self.resolve(key, false).0 else {
            return None;
        };

        let value = self.store.bury(index)?;
        self.size = self.size.saturating_sub(1);
        self.tombstones = self.tombstones.saturating_add(1);
        Some(value)
    }

    /// Number of slots visited to find the live entry for `key`
    #[must_use]
    pub fn probe_length(&self, key: &str) -> Option<usize> {
        match self.resolve(key, false) {
            (Resolution::Live(_), probes) => Some(probes),
            (Resolution::Vacant(_) | Resolution::Exhausted, _) => None,
        }
    }

    /// Rebuilds the table with `new_capacity` slots.
    ///
    /// Every live entry is placed again by walking its probe sequence in the new
    /// table, and all tombstones are dropped. Targets below one slot or below the
    /// number of live entries are ignored. The rebuild never triggers growth of
    /// its own, so the new table may end up above the load factor threshold.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ProbeExhausted`] when some entry cannot reach a free slot
    /// in the new table. The map is left unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < 1 || new_capacity < self.size {
            log::debug!("ignoring resize to {new_capacity} with {} live entries", self.size);
            return Ok(());
        }

        let placements = self.plan_placements(new_capacity)?;
        let old = std::mem::replace(&mut self.store, BackingStore::new(new_capacity));
        let old_capacity = old.len();
        let reclaimed = self.tombstones;

        let mut targets = placements.into_iter();
        let mut placed: usize = 0;
        for slot in old.into_slots() {
            if let Slot::Occupied { key, value } = slot {
                if let Some(index) = targets.next() {
                    self.store.put(index, key, value);
                    placed = placed.saturating_add(1);
                }
            }
        }

        self.size = placed;
        self.tombstones = 0;
        log::debug!(
            "resized {old_capacity} -> {new_capacity}: {placed} entries moved, {reclaimed} tombstones reclaimed"
        );
        Ok(())
    }

    /// Computes the slot every live entry would take in a fresh table of `capacity`
    /// slots, in slot order, without touching the current table.
    fn plan_placements(&self, capacity: usize) -> Result<Vec<usize>> {
        let mut taken = vec![false; capacity];
        let mut placements = Vec::with_capacity(self.size);

        for key in self.store.iter().filter_map(Slot::live_key) {
            let free = ProbeSequence::new(self.hasher.hash_key(key), capacity)
                .find(|&index| taken.get(index).is_some_and(|used| !used));

            let Some(index) = free else {
                log::error!("no free slot reachable for {key:?} while resizing to {capacity}");
                return Err(MapError::ProbeExhausted { capacity });
            };

            if let Some(used) = taken.get_mut(index) {
                *used = true;
            }
            placements.push(index);
        }

        Ok(placements)
    }

    /// Clears the hash map, keeping its capacity
    pub fn clear(&mut self) {
        log::trace!("clearing {} entries and {} tombstones", self.size, self.tombstones);
        self.store = BackingStore::new(self.capacity());
        self.size = 0;
        self.tombstones = 0;
    }

    /// Returns a snapshot of every live key, in no particular order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns an iterator over the live key-value pairs
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.store.iter() }
    }
}

impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.store.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}

/// Iterator over the live key-value pairs of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Slot::entry)
    }
}
