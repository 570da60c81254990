//! Slot states and the fixed-length array that holds them

use std::{fmt, mem};

/// One cell of the backing store
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot<V> {
    /// Never occupied since the store was allocated
    Empty,
    /// Held `key` until it was removed. Probing continues past it.
    Tombstone {
        /// Key of the removed entry, kept so a reinsertion can reuse the slot
        key: String,
    },
    /// A live entry
    Occupied {
        /// The entry's key
        key: String,
        /// The entry's value
        value: V,
    },
}

impl<V> Slot<V> {
    /// Returns the key and value of a live entry
    pub(crate) fn entry(&self) -> Option<(&str, &V)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::Empty | Self::Tombstone { .. } => None,
        }
    }

    /// Returns the key of a live entry
    pub(crate) fn live_key(&self) -> Option<&str> {
        self.entry().map(|(key, _)| key)
    }

    /// Returns the value of a live entry
    pub(crate) fn value(&self) -> Option<&V> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value of a live entry
    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Self::Occupied { value, .. } => Some(value),
            Self::Empty | Self::Tombstone { .. } => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("None"),
            Self::Tombstone { key } => write!(f, "K: {key} TS"),
            Self::Occupied { key, value } => write!(f, "K: {key} V: {value}"),
        }
    }
}

/// Fixed-length slot array owned by a map.
///
/// The length never changes after allocation; growing a map allocates a new store
/// and moves the live entries over.
#[derive(Debug, Clone)]
pub(crate) struct BackingStore<V> {
    /// The slots, all `Empty` at allocation
    slots: Box<[Slot<V>]>,
}

impl<V> BackingStore<V> {
    /// Allocates `capacity` empty slots
    pub(crate) fn new(capacity: usize) -> Self {
        Self { slots: std::iter::repeat_with(|| Slot::Empty).take(capacity).collect() }
    }

    /// Number of slots
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the slot at `index`
    pub(crate) fn get(&self, index: usize) -> Option<&Slot<V>> {
        self.slots.get(index)
    }

    /// Returns the slot at `index` mutably
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Slot<V>> {
        self.slots.get_mut(index)
    }

    /// Writes a live entry at `index`, returning the slot it replaced.
    ///
    /// Returns `None` and drops the entry when `index` is out of range.
    pub(crate) fn put(&mut self, index: usize, key: String, value: V) -> Option<Slot<V>> {
        self.slots.get_mut(index).map(|slot| mem::replace(slot, Slot::Occupied { key, value }))
    }

    /// Turns the live entry at `index` into a tombstone and returns its value.
    ///
    /// Leaves empty slots and tombstones untouched.
    pub(crate) fn bury(&mut self, index: usize) -> Option<V> {
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Empty) {
            Slot::Occupied { key, value } => {
                *slot = Slot::Tombstone { key };
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Iterates over every slot in index order
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Slot<V>> {
        self.slots.iter()
    }

    /// Consumes the store, yielding every slot in index order
    pub(crate) fn into_slots(self) -> std::vec::IntoIter<Slot<V>> {
        self.slots.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store: BackingStore<i32> = BackingStore::new(4);
        assert_eq!(store.len(), 4);
        assert!(store.iter().all(|slot| *slot == Slot::Empty));
        assert_eq!(store.get(4), None);
    }

    #[test]
    fn test_put_returns_previous_slot() {
        let mut store = BackingStore::new(2);
        assert_eq!(store.put(1, "a".to_string(), 1), Some(Slot::Empty));
        assert_eq!(
            store.put(1, "a".to_string(), 2),
            Some(Slot::Occupied { key: "a".to_string(), value: 1 })
        );
        assert_eq!(store.get(1).and_then(Slot::value), Some(&2));
        assert_eq!(store.put(5, "b".to_string(), 3), None);
    }

    #[test]
    fn test_bury_only_affects_live_entries() {
        let mut store = BackingStore::new(3);
        store.put(0, "a".to_string(), 1);

        assert_eq!(store.bury(0), Some(1));
        assert_eq!(store.get(0), Some(&Slot::Tombstone { key: "a".to_string() }));
        assert_eq!(store.bury(0), None);
        assert_eq!(store.get(0), Some(&Slot::Tombstone { key: "a".to_string() }));
        assert_eq!(store.bury(1), None);
        assert_eq!(store.get(1), Some(&Slot::Empty));
    }

    #[test]
    fn test_value_mut_and_live_key() {
        let mut store = BackingStore::new(1);
        store.put(0, "a".to_string(), 1);
        if let Some(value) = store.get_mut(0).and_then(Slot::value_mut) {
            *value += 10;
        }
        assert_eq!(store.get(0).and_then(Slot::live_key), Some("a"));
        assert_eq!(store.into_slots().filter_map(|slot| slot.value().copied()).sum::<i32>(), 11);
    }

    #[test]
    fn test_display() {
        assert_eq!(Slot::<i32>::Empty.to_string(), "None");
        assert_eq!(Slot::<i32>::Tombstone { key: "a".to_string() }.to_string(), "K: a TS");
        assert_eq!(Slot::Occupied { key: "a".to_string(), value: 1 }.to_string(), "K: a V: 1");
    }
}
