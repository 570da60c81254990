use crate::hash::{KeyHasher, SipKeyHasher};

/// A hash map that resolves collisions by separate chaining.
///
/// Each bucket holds the entries whose keys hash to it. The bucket count only
/// changes through [`ChainedMap::resize`]; chains simply grow longer as entries
/// are added.
#[derive(Debug, Clone)]
pub struct ChainedMap<V, H = SipKeyHasher> {
    /// One chain of key-value pairs per bucket
    buckets: Box<[Vec<(String, V)>]>,
    /// Current number of elements in the hash table
    size: usize,
    /// Maps keys to their bucket
    hasher: H,
}

impl<V> ChainedMap<V> {
    /// Creates a map with `capacity` buckets that hashes keys with SipHash
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, SipKeyHasher)
    }
}

impl<V, H> ChainedMap<V, H>
where
    H: KeyHasher,
{
    /// Creates a map with `capacity` empty buckets (at least one)
    #[must_use]
    pub fn new(capacity: usize, hasher: H) -> Self {
        Self { buckets: empty_buckets(capacity.max(1)), size: 0, hasher }
    }

    /// Returns the number of entries
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of buckets without entries
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns the average number of entries per bucket
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Index of the bucket `key` hashes to
    fn bucket_index(&self, key: &str) -> usize {
        self.hasher.hash_key(key).checked_rem(self.capacity()).unwrap_or(0)
    }

    /// Returns the chain `key` belongs to
    fn chain(&self, key: &str) -> Option<&Vec<(String, V)>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// Returns the chain `key` belongs to, mutably
    fn chain_mut(&mut self, key: &str) -> Option<&mut Vec<(String, V)>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)
    }

    /// Inserts a key-value pair, returning the previous value if the key was present
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let chain = self.chain_mut(&key)?;

        if let Some((_, current)) = chain.iter_mut().find(|(existing, _)| *existing == key) {
            return Some(std::mem::replace(current, value));
        }

        chain.push((key, value));
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` from its chain. Absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let chain = self.chain_mut(key)?;
        let position = chain.iter().position(|(existing, _)| existing == key)?;
        let (_, value) = chain.swap_remove(position);
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Rehashes every entry into `new_capacity` buckets. Targets below one are ignored.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            log::debug!("ignoring resize to {new_capacity}");
            return;
        }

        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        log::debug!("rehashing {} entries from {} to {new_capacity} buckets", self.size, old.len());

        self.size = 0;
        for (key, value) in old.into_vec().into_iter().flatten() {
            self.insert(key, value);
        }
    }

    /// Clears the hash map, keeping its capacity
    pub fn clear(&mut self) {
        log::trace!("clearing {} entries", self.size);
        self.buckets = empty_buckets(self.capacity());
        self.size = 0;
    }

    /// Returns a snapshot of every key, in no particular order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets.iter().flatten().map(|(key, value)| (key.as_str(), value))
    }
}

/// Allocates `capacity` empty chains
fn empty_buckets<V>(capacity: usize) -> Box<[Vec<(String, V)>]> {
    std::iter::repeat_with(Vec::new).take(capacity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{hash_function_1, hash_function_2};

    #[test]
    fn test_insert_update_and_get() {
        let mut map = ChainedMap::new(10, hash_function_1);
        assert_eq!(map.insert("key1", 10), None);
        assert_eq!(map.insert("key2", 20), None);
        assert_eq!(map.insert("key1", 30), Some(10));

        assert_eq!(map.size(), 2);
        assert_eq!(map.get("key1"), Some(&30));
        assert_eq!(map.get("key2"), Some(&20));
        assert_eq!(map.get("key3"), None);
    }

    #[test]
    fn test_anagrams_share_a_chain() {
        let mut map = ChainedMap::new(10, hash_function_1);
        map.insert("ab", 1);
        map.insert("ba", 2);

        assert_eq!(map.size(), 2);
        assert_eq!(map.empty_buckets(), 9);
        assert_eq!(map.get("ab"), Some(&1));
        assert_eq!(map.get("ba"), Some(&2));
    }

    #[test]
    fn test_remove() {
        let mut map = ChainedMap::new(10, hash_function_1);
        map.insert("key1", 10);
        map.insert("key2", 20);
        map.insert("key3", 30);

        assert_eq!(map.remove("key3"), Some(30));
        assert!(!map.contains_key("key3"));
        assert_eq!(map.remove("key4"), None);
        assert_eq!(map.size(), 2);
    }

    #[test]
    fn test_table_load_counts_entries_per_bucket() {
        let mut map = ChainedMap::new(50, hash_function_1);
        for i in 0..150 {
            map.insert(format!("str{i}"), i * 100);
        }

        assert_eq!(map.capacity(), 50);
        assert_eq!(map.size(), 150);
        assert!((map.table_load() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_rehashes_entries() {
        let mut map = ChainedMap::new(75, hash_function_2);
        let keys: Vec<i32> = (1..1000).step_by(13).collect();
        for key in &keys {
            map.insert(key.to_string(), key * 42);
        }

        for capacity in (111..1000).step_by(117) {
            map.resize(capacity);
            assert_eq!(map.capacity(), capacity);
            for key in &keys {
                assert_eq!(map.get(&key.to_string()), Some(&(key * 42)));
                assert!(!map.contains_key(&(key + 1).to_string()));
            }
        }

        map.resize(1);
        assert_eq!(map.capacity(), 1);
        assert_eq!(map.size(), keys.len());
        assert_eq!(map.empty_buckets(), 0);

        map.resize(0);
        assert_eq!(map.capacity(), 1);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map = ChainedMap::new(50, hash_function_1);
        map.insert("key1", 10);
        map.insert("key2", 20);
        map.resize(100);
        map.clear();

        assert_eq!((map.size(), map.capacity()), (0, 100));
        assert_eq!(map.empty_buckets(), 100);
    }

    #[test]
    fn test_keys_and_get_mut() {
        let mut map = ChainedMap::with_capacity(4);
        map.insert("a", 1);
        map.insert("b", 2);
        if let Some(value) = map.get_mut("a") {
            *value += 10;
        }

        let mut keys = map.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(map.get("a"), Some(&11));
    }
}
