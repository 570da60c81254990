//! Shared map interface and helpers built on top of it

use std::cmp::Ordering;

use crate::{
    ChainedMap, OpenAddressingMap,
    error::Result,
    hash::{KeyHasher, hash_function_1},
};

/// Operations shared by both collision-resolution strategies
pub trait HashTable<V> {
    /// Returns the number of live entries
    fn size(&self) -> usize;

    /// Returns the number of slots or buckets
    fn capacity(&self) -> usize;

    /// Returns the load factor as each strategy defines it
    fn table_load(&self) -> f64;

    /// Returns the number of empty slots or buckets
    fn empty_buckets(&self) -> usize;

    /// Inserts or updates `key`, returning the previous value
    ///
    /// # Errors
    ///
    /// Returns an error when the table cannot place the key.
    fn insert(&mut self, key: String, value: V) -> Result<Option<V>>;

    /// Returns the value stored for `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if `key` is present
    fn contains_key(&self, key: &str) -> bool;

    /// Removes `key`, returning its value
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Changes the number of slots or buckets
    ///
    /// # Errors
    ///
    /// Returns an error when the entries cannot be placed in the new table.
    fn resize(&mut self, new_capacity: usize) -> Result<()>;

    /// Removes every entry, keeping the capacity
    fn clear(&mut self);

    /// Returns a snapshot of the keys, in no particular order
    fn keys(&self) -> Vec<String>;
}

impl<V, H: KeyHasher> HashTable<V> for OpenAddressingMap<V, H> {
    fn size(&self) -> usize {
        Self::size(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn insert(&mut self, key: String, value: V) -> Result<Option<V>> {
        Self::insert(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        Self::resize(self, new_capacity)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn keys(&self) -> Vec<String> {
        Self::keys(self)
    }
}

impl<V, H: KeyHasher> HashTable<V> for ChainedMap<V, H> {
    fn size(&self) -> usize {
        Self::size(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn insert(&mut self, key: String, value: V) -> Result<Option<V>> {
        Ok(Self::insert(self, key, value))
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        Self::resize(self, new_capacity);
        Ok(())
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn keys(&self) -> Vec<String> {
        Self::keys(self)
    }
}

/// Creates an `OpenAddressingMap` from an iterator of key-value pairs
///
/// # Errors
///
/// Returns an error when an insert exhausts its probe sequence.
pub fn from_pairs<K, V, H, I>(
    pairs: I,
    capacity: usize,
    hasher: H,
) -> Result<OpenAddressingMap<V, H>>
where
    K: Into<String>,
    H: KeyHasher,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = OpenAddressingMap::new(capacity, hasher);

    for (key, value) in pairs {
        map.insert(key, value)?;
    }

    Ok(map)
}

/// Returns every most frequent value, in no particular order, and its frequency.
///
/// Counts are kept in a [`ChainedMap`] with one bucket per three input values, so
/// the whole scan is linear. An empty input has no mode and a frequency of 0.
#[must_use]
pub fn find_mode<S: AsRef<str>>(values: &[S]) -> (Vec<String>, usize) {
    let mut counts = ChainedMap::<usize, _>::new(values.len() / 3, hash_function_1);

    for value in values {
        let value = value.as_ref();
        if let Some(count) = counts.get_mut(value) {
            *count = count.saturating_add(1);
        } else {
            counts.insert(value, 1usize);
        }
    }

    let mut modes = Vec::new();
    let mut frequency = 0;
    for (value, &count) in counts.iter() {
        match count.cmp(&frequency) {
            Ordering::Greater => {
                modes.clear();
                modes.push(value.to_owned());
                frequency = count;
            }
            Ordering::Equal => modes.push(value.to_owned()),
            Ordering::Less => {}
        }
    }

    (modes, frequency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_function_2;

    fn sorted_mode(values: &[&str]) -> (Vec<String>, usize) {
        let (mut modes, frequency) = find_mode(values);
        modes.sort();
        (modes, frequency)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn test_find_mode_single() {
        let values = ["apple", "apple", "grape", "melon", "peach"];
        assert_eq!(sorted_mode(&values), (strings(&["apple"]), 2));
    }

    #[test]
    fn test_find_mode_ties() {
        let values =
            ["Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu"];
        assert_eq!(sorted_mode(&values), (strings(&["Mint", "Ubuntu"]), 3));

        let values = ["one", "two", "three", "four", "five"];
        assert_eq!(sorted_mode(&values), (strings(&["five", "four", "one", "three", "two"]), 1));

        let values = ["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"];
        assert_eq!(sorted_mode(&values), (strings(&["2", "3", "4"]), 3));
    }

    #[test]
    fn test_find_mode_empty_and_owned() {
        assert_eq!(sorted_mode(&[]), (Vec::new(), 0));

        let values = vec!["x".to_string(), "x".to_string()];
        assert_eq!(find_mode(&values), (strings(&["x"]), 2));
    }

    #[test]
    fn test_from_pairs() -> Result<()> {
        let data = vec![("a", 1), ("b", 2), ("c", 3), ("a", 4)];

        let map = from_pairs(data, 10, hash_function_2)?;

        assert_eq!(map.get("a"), Some(&4));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.size(), 3);
        Ok(())
    }

    /// Drives a table through the same scenario regardless of strategy
    fn exercise<T: HashTable<i32>>(table: &mut T) -> Result<()> {
        table.insert("key1".to_string(), 10)?;
        table.insert("key2".to_string(), 20)?;
        table.insert("key1".to_string(), 30)?;
        assert_eq!(table.size(), 2);
        assert_eq!(table.get("key1"), Some(&30));
        assert!(table.contains_key("key2"));
        assert!(table.table_load() > 0.0);

        assert_eq!(table.remove("key2"), Some(20));
        assert!(!table.contains_key("key2"));

        table.resize(40)?;
        assert_eq!(table.capacity(), 40);
        assert_eq!(table.keys(), vec!["key1".to_string()]);

        table.clear();
        assert_eq!(table.size(), 0);
        assert_eq!(table.empty_buckets(), 40);
        Ok(())
    }

    #[test]
    fn test_both_strategies_share_the_interface() -> Result<()> {
        exercise(&mut OpenAddressingMap::new(20, hash_function_1))?;
        exercise(&mut ChainedMap::new(20, hash_function_1))?;
        Ok(())
    }
}
