//! Hash functions that can be injected into the maps

use std::hash::{DefaultHasher, Hash, Hasher};

/// Maps a text key to a non-negative integer.
///
/// The maps only rely on the result being deterministic: the same key must always
/// produce the same value. Any `Fn(&str) -> usize` is a `KeyHasher`, so plain
/// functions such as [`hash_function_1`] and closures can be passed directly.
pub trait KeyHasher {
    /// Hashes `key`
    fn hash_key(&self, key: &str) -> usize;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> usize,
{
    fn hash_key(&self, key: &str) -> usize {
        self(key)
    }
}

/// Sums the code points of every character in `key`.
///
/// Anagrams collide, which makes it useful for exercising collision handling.
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0usize, |hash, c| hash.wrapping_add(c as usize))
}

/// Sums the code points of `key`, each weighted by its 1-based position.
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars().enumerate().fold(0usize, |hash, (index, c)| {
        hash.wrapping_add(index.wrapping_add(1).wrapping_mul(c as usize))
    })
}

/// Hashes keys with the standard library's `DefaultHasher` (SipHash)
#[derive(Debug, Clone, Copy, Default)]
pub struct SipKeyHasher;

impl KeyHasher for SipKeyHasher {
    #[allow(clippy::cast_possible_truncation)]
    fn hash_key(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_function_1_sums_code_points() {
        assert_eq!(hash_function_1(""), 0);
        assert_eq!(hash_function_1("a"), 97);
        assert_eq!(hash_function_1("key1"), 107 + 101 + 121 + 49);
        assert_eq!(hash_function_1("ab"), hash_function_1("ba"));
    }

    #[test]
    fn test_hash_function_2_weights_positions() {
        assert_eq!(hash_function_2(""), 0);
        assert_eq!(hash_function_2("ab"), 97 + 2 * 98);
        assert_eq!(hash_function_2("ba"), 98 + 2 * 97);
        assert_ne!(hash_function_2("ab"), hash_function_2("ba"));
    }

    #[test]
    fn test_closures_and_functions_are_hashers() {
        let constant = |_: &str| 7usize;
        assert_eq!(constant.hash_key("anything"), 7);

        let f: fn(&str) -> usize = hash_function_1;
        assert_eq!(f.hash_key("a"), 97);
    }

    #[test]
    fn test_sip_hasher_is_deterministic() {
        let hasher = SipKeyHasher;
        assert_eq!(hasher.hash_key("apple"), hasher.hash_key("apple"));
        assert_ne!(hasher.hash_key("apple"), hasher.hash_key("banana"));
    }
}
