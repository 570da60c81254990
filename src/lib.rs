//! # Probe Map
//!
//! String-keyed hash maps built directly on fixed-length slot arrays.
//!
//! This crate provides two hash map implementations:
//!
//! - `OpenAddressingMap`: open addressing with quadratic probing and tombstone deletion
//! - `ChainedMap`: separate chaining, one growable chain per bucket
//!
//! Both take the hash function at construction. Any `Fn(&str) -> usize` works, and the
//! crate ships [`hash_function_1`], [`hash_function_2`] and [`SipKeyHasher`].
//!
//! ## Basic Usage
//!
//! ```rust
//! use probemap::{OpenAddressingMap, hash_function_1};
//!
//! // Create a new hash map with 20 slots
//! let mut map = OpenAddressingMap::new(20, hash_function_1);
//!
//! // Insert values
//! map.insert("apple", 1)?;
//! map.insert("banana", 2)?;
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.insert("apple", 10)?;
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.size(), 2);
//!
//! // Remove values, leaving a tombstone behind
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.empty_buckets(), 18);
//!
//! // Rebuild with more slots, dropping the tombstone
//! map.resize(30)?;
//! assert_eq!(map.capacity(), 30);
//! assert_eq!(map.empty_buckets(), 29);
//! # Ok::<(), probemap::MapError>(())
//! ```
//!
//! ## Growth
//!
//! Before every insert the open addressing map checks how many of its slots are no
//! longer empty, tombstones included. Once half of them are, it doubles its capacity
//! and places every live entry again.
//!
//! ```rust
//! use probemap::{OpenAddressingMap, hash_function_2};
//!
//! let mut map = OpenAddressingMap::new(4, hash_function_2);
//! map.insert("a", 1)?;
//! map.insert("b", 2)?;
//! assert_eq!(map.capacity(), 4);
//!
//! map.insert("c", 3)?;
//! assert_eq!(map.capacity(), 8);
//! assert!(map.table_load() < 0.5);
//! # Ok::<(), probemap::MapError>(())
//! ```

/// Module implementing the separate chaining hash map
mod chained;
/// Error type returned by fallible map operations
mod error;
/// Hash functions that can be injected into the maps
mod hash;
/// Module implementing the open addressing hash map
mod open_addressing;
/// Quadratic probe sequence
mod probe;
/// Slot states and the backing store
mod store;
/// Shared map interface and helpers
mod utils;

pub use chained::ChainedMap;
pub use error::{MapError, Result};
pub use hash::{KeyHasher, SipKeyHasher, hash_function_1, hash_function_2};
pub use open_addressing::{Iter, OpenAddressingMap};
pub use probe::ProbeSequence;
pub use utils::{HashTable, find_mode, from_pairs};
