//! Error type shared by the map implementations

use thiserror::Error;

/// Errors that can occur when mutating a hash map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A full probe cycle found no empty slot, reusable tombstone or matching key.
    ///
    /// Quadratic probing only visits every slot for some capacities, so a table can
    /// run out of reachable slots before its load factor says it is full.
    #[error("probe sequence exhausted at capacity {capacity} without finding a free slot")]
    ProbeExhausted {
        /// Capacity of the table that was being probed
        capacity: usize,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_capacity() {
        let err = MapError::ProbeExhausted { capacity: 8 };
        assert_eq!(
            err.to_string(),
            "probe sequence exhausted at capacity 8 without finding a free slot"
        );
    }
}
