//! At most one in-flight operation per key

use std::collections::HashSet;
use std::hash::Hash;

/// Tracks which keys currently have an operation running
#[derive(Debug)]
pub struct SingleFlight<K> {
    in_flight: HashSet<K>,
}

impl<K: Eq + Hash> SingleFlight<K> {
    pub fn new() -> Self {
        Self {
            in_flight: HashSet::new(),
        }
    }

    /// Claim `key`. Returns false if it is already claimed.
    pub fn try_acquire(&mut self, key: K) -> bool {
        self.in_flight.insert(key)
    }

    /// Release `key`. Returns false if it was not claimed.
    pub fn release(&mut self, key: &K) -> bool {
        self.in_flight.remove(key)
    }

    pub fn is_in_flight(&self, key: &K) -> bool {
        self.in_flight.contains(key)
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

impl<K: Eq + Hash> Default for SingleFlight<K> {
    fn default() -> Self {
        Self::new()
    }
}
