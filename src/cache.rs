//! In-memory request memoization for the current session.
//!
//! One entry per distinct input string, successes and failures alike, so
//! repeated lookups never hit the network twice. Unbounded: entries live
//! for the lifetime of the session.

use std::collections::HashMap;
use tracing::debug;

/// Session-scoped memoization cache keyed by the exact input string.
#[derive(Debug, Default)]
pub struct SessionCache<V> {
    entries: HashMap<String, V>,
}

impl<V: Clone> SessionCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Retrieves the memoized value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        let hit = self.entries.get(key).cloned();
        if hit.is_some() {
            debug!("session cache hit for '{key}'");
        }
        hit
    }

    /// Stores a value, replacing any previous entry for the same key.
    pub fn put(&mut self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    /// Number of memoized entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
