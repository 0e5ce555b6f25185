//! The global auth-key table (spec.md §3, §4.5): the only cross-domain
//! structure, read-only in the hot path. Loaded once, read with a
//! shared lock; tests inject entries directly (spec.md §9).

use std::collections::HashMap;

use parking_lot::RwLock;

#[derive(Default)]
pub struct AuthTable {
    keys: RwLock<HashMap<String, String>>,
}

impl AuthTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an `Auth-Key` header value to its domain. Missing, empty,
    /// or unknown keys all resolve to `None` (spec.md §4.5, §6).
    pub fn resolve(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        self.keys.read().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, domain: impl Into<String>) {
        self.keys.write().insert(key.into(), domain.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unknown_keys_resolve_to_none() {
        let table = AuthTable::new();
        table.insert("xyz123", "peterbecom");
        assert_eq!(table.resolve(""), None);
        assert_eq!(table.resolve("junkjunk"), None);
        assert_eq!(table.resolve("xyz123"), Some("peterbecom".to_string()));
    }
}
