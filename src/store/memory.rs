//! In-memory `Store` implementation: concurrent per-domain maps guarded
//! by a keyed lock registry for per-`(domain, url)` atomicity.
//!
//! Sufficient for tests per spec.md §9 ("an in-memory implementation
//! (ordered map + hash maps + mutex) is sufficient for tests"); a real
//! deployment would swap this for a backend with native sorted-set and
//! hash primitives (e.g. Redis) behind the same [`Store`] trait.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use parking_lot::{Mutex, RwLock};

use super::{Store, Transaction, TxFn};

struct DomainState {
    titles: DashMap<String, String>,
    popularity: DashMap<String, f64>,
    /// prefix -> postings, sorted by score descending.
    postings: DashMap<String, RwLock<Vec<(String, f64)>>>,
    /// url -> prefixes it is currently registered under.
    reverse: DashMap<String, HashSet<String>>,
    /// group name -> member urls.
    groups: DashMap<String, DashSet<String>>,
    /// url -> private groups it currently belongs to (mirrors `groups`,
    /// indexed the other way for O(groups-of-url) cleanup on overwrite
    /// or delete).
    doc_groups: DashMap<String, HashSet<String>>,
    /// per-url lock registry enforcing spec.md §5's linearizability of
    /// writes to the same URL, while leaving different URLs unblocked.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl DomainState {
    fn new() -> Self {
        Self {
            titles: DashMap::new(),
            popularity: DashMap::new(),
            postings: DashMap::new(),
            reverse: DashMap::new(),
            groups: DashMap::new(),
            doc_groups: DashMap::new(),
            locks: DashMap::new(),
        }
    }
}

/// An in-memory, concurrency-safe [`Store`].
#[derive(Default)]
pub struct MemoryStore {
    domains: DashMap<String, Arc<DomainState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn domain(&self, domain: &str) -> Arc<DomainState> {
        self.domains
            .entry(domain.to_string())
            .or_insert_with(|| Arc::new(DomainState::new()))
            .clone()
    }

    fn domain_opt(&self, domain: &str) -> Option<Arc<DomainState>> {
        self.domains.get(domain).map(|d| d.clone())
    }
}

struct MemTx {
    domain: Arc<DomainState>,
    url: String,
}

impl Transaction for MemTx {
    fn title_put(&mut self, title: &str) {
        self.domain.titles.insert(self.url.clone(), title.to_string());
    }

    fn title_del(&mut self) {
        self.domain.titles.remove(&self.url);
    }

    fn popularity_put(&mut self, popularity: f64) {
        self.domain.popularity.insert(self.url.clone(), popularity);
    }

    fn popularity_del(&mut self) {
        self.domain.popularity.remove(&self.url);
    }

    fn posting_add(&mut self, prefix: &str, score: f64) {
        let list_lock = self
            .domain
            .postings
            .entry(prefix.to_string())
            .or_insert_with(|| RwLock::new(Vec::new()));
        let mut list = list_lock.write();
        list.retain(|(u, _)| u != &self.url);
        let pos = list.partition_point(|(_, s)| *s > score);
        list.insert(pos, (self.url.clone(), score));
    }

    fn posting_rem(&mut self, prefix: &str) {
        if let Some(list_lock) = self.domain.postings.get(prefix) {
            list_lock.write().retain(|(u, _)| u != &self.url);
        }
    }

    fn reverse_get(&self) -> HashSet<String> {
        self.domain
            .reverse
            .get(&self.url)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn reverse_put(&mut self, prefixes: HashSet<String>) {
        if prefixes.is_empty() {
            self.domain.reverse.remove(&self.url);
        } else {
            self.domain.reverse.insert(self.url.clone(), prefixes);
        }
    }

    fn reverse_del(&mut self) {
        self.domain.reverse.remove(&self.url);
    }

    fn group_add(&mut self, group: &str) {
        self.domain
            .groups
            .entry(group.to_string())
            .or_default()
            .insert(self.url.clone());
        self.domain
            .doc_groups
            .entry(self.url.clone())
            .or_default()
            .insert(group.to_string());
    }

    fn group_rem(&mut self, group: &str) {
        if let Some(set) = self.domain.groups.get(group) {
            set.remove(&self.url);
        }
        if let Some(mut mine) = self.domain.doc_groups.get_mut(&self.url) {
            mine.remove(group);
        }
    }

    fn current_groups(&self) -> HashSet<String> {
        self.domain
            .doc_groups
            .get(&self.url)
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}

impl Store for MemoryStore {
    fn transaction(&self, domain: &str, url: &str, f: TxFn<'_>) {
        let dom = self.domain(domain);
        let lock = dom
            .locks
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock();
        let mut tx = MemTx {
            domain: dom,
            url: url.to_string(),
        };
        f(&mut tx)
    }

    fn title_get(&self, domain: &str, url: &str) -> Option<String> {
        self.domain_opt(domain)?.titles.get(url).map(|t| t.clone())
    }

    fn popularity_get(&self, domain: &str, url: &str) -> Option<f64> {
        self.domain_opt(domain)?.popularity.get(url).map(|p| *p)
    }

    fn posting_top_by_score(&self, domain: &str, prefix: &str, limit: usize) -> Vec<(String, f64)> {
        let Some(dom) = self.domain_opt(domain) else {
            return Vec::new();
        };
        let result = match dom.postings.get(prefix) {
            Some(list_lock) => list_lock.read().iter().take(limit).cloned().collect(),
            None => Vec::new(),
        };
        result
    }

    fn group_members(&self, domain: &str, group: &str) -> HashSet<String> {
        let Some(dom) = self.domain_opt(domain) else {
            return HashSet::new();
        };
        let result = match dom.groups.get(group) {
            Some(set) => set.iter().map(|r| r.clone()).collect(),
            None => HashSet::new(),
        };
        result
    }

    fn is_public(&self, domain: &str, url: &str) -> bool {
        let Some(dom) = self.domain_opt(domain) else {
            return true;
        };
        let result = match dom.doc_groups.get(url) {
            Some(groups) => groups.is_empty(),
            None => true,
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Document;

    fn put(store: &MemoryStore, domain: &str, doc: &Document) {
        crate::indexer::put(store, domain, doc, crate::tokenizer::MAX_WORD_LEN).unwrap();
    }

    #[test]
    fn concurrent_writes_to_different_urls_do_not_block() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                let doc = Document {
                    url: format!("/doc/{i}"),
                    title: format!("Document number {i}"),
                    popularity: i as f64,
                    groups: Vec::new(),
                };
                put(&store, "d", &doc);
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        for i in 0..8 {
            assert_eq!(
                store.title_get("d", &format!("/doc/{i}")),
                Some(format!("Document number {i}"))
            );
        }
    }
}
