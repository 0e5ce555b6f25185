//! The Index Store: a thin named-key layer over a KV backend (spec.md §4.2).
//!
//! `Store` exposes the primitives the rest of the system calls; any KV
//! backend providing ordered-by-score membership and atomic multi-key
//! pipelines can implement it. [`memory::MemoryStore`] is the in-memory
//! implementation, which spec.md §9 calls out as sufficient for tests.

pub mod memory;

use std::collections::HashSet;

/// A transaction body, boxed so [`Store::transaction`] stays object-safe.
pub type TxFn<'a> = Box<dyn FnOnce(&mut dyn Transaction) + 'a>;

/// A single transaction scoped to one `(domain, url)` pair. All writes
/// issued against a `Transaction` are applied atomically with respect
/// to other transactions on the same pair (spec.md §4.3, §5).
pub trait Transaction {
    fn title_put(&mut self, title: &str);
    fn title_del(&mut self);
    fn popularity_put(&mut self, popularity: f64);
    fn popularity_del(&mut self);
    fn posting_add(&mut self, prefix: &str, score: f64);
    fn posting_rem(&mut self, prefix: &str);
    fn reverse_get(&self) -> HashSet<String>;
    fn reverse_put(&mut self, prefixes: HashSet<String>);
    fn reverse_del(&mut self);
    fn group_add(&mut self, group: &str);
    fn group_rem(&mut self, group: &str);
    /// Private groups this URL currently belongs to (used to compute the
    /// `old \ new` difference on overwrite and to clean up on delete).
    fn current_groups(&self) -> HashSet<String>;
}

/// The Index Store contract (spec.md §4.2), partitioned by domain.
pub trait Store: Send + Sync {
    /// Run `f` inside an atomic transaction scoped to `(domain, url)`.
    /// Concurrent transactions on different `(domain, url)` pairs never
    /// block one another (spec.md §5). Boxed rather than generic so
    /// `Store` stays object-safe (used behind `Arc<dyn Store>`).
    fn transaction(&self, domain: &str, url: &str, f: TxFn<'_>);

    fn title_get(&self, domain: &str, url: &str) -> Option<String>;
    fn popularity_get(&self, domain: &str, url: &str) -> Option<f64>;

    /// Postings for `prefix`, ordered by score descending, at most
    /// `limit` entries.
    fn posting_top_by_score(&self, domain: &str, prefix: &str, limit: usize) -> Vec<(String, f64)>;

    fn group_members(&self, domain: &str, group: &str) -> HashSet<String>;

    /// True if `url` belongs to no private group in `domain`, i.e. it is
    /// visible under the implicit public group (spec.md §3).
    fn is_public(&self, domain: &str, url: &str) -> bool;
}
