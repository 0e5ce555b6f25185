//! Query Engine: prefix retrieval, intersection, ranking, and group
//! filtering (spec.md §4.4).

use std::collections::HashSet;

use crate::error::AppResult;
use crate::store::Store;
use crate::tokenizer::{echo_terms, tokenize};
use crate::types::{QueryResponse, ResultRow};

/// Default posting-list fetch cap for intersection (`LARGE` in spec.md
/// §4.4). Large enough that a multi-term AND over realistic title counts
/// does not lose candidates before the intersection step (SPEC_FULL.md
/// §4.4). Overridable via `TYPEAHEAD_LARGE` (see [`crate::config::Config`]).
pub const LARGE: usize = 1000;

/// Hard cap on the number of results returned for one query
/// (SPEC_FULL.md §3; spec.md §4.4 recommends it, this makes it binding).
pub const MAX_LIMIT: usize = 100;

/// Default result count when `n` is absent or non-positive.
pub const DEFAULT_LIMIT: usize = 10;

/// `GET(query, domain, limit, groups)` (spec.md §4.4). `large` is the
/// posting-list fetch cap per term before intersection (see [`LARGE`]).
pub fn query(
    store: &dyn Store,
    domain: &str,
    q: &str,
    limit: usize,
    groups: &[String],
    large: usize,
) -> AppResult<QueryResponse> {
    let terms = tokenize(q);
    if terms.is_empty() {
        return Ok(QueryResponse {
            terms: echo_terms(q),
            results: Vec::new(),
        });
    }

    let mut ranked: Option<Vec<(String, f64)>> = None;
    let mut qualifying: Option<HashSet<String>> = None;

    for term in &terms {
        let postings = store.posting_top_by_score(domain, term, large);
        let urls: HashSet<String> = postings.iter().map(|(u, _)| u.clone()).collect();

        qualifying = Some(match qualifying {
            None => urls,
            Some(prev) => prev.intersection(&urls).cloned().collect(),
        });

        if ranked.is_none() {
            ranked = Some(postings);
        }
    }

    let qualifying = qualifying.unwrap_or_default();
    let ranked = ranked.unwrap_or_default();

    // Union of the requested private groups' members; public URLs are
    // always allowed regardless of this set (spec.md §4.4).
    let mut private_allowed = HashSet::new();
    for group in groups {
        private_allowed.extend(store.group_members(domain, group));
    }

    let mut results = Vec::with_capacity(limit.min(ranked.len()));
    for (url, _score) in ranked {
        if results.len() >= limit {
            break;
        }
        if !qualifying.contains(&url) {
            continue;
        }
        if !store.is_public(domain, &url) && !private_allowed.contains(&url) {
            continue;
        }
        if let Some(title) = store.title_get(domain, &url) {
            results.push(ResultRow(url, title));
        }
    }

    Ok(QueryResponse {
        terms: echo_terms(q),
        results,
    })
}

/// Clamp the requested result count per spec.md §4.4: absent/non-positive
/// falls back to [`DEFAULT_LIMIT`], anything above [`MAX_LIMIT`] is
/// clamped down.
pub fn clamp_limit(n: Option<i64>) -> usize {
    match n {
        None => DEFAULT_LIMIT,
        Some(n) if n <= 0 => DEFAULT_LIMIT,
        Some(n) => (n as usize).min(MAX_LIMIT),
    }
}
