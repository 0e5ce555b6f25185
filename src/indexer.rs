//! Converts document writes into Index Store mutations (spec.md §4.3).

use crate::error::{AppError, AppResult};
use crate::store::Store;
use crate::tokenizer::index_prefixes;
use crate::types::{Document, PUBLIC_GROUP};

/// `PUT(Document d)`. Preconditions (`d.url` non-empty, `d.popularity`
/// finite and non-negative) are validated by the caller (the Service
/// Facade); this function assumes a well-formed `Document`. `max_word_len`
/// bounds prefix expansion (see [`crate::tokenizer::MAX_WORD_LEN`]).
///
/// All steps run inside one atomic transaction scoped to `(domain,
/// d.url)`, so a concurrent overwrite or delete of the same URL never
/// interleaves with this one (spec.md §5).
pub fn put(store: &dyn Store, domain: &str, doc: &Document, max_word_len: usize) -> AppResult<()> {
    let new_prefixes = index_prefixes(&doc.title, max_word_len);

    store.transaction(
        domain,
        &doc.url,
        Box::new(|tx| {
            let old_prefixes = tx.reverse_get();
            for prefix in old_prefixes.difference(&new_prefixes) {
                tx.posting_rem(prefix);
            }
            for prefix in &new_prefixes {
                tx.posting_add(prefix, doc.popularity);
            }
            tx.reverse_put(new_prefixes.clone());

            tx.title_put(&doc.title);
            tx.popularity_put(doc.popularity);

            let old_groups = tx.current_groups();
            let new_groups: std::collections::HashSet<String> =
                doc.groups.iter().cloned().collect();
            for group in old_groups.difference(&new_groups) {
                tx.group_rem(group);
            }
            for group in &new_groups {
                tx.group_add(group);
            }
        }),
    );

    Ok(())
}

/// `DELETE(url)`. Missing document is a no-op (spec.md §4.3, §7).
pub fn delete(store: &dyn Store, domain: &str, url: &str) -> AppResult<()> {
    store.transaction(
        domain,
        url,
        Box::new(|tx| {
            let prefixes = tx.reverse_get();
            for prefix in &prefixes {
                tx.posting_rem(prefix);
            }
            tx.reverse_del();
            tx.title_del();
            tx.popularity_del();
            for group in tx.current_groups() {
                tx.group_rem(&group);
            }
        }),
    );
    Ok(())
}

/// Validates a raw popularity string per spec.md §4.3's precondition:
/// must parse as a finite, non-negative number. Absence defaults to
/// `0.0` (spec.md §9, Open Question (a), resolved in SPEC_FULL.md §3).
pub fn parse_popularity(raw: Option<&str>) -> AppResult<f64> {
    match raw {
        None => Ok(0.0),
        Some(s) if s.trim().is_empty() => Ok(0.0),
        Some(s) => {
            let value: f64 = s
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("invalid popularity: {s:?}")))?;
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Validation(format!("invalid popularity: {s:?}")));
            }
            Ok(value)
        }
    }
}

/// Parses a comma-separated `groups` field. An absent field, or any
/// comma-separated entry equal to the [`PUBLIC_GROUP`] sentinel, means
/// public-only (spec.md §4.3).
pub fn parse_groups(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(s) => s
            .split(',')
            .map(|g| g.trim())
            .filter(|g| *g != PUBLIC_GROUP)
            .map(|g| g.to_string())
            .collect(),
    }
}
