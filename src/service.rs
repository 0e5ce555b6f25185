//! Service Facade (spec.md §4.5): validates inputs, resolves
//! auth-key → domain, and dispatches to the Indexer or Query Engine.
//! Deliberately thin — all substantive logic lives in [`crate::indexer`]
//! and [`crate::query`].

use std::sync::Arc;

use crate::auth::AuthTable;
use crate::error::{AppError, AppResult};
use crate::indexer::{self, parse_groups, parse_popularity};
use crate::query::{self, clamp_limit};
use crate::store::Store;
use crate::types::{Document, QueryResponse};

pub struct Facade {
    pub store: Arc<dyn Store>,
    pub auth: Arc<AuthTable>,
    large: usize,
    max_word_len: usize,
}

impl Facade {
    pub fn new(
        store: Arc<dyn Store>,
        auth: Arc<AuthTable>,
        large: usize,
        max_word_len: usize,
    ) -> Self {
        Self {
            store,
            auth,
            large,
            max_word_len,
        }
    }

    fn resolve_domain(&self, auth_key: Option<&str>) -> AppResult<String> {
        auth_key
            .and_then(|key| self.auth.resolve(key))
            .ok_or(AppError::Auth)
    }

    /// GET `/v1`.
    pub fn search(
        &self,
        q: &str,
        d: Option<&str>,
        n: Option<&str>,
        g: Option<&str>,
    ) -> AppResult<QueryResponse> {
        let domain = d
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::Validation("missing domain".into()))?;

        let limit = match n {
            None => query::DEFAULT_LIMIT,
            Some(s) => {
                let parsed: i64 = s
                    .parse()
                    .map_err(|_| AppError::Validation(format!("invalid n: {s:?}")))?;
                clamp_limit(Some(parsed))
            }
        };

        let groups = parse_groups(g);

        query::query(self.store.as_ref(), domain, q, limit, &groups, self.large)
    }

    /// POST `/v1`.
    pub fn submit(
        &self,
        auth_key: Option<&str>,
        url: &str,
        title: &str,
        popularity: Option<&str>,
        groups: Option<&str>,
    ) -> AppResult<()> {
        let domain = self.resolve_domain(auth_key)?;

        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::Validation("missing url".into()));
        }
        let popularity = parse_popularity(popularity)?;
        let groups = parse_groups(groups);

        let doc = Document {
            url: url.to_string(),
            title: title.to_string(),
            popularity,
            groups,
        };

        indexer::put(self.store.as_ref(), &domain, &doc, self.max_word_len)
    }

    /// DELETE `/v1`.
    pub fn remove(&self, auth_key: Option<&str>, url: &str) -> AppResult<()> {
        let domain = self.resolve_domain(auth_key)?;
        let url = url.trim();
        indexer::delete(self.store.as_ref(), &domain, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::LARGE;
    use crate::store::memory::MemoryStore;
    use crate::tokenizer::MAX_WORD_LEN;

    fn facade() -> Facade {
        let store = Arc::new(MemoryStore::new());
        let auth = Arc::new(AuthTable::new());
        auth.insert("xyz123", "peterbecom");
        Facade::new(store, auth, LARGE, MAX_WORD_LEN)
    }

    #[test]
    fn unknown_auth_key_is_rejected() {
        let f = facade();
        let err = f
            .submit(Some("junkjunk"), "/a", "Title", None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::Auth));
    }

    #[test]
    fn missing_auth_key_is_rejected() {
        let f = facade();
        let err = f.submit(None, "/a", "Title", None, None).unwrap_err();
        assert!(matches!(err, AppError::Auth));
    }

    #[test]
    fn bad_popularity_is_a_validation_error() {
        let f = facade();
        let err = f
            .submit(Some("xyz123"), "/a", "Title", Some("1.2.x"), None)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn url_is_trimmed_before_storage() {
        let f = facade();
        f.submit(Some("xyz123"), "  /a  ", "Title", None, None)
            .unwrap();
        let resp = f.search("ti", Some("peterbecom"), None, None).unwrap();
        assert_eq!(resp.results[0].0, "/a");
    }

    #[test]
    fn missing_domain_on_search_is_a_validation_error() {
        let f = facade();
        let err = f.search("q", None, None, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn non_integer_n_is_a_validation_error() {
        let f = facade();
        let err = f.search("q", Some("peterbecom"), Some("x"), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
