//! Shared data types for the autocomplete engine.

use serde::{Deserialize, Serialize};

/// A document as submitted by a tenant: a URL, its title, an optional
/// popularity score, and the set of groups it is visible to.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub url: String,
    pub title: String,
    pub popularity: f64,
    /// Private groups this document belongs to. Empty means public-only.
    pub groups: Vec<String>,
}

/// A `[url, title]` pair, serialized as a JSON 2-tuple to match the
/// response shape in spec.md §6 exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow(pub String, pub String);

impl Serialize for ResultRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.0)?;
        seq.serialize_element(&self.1)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ResultRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (url, title) = <(String, String)>::deserialize(deserializer)?;
        Ok(ResultRow(url, title))
    }
}

/// The response body for a GET `/v1` query: `{terms, results}` per
/// spec.md §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub terms: Vec<String>,
    pub results: Vec<ResultRow>,
}

/// The public group every document belongs to when it declares no
/// private groups (spec.md glossary: "Public group").
pub const PUBLIC_GROUP: &str = "";
