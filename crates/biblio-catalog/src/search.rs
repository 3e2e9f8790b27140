//! Search collaborator
//!
//! The catalog does not rank or index anything itself. It calls a
//! [`SearchSystem`]; the default one, [`SearchAdapter`], wraps the legacy
//! search service that only understands JSON query documents.

use crate::error::{CatalogError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Plain-text search contract
#[cfg_attr(test, mockall::automock)]
pub trait SearchSystem: Send + Sync {
    /// Run `query` and return the service's result text
    ///
    /// # Errors
    /// Returns `Validation` for queries the service cannot accept
    fn search(&self, query: &str) -> Result<String>;
}

/// Legacy search service
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySearchSystem;

impl LegacySearchSystem {
    /// Search with a JSON query document
    #[must_use]
    pub fn legacy_search(&self, json_query: &str) -> String {
        format!("Search results for query: {json_query}")
    }
}

/// Query document understood by the legacy service
#[derive(Debug, Serialize)]
struct LegacyQuery<'a> {
    query: &'a str,
    timestamp: String,
}

impl<'a> LegacyQuery<'a> {
    fn new(query: &'a str, at: DateTime<Utc>) -> Self {
        Self {
            query,
            timestamp: at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}

/// Adapts plain-text queries to the legacy JSON interface
#[derive(Debug, Clone, Default)]
pub struct SearchAdapter {
    legacy: LegacySearchSystem,
}

impl SearchAdapter {
    /// Wrap a legacy service
    #[inline]
    #[must_use]
    pub fn new(legacy: LegacySearchSystem) -> Self {
        Self { legacy }
    }

    fn to_json(query: &str, at: DateTime<Utc>) -> Result<String> {
        serde_json::to_string(&LegacyQuery::new(query, at))
            .map_err(|e| CatalogError::validation(format!("cannot encode query: {e}")))
    }
}

impl SearchSystem for SearchAdapter {
    fn search(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(CatalogError::validation("query cannot be empty"));
        }
        let json = Self::to_json(query, Utc::now())?;
        tracing::debug!("Legacy search: {}", json);
        Ok(self.legacy.legacy_search(&json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn query_document_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let json = SearchAdapter::to_json("fantasy books", at).unwrap();
        assert_eq!(
            json,
            r#"{"query":"fantasy books","timestamp":"2024-03-01T12:30:05Z"}"#
        );
    }

    #[test]
    fn quotes_are_escaped() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let json = SearchAdapter::to_json(r#"say "hi""#, at).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["query"], r#"say "hi""#);
    }

    #[test]
    fn adapter_forwards_to_legacy() {
        let result = SearchAdapter::default().search("Harry Potter").unwrap();
        assert!(result.starts_with("Search results for query: {"));
        assert!(result.contains(r#""query":"Harry Potter""#));
    }

    #[test]
    fn blank_query_is_rejected() {
        let err = SearchAdapter::default().search("   ").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
