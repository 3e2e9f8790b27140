//! Author canonicalization
//!
//! Provides [`AuthorRegistry`], which maps author names to one shared
//! [`Author`] record per distinct name. Books hold `Arc<Author>` handles, so
//! a thousand books by one author share a single allocation.

use crate::error::{CatalogError, Result};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Immutable author record
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Author {
    name: String,
}

impl Author {
    /// Author name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Registry of canonical author records
///
/// Names are matched exactly (case-sensitive). The registry is thread-safe:
/// concurrent first requests for the same name still produce one record.
#[derive(Debug, Default)]
pub struct AuthorRegistry {
    authors: DashMap<String, Arc<Author>>,
}

impl AuthorRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            authors: DashMap::new(),
        }
    }

    /// Get the canonical record for `name`, creating it on first request
    ///
    /// # Errors
    /// Returns `Validation` if the name is empty or whitespace
    pub fn get_or_create(&self, name: &str) -> Result<Arc<Author>> {
        if name.trim().is_empty() {
            return Err(CatalogError::validation("author name cannot be empty"));
        }

        if let Some(existing) = self.authors.get(name) {
            return Ok(Arc::clone(existing.value()));
        }

        let entry = self.authors.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!("Registering author: {}", name);
            Arc::new(Author {
                name: name.to_string(),
            })
        });
        Ok(Arc::clone(entry.value()))
    }

    /// Lookup without creating
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Author>> {
        self.authors.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Number of distinct authors seen
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.authors.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
