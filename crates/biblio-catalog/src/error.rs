//! Error types for the catalog
//!
//! Every fallible catalog operation returns [`CatalogError`]:
//! - Validation of caller input (blank names, out-of-range ratings)
//! - Lookups of unknown categories and books
//! - Role gate denials
//! - Lending transitions attempted from the wrong state
//! - Configuration loading

use std::fmt;

/// Result alias used throughout the catalog
pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

/// Main catalog error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// Input rejected before touching the catalog
    #[error("validation failed: {0}")]
    Validation(String),

    /// Category or book does not exist
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What kind of node was looked up
        kind: NodeKind,
        /// Name, title or id used for the lookup
        name: String,
    },

    /// Role or identity check failed
    #[error("permission denied for {user}: {reason}")]
    PermissionDenied {
        /// Name of the acting user
        user: String,
        /// Human-readable reason
        reason: String,
    },

    /// Checkout or return attempted from the wrong state
    #[error("'{title}' is {state}")]
    StateConflict {
        /// Title of the book
        title: String,
        /// Current state, as rendered
        state: String,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Create validation error
    #[inline]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create not-found error for a category
    #[inline]
    pub fn category_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: NodeKind::Category,
            name: name.into(),
        }
    }

    /// Create not-found error for a book
    #[inline]
    pub fn book_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: NodeKind::Book,
            name: name.into(),
        }
    }

    /// Create permission error
    #[inline]
    pub fn permission_denied(user: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            user: user.into(),
            reason: reason.into(),
        }
    }

    /// Classify the error
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::StateConflict { .. } => ErrorKind::StateConflict,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Check if error is retryable
    ///
    /// Catalog operations are deterministic and leave state unchanged on
    /// failure, so retrying the same call yields the same error.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input
    Validation,
    /// Unknown node
    NotFound,
    /// Role gate denial
    PermissionDenied,
    /// Wrong lending state
    StateConflict,
    /// Bad configuration
    Config,
}

/// Node kinds used in lookups and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Category node
    Category,
    /// Book node
    Book,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => f.write_str("category"),
            Self::Book => f.write_str("book"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_kind() {
        let err = CatalogError::book_not_found("Dune");
        assert_eq!(err.to_string(), "book not found: Dune");

        let err = CatalogError::category_not_found("Scifi");
        assert_eq!(err.to_string(), "category not found: Scifi");
    }

    #[test]
    fn state_conflict_display() {
        let err = CatalogError::StateConflict {
            title: "Dune".into(),
            state: "Checked Out: Bob".into(),
        };
        assert_eq!(err.to_string(), "'Dune' is Checked Out: Bob");
    }

    #[test]
    fn kinds_are_classified() {
        assert_eq!(
            CatalogError::validation("empty").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CatalogError::permission_denied("bob", "admins only").kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(CatalogError::Config("bad".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn nothing_is_retryable() {
        assert!(!CatalogError::validation("x").is_retryable());
        assert!(!CatalogError::book_not_found("x").is_retryable());
        assert!(!CatalogError::StateConflict {
            title: "x".into(),
            state: "Available".into()
        }
        .is_retryable());
    }
}
