//! Role gate for catalog mutations
//!
//! | Action | Admin | User |
//! |---|---|---|
//! | `AddBook` | yes | no |
//! | `Checkout { target }` | any target | only themselves |
//! | `Return` | yes | yes |
//! | `RateBook` | yes | yes |

use crate::error::{CatalogError, Result};
use crate::types::{Role, User};
use std::fmt;

/// Gated action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Add a book to the catalog
    AddBook,
    /// Check a book out to `target`
    Checkout {
        /// Borrower name
        target: &'a str,
    },
    /// Return a book
    Return,
    /// Rate a book
    RateBook,
}

impl fmt::Display for Action<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddBook => f.write_str("add book"),
            Self::Checkout { target } => write!(f, "checkout for {target}"),
            Self::Return => f.write_str("return"),
            Self::RateBook => f.write_str("rate book"),
        }
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Action may proceed
    Allow,
    /// Action refused, with reason
    Deny(String),
}

impl Decision {
    /// Check if allowed
    #[inline]
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert into `PermissionDenied` for `user`
    ///
    /// # Errors
    /// Returns `PermissionDenied` when the decision is `Deny`
    pub fn into_result(self, user: &User) -> Result<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(CatalogError::permission_denied(user.name(), reason)),
        }
    }
}

/// Role-based access control
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessControl;

impl AccessControl {
    /// Create access control
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `user` may perform `action`
    #[must_use]
    pub fn authorize(&self, user: &User, action: Action<'_>) -> Decision {
        let decision = match (user.role(), action) {
            (Role::Admin, _)
            | (Role::User, Action::Return | Action::RateBook) => Decision::Allow,
            (Role::User, Action::AddBook) => {
                Decision::Deny("only administrators can add books to the catalog".into())
            }
            (Role::User, Action::Checkout { target }) if target == user.name() => Decision::Allow,
            (Role::User, Action::Checkout { .. }) => {
                Decision::Deny("users can only check out books for themselves".into())
            }
        };

        match &decision {
            Decision::Allow => tracing::debug!("Allowed {} for {}", action, user),
            Decision::Deny(reason) => tracing::warn!("Access denied: {} for {}: {}", action, user, reason),
        }
        decision
    }

    /// Authorize and convert a denial into an error
    ///
    /// # Errors
    /// Returns `PermissionDenied` if the action is not allowed
    #[inline]
    pub fn check(&self, user: &User, action: Action<'_>) -> Result<()> {
        self.authorize(user, action).into_result(user)
    }
}
