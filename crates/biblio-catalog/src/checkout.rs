//! Lending state machine
//!
//! Each book is either `Available` or `CheckedOut(borrower)`:
//!
//! ```text
//! Available ──checkout(borrower)──▶ CheckedOut(borrower)
//!     ▲                                   │
//!     └──────────────return───────────────┘
//! ```
//!
//! Any other move is a `StateConflict`. A failed transition never touches
//! the stored node.

use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;
use crate::types::{BookId, LookupMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lending state of a book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoanState {
    /// On the shelf
    #[default]
    Available,
    /// Lent to the named borrower
    CheckedOut(String),
}

impl LoanState {
    /// Phase without the borrower
    #[inline]
    #[must_use]
    pub fn phase(&self) -> LoanPhase {
        match self {
            Self::Available => LoanPhase::Available,
            Self::CheckedOut(_) => LoanPhase::CheckedOut,
        }
    }

    /// Borrower, if checked out
    #[inline]
    #[must_use]
    pub fn borrower(&self) -> Option<&str> {
        match self {
            Self::Available => None,
            Self::CheckedOut(who) => Some(who),
        }
    }

    /// Check if available
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for LoanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("Available"),
            Self::CheckedOut(who) => write!(f, "Checked Out: {who}"),
        }
    }
}

/// Lending phase, used by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanPhase {
    /// On the shelf
    Available,
    /// Lent out
    CheckedOut,
}

/// Phases reachable from `from`
#[must_use]
pub fn allowed_transitions(from: LoanPhase) -> &'static [LoanPhase] {
    match from {
        LoanPhase::Available => &[LoanPhase::CheckedOut],
        LoanPhase::CheckedOut => &[LoanPhase::Available],
    }
}

/// Check a phase change against the transition table
///
/// # Errors
/// Returns the offending `(from, to)` pair if the move is not allowed
pub fn validate_transition(from: LoanPhase, to: LoanPhase) -> Result<(), (LoanPhase, LoanPhase)> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err((from, to))
    }
}

/// Applies checkout and return transitions to stored books
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutService;

impl CheckoutService {
    /// Create service
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Lend `book` to `borrower`
    ///
    /// # Errors
    /// - `Validation` if the borrower name is blank
    /// - `NotFound` if the book does not exist
    /// - `StateConflict` if the book is already checked out
    pub fn checkout(&self, store: &mut CatalogStore, book: BookId, borrower: &str) -> Result<()> {
        if borrower.trim().is_empty() {
            return Err(CatalogError::validation("borrower name cannot be empty"));
        }
        self.transition(store, book, LoanState::CheckedOut(borrower.to_string()))?;
        Ok(())
    }

    /// Take `book` back
    ///
    /// Returns the borrower who had it.
    ///
    /// # Errors
    /// - `NotFound` if the book does not exist
    /// - `StateConflict` if the book is already available
    pub fn return_book(&self, store: &mut CatalogStore, book: BookId) -> Result<String> {
        let previous = self.transition(store, book, LoanState::Available)?;
        Ok(match previous {
            LoanState::CheckedOut(who) => who,
            LoanState::Available => String::new(),
        })
    }

    /// Resolve `title` and lend it to `borrower`
    ///
    /// # Errors
    /// As [`checkout`](Self::checkout), with `NotFound` for unknown titles
    pub fn checkout_title(
        &self,
        store: &mut CatalogStore,
        title: &str,
        mode: LookupMode,
        borrower: &str,
    ) -> Result<BookId> {
        let book = store
            .find_book_by_title(title, mode)
            .ok_or_else(|| CatalogError::book_not_found(title))?;
        self.checkout(store, book, borrower)?;
        Ok(book)
    }

    /// Resolve `title` and take it back
    ///
    /// # Errors
    /// As [`return_book`](Self::return_book), with `NotFound` for unknown titles
    pub fn return_title(
        &self,
        store: &mut CatalogStore,
        title: &str,
        mode: LookupMode,
    ) -> Result<(BookId, String)> {
        let book = store
            .find_book_by_title(title, mode)
            .ok_or_else(|| CatalogError::book_not_found(title))?;
        let borrower = self.return_book(store, book)?;
        Ok((book, borrower))
    }

    fn transition(
        &self,
        store: &mut CatalogStore,
        book: BookId,
        next: LoanState,
    ) -> Result<LoanState> {
        let node = store.book_mut(book)?;
        if validate_transition(node.loan().phase(), next.phase()).is_err() {
            tracing::warn!("Rejected {:?} for '{}': {}", next.phase(), node.title(), node.loan());
            return Err(CatalogError::StateConflict {
                title: node.title().to_string(),
                state: node.loan().to_string(),
            });
        }
        tracing::info!("'{}': {} -> {}", node.title(), node.loan(), next);
        Ok(node.replace_loan(next))
    }
}
