//! Book rating attribute
//!
//! A rating is plain data on the stored [`BookNode`](crate::store::BookNode).
//! Because every category lists the book by id, setting a rating once is
//! visible wherever the book appears.

use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;
use crate::types::BookId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated rating in `[0, 5]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Lowest allowed value
    pub const MIN: f64 = 0.0;
    /// Highest allowed value
    pub const MAX: f64 = 5.0;

    /// Create rating
    ///
    /// # Errors
    /// Returns `Validation` if the value is outside `[0, 5]` or not finite
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(CatalogError::validation(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = CatalogError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Midpoints round away from zero.
        write!(f, "{:.1}", (self.0 * 10.0).round() / 10.0)
    }
}

/// Set or replace the rating on a book
///
/// Returns the previous rating, if any.
///
/// # Errors
/// - `Validation` if the value is out of range
/// - `NotFound` if the book does not exist
pub fn set_rating(store: &mut CatalogStore, book: BookId, value: f64) -> Result<Option<Rating>> {
    let rating = Rating::new(value)?;
    let node = store.book_mut(book)?;
    let previous = node.replace_rating(Some(rating));
    tracing::info!("Rated '{}' {}", node.title(), rating);
    Ok(previous)
}

/// Remove the rating from a book
///
/// # Errors
/// Returns `NotFound` if the book does not exist
pub fn clear_rating(store: &mut CatalogStore, book: BookId) -> Result<Option<Rating>> {
    Ok(store.book_mut(book)?.replace_rating(None))
}
