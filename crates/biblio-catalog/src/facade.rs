//! Catalog facade
//!
//! [`CatalogFacade`] is the single entry point for one user. It:
//! - runs the role gate before every mutation
//! - canonicalizes authors and resolves categories when adding books
//! - drives the lending state machine by title
//! - delegates free-text search to a [`SearchSystem`]
//!
//! Any number of facades can share one [`SharedCatalog`]; each mutation,
//! including the title lookup it depends on, runs under one write lock.

use crate::access::{AccessControl, Action};
use crate::checkout::CheckoutService;
use crate::error::{CatalogError, Result};
use crate::rating::{self, Rating};
use crate::render::RenderLine;
use crate::search::{SearchAdapter, SearchSystem};
use crate::shared::SharedCatalog;
use crate::store::CatalogStore;
use crate::types::{BookId, CategoryId, User};
use std::fmt;

/// Per-user entry point to the shared catalog
pub struct CatalogFacade {
    user: User,
    catalog: SharedCatalog,
    access: AccessControl,
    lending: CheckoutService,
    search: Box<dyn SearchSystem>,
}

impl CatalogFacade {
    /// Create facade for `user` over `catalog`
    #[must_use]
    pub fn new(user: User, catalog: SharedCatalog) -> Self {
        Self {
            user,
            catalog,
            access: AccessControl::new(),
            lending: CheckoutService::new(),
            search: Box::new(SearchAdapter::default()),
        }
    }

    /// Create facade over the process-wide catalog
    #[inline]
    #[must_use]
    pub fn for_user(user: User) -> Self {
        Self::new(user, SharedCatalog::global())
    }

    /// With a different search collaborator
    #[must_use]
    pub fn with_search(mut self, search: impl SearchSystem + 'static) -> Self {
        self.search = Box::new(search);
        self
    }

    /// Acting user
    #[inline]
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Underlying shared catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    /// Add a book (admin only)
    ///
    /// The category is matched by name anywhere in the catalog; a missing
    /// category is created under the root, and a blank one means the
    /// configured default category (the root unless configured).
    ///
    /// # Errors
    /// - `PermissionDenied` for non-admins; the catalog is left untouched
    /// - `Validation` for a blank title or author
    pub fn add_book(&self, category: &str, title: &str, author: &str) -> Result<BookId> {
        self.access.check(&self.user, Action::AddBook)?;
        if title.trim().is_empty() {
            return Err(CatalogError::validation("book title cannot be empty"));
        }
        let author = self.catalog.authors().get_or_create(author)?;

        let book = self.catalog.write(|store| {
            let category = self.resolve_category(store, category)?;
            store.add_book(category, title, author)
        })?;
        tracing::info!("{} added '{}'", self.user, title);
        Ok(book)
    }

    /// Search through the search collaborator
    ///
    /// # Errors
    /// Returns `Validation` for a blank query
    pub fn search(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(CatalogError::validation("query cannot be empty"));
        }
        self.search.search(query)
    }

    /// Set a book's rating
    ///
    /// Returns the previous rating, if any.
    ///
    /// # Errors
    /// - `Validation` for a blank title or a value outside `[0, 5]`
    /// - `NotFound` if no book has this title
    pub fn rate_book(&self, title: &str, value: f64) -> Result<Option<Rating>> {
        require_title(title)?;
        Rating::new(value)?;
        let lookup = self.catalog.config().lookup;
        self.catalog.write(|store| {
            let book = store
                .find_book_by_title(title, lookup)
                .ok_or_else(|| CatalogError::book_not_found(title))?;
            rating::set_rating(store, book, value)
        })
    }

    /// Check a book out to the acting user
    ///
    /// # Errors
    /// `PermissionDenied`, `NotFound` or `StateConflict`
    #[inline]
    pub fn checkout(&self, title: &str) -> Result<BookId> {
        let borrower = self.user.name().to_string();
        self.checkout_for(&borrower, title)
    }

    /// Check a book out to `borrower`
    ///
    /// Admins may lend to anyone; users only to themselves.
    ///
    /// # Errors
    /// `PermissionDenied`, `Validation`, `NotFound` or `StateConflict`
    pub fn checkout_for(&self, borrower: &str, title: &str) -> Result<BookId> {
        self.access
            .check(&self.user, Action::Checkout { target: borrower })?;
        require_title(title)?;
        let lookup = self.catalog.config().lookup;
        self.catalog
            .write(|store| self.lending.checkout_title(store, title, lookup, borrower))
    }

    /// Return a book
    ///
    /// Returns the borrower who had it.
    ///
    /// # Errors
    /// `PermissionDenied`, `Validation`, `NotFound` or `StateConflict`
    pub fn return_book(&self, title: &str) -> Result<String> {
        self.access.check(&self.user, Action::Return)?;
        require_title(title)?;
        let lookup = self.catalog.config().lookup;
        let (_, borrower) = self
            .catalog
            .write(|store| self.lending.return_title(store, title, lookup))?;
        Ok(borrower)
    }

    /// Render the catalog as it is right now
    #[must_use]
    pub fn show_catalog(&self) -> Vec<RenderLine> {
        self.catalog.read(|store| store.render().collect())
    }

    /// Number of distinct authors in the shared registry
    #[inline]
    #[must_use]
    pub fn author_count(&self) -> usize {
        self.catalog.authors().count()
    }

    fn resolve_category(&self, store: &mut CatalogStore, name: &str) -> Result<CategoryId> {
        let config = self.catalog.config();
        let name = if name.trim().is_empty() {
            config.default_category.as_str()
        } else {
            name
        };
        if name.trim().is_empty() {
            return Ok(store.root());
        }
        match store.find_category_by_name(name, config.lookup) {
            Some(id) => Ok(id),
            None => store.add_category(None, name),
        }
    }
}

impl fmt::Debug for CatalogFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogFacade")
            .field("user", &self.user)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::validation("book title cannot be empty"));
    }
    Ok(())
}
