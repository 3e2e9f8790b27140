//! Biblio Catalog
//!
//! A shared library catalog of categories and books.
//!
//! # Overview
//!
//! The catalog provides:
//! - **AuthorRegistry**: one shared record per author name
//! - **CatalogStore**: id-keyed category/book graph where a book can be
//!   listed under many categories
//! - **Rating**: validated rating attribute on a book
//! - **AccessControl**: role gate in front of every mutation
//! - **CheckoutService**: `Available` / `CheckedOut` lending state machine
//! - **CatalogFacade**: per-user entry point over a [`SharedCatalog`]
//!
//! # Example
//!
//! ```rust
//! use biblio_catalog::{CatalogConfig, CatalogFacade, SharedCatalog, User};
//!
//! let catalog = SharedCatalog::new(CatalogConfig::default());
//! let admin = CatalogFacade::new(User::admin("root").unwrap(), catalog.clone());
//! let bob = CatalogFacade::new(User::member("Bob").unwrap(), catalog);
//!
//! admin.add_book("Scifi", "Dune", "Frank Herbert").unwrap();
//! bob.checkout("Dune").unwrap();
//!
//! let lines: Vec<String> = bob.show_catalog().iter().map(ToString::to_string).collect();
//! assert_eq!(lines[2], "    - Book: Dune, Author: Frank Herbert [Checked Out: Bob]");
//! ```

#![warn(missing_docs)]

pub mod access;
pub mod author;
pub mod checkout;
pub mod config;
pub mod error;
pub mod facade;
pub mod rating;
pub mod render;
pub mod search;
pub mod shared;
pub mod store;
pub mod types;

// Re-exports
pub use access::{AccessControl, Action, Decision};
pub use author::{Author, AuthorRegistry};
pub use checkout::{allowed_transitions, validate_transition, CheckoutService, LoanPhase, LoanState};
pub use config::{CatalogConfig, DEFAULT_ROOT_NAME};
pub use error::{CatalogError, ErrorKind, NodeKind, Result};
pub use facade::CatalogFacade;
pub use rating::{clear_rating, set_rating, Rating};
pub use render::{Render, RenderLine};
pub use search::{LegacySearchSystem, SearchAdapter, SearchSystem};
pub use shared::SharedCatalog;
pub use store::{BookNode, CatalogStore, CategoryNode};
pub use types::{BookId, CategoryId, LookupMode, NodeRef, Role, User};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog operations
    pub use crate::{
        CatalogConfig, CatalogError, CatalogFacade, CatalogStore, LookupMode, Rating, RenderLine,
        Role, SharedCatalog, User,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
