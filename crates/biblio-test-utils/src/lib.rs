//! Testing utilities for the biblio workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use biblio_catalog::{BookId, CatalogConfig, CatalogFacade, CatalogStore, LookupMode, SharedCatalog, User};

pub fn admin() -> User {
    User::admin("Admin").unwrap()
}

pub fn member(name: &str) -> User {
    User::member(name).unwrap()
}

pub fn fresh_catalog() -> SharedCatalog {
    SharedCatalog::new(CatalogConfig::default())
}

pub fn admin_facade(catalog: &SharedCatalog) -> CatalogFacade {
    CatalogFacade::new(admin(), catalog.clone())
}

pub fn member_facade(name: &str, catalog: &SharedCatalog) -> CatalogFacade {
    CatalogFacade::new(member(name), catalog.clone())
}

/// Catalog seeded with the books used across the integration suites
pub fn seeded_catalog() -> SharedCatalog {
    let catalog = fresh_catalog();
    let admin = admin_facade(&catalog);
    for (category, title, author) in [
        ("Fantasy", "The Name of the Wind", "Patrick Rothfuss"),
        ("Science Fiction", "Dune", "Frank Herbert"),
        ("Fantasy", "The Way of Kings", "Brandon Sanderson"),
        ("Fantasy", "The Wise Man's Fear", "Patrick Rothfuss"),
        ("Mystery", "The Girl with the Dragon Tattoo", "Stieg Larsson"),
    ] {
        admin.add_book(category, title, author).unwrap();
    }
    catalog
}

pub fn book_id(catalog: &SharedCatalog, title: &str) -> BookId {
    catalog
        .read(|s| s.find_book_by_title(title, LookupMode::CaseInsensitive))
        .unwrap_or_else(|| panic!("no book titled {title:?}"))
}

pub fn rendered(catalog: &SharedCatalog) -> Vec<String> {
    catalog.read(|store| store.render().map(|line| line.to_string()).collect())
}

pub fn book_count(catalog: &SharedCatalog) -> usize {
    catalog.read(CatalogStore::book_count)
}

/// Assert the full rendered catalog, line by line
pub fn assert_rendered(catalog: &SharedCatalog, expected: &[&str]) {
    let actual = rendered(catalog);
    let expected: Vec<String> = expected.iter().map(|s| (*s).to_string()).collect();
    pretty_assertions::assert_eq!(actual, expected);
}
