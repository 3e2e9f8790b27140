//! Functional tests for role-gated lending through the facade.
//!
//! These tests exercise several facades sharing one catalog:
//! - Only admins add books; denied calls leave the catalog untouched.
//! - Checkout and return follow the Available / CheckedOut state machine.
//! - Every failure is a typed error and leaves state unchanged.

use biblio_catalog::{CatalogError, ErrorKind};
use biblio_test_utils::{
    admin_facade, assert_rendered, book_count, fresh_catalog, member_facade, seeded_catalog,
};

#[test]
fn dune_lending_round_trip() {
    let catalog = fresh_catalog();
    let admin = admin_facade(&catalog);
    let bob = member_facade("Bob", &catalog);
    let alice = member_facade("Alice", &catalog);

    admin.add_book("Scifi", "Dune", "Frank Herbert").unwrap();
    assert_rendered(
        &catalog,
        &[
            "+ Category: Library Catalog",
            "  + Category: Scifi",
            "    - Book: Dune, Author: Frank Herbert [Available]",
        ],
    );

    bob.checkout("Dune").unwrap();
    let checked_out = [
        "+ Category: Library Catalog",
        "  + Category: Scifi",
        "    - Book: Dune, Author: Frank Herbert [Checked Out: Bob]",
    ];
    assert_rendered(&catalog, &checked_out);

    let err = alice.checkout("Dune").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StateConflict);
    assert_rendered(&catalog, &checked_out);

    assert_eq!(bob.return_book("Dune").unwrap(), "Bob");
    assert_rendered(
        &catalog,
        &[
            "+ Category: Library Catalog",
            "  + Category: Scifi",
            "    - Book: Dune, Author: Frank Herbert [Available]",
        ],
    );
}

#[test]
fn member_add_book_is_a_no_op() {
    let catalog = seeded_catalog();
    let before = book_count(&catalog);

    let err = member_facade("Bob", &catalog)
        .add_book("Fantasy", "The Hobbit", "J.R.R. Tolkien")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(book_count(&catalog), before);
}

#[test]
fn admin_add_book_adds_exactly_one() {
    let catalog = seeded_catalog();
    let before = book_count(&catalog);

    admin_facade(&catalog)
        .add_book("Fantasy", "The Hobbit", "J.R.R. Tolkien")
        .unwrap();

    assert_eq!(book_count(&catalog), before + 1);
}

#[test]
fn authors_are_shared_across_facades() {
    let catalog = seeded_catalog();
    let admin = admin_facade(&catalog);
    assert_eq!(admin.author_count(), 4);

    admin
        .add_book("Fantasy", "The Slow Regard of Silent Things", "Patrick Rothfuss")
        .unwrap();
    assert_eq!(member_facade("Bob", &catalog).author_count(), 4);
}

#[test]
fn second_checkout_conflicts() {
    let catalog = seeded_catalog();
    let bob = member_facade("Bob", &catalog);

    bob.checkout("Dune").unwrap();
    let err = bob.checkout("Dune").unwrap_err();
    assert_eq!(
        err,
        CatalogError::StateConflict {
            title: "Dune".into(),
            state: "Checked Out: Bob".into(),
        }
    );
}

#[test]
fn returning_available_book_conflicts() {
    let catalog = seeded_catalog();
    let err = member_facade("Bob", &catalog)
        .return_book("Dune")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StateConflict);
}

#[test]
fn unknown_titles_are_not_found() {
    let catalog = seeded_catalog();
    let bob = member_facade("Bob", &catalog);
    assert_eq!(bob.checkout("Neuromancer").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(bob.return_book("Neuromancer").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(bob.rate_book("Neuromancer", 3.0).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn any_member_may_return() {
    let catalog = seeded_catalog();
    member_facade("Bob", &catalog).checkout("Dune").unwrap();

    let borrower = member_facade("Alice", &catalog).return_book("dune").unwrap();
    assert_eq!(borrower, "Bob");
}

#[test]
fn titles_match_case_insensitively() {
    let catalog = seeded_catalog();
    let bob = member_facade("Bob", &catalog);
    bob.checkout("THE WAY OF KINGS").unwrap();
    assert!(biblio_test_utils::rendered(&catalog)
        .iter()
        .any(|l| l.ends_with("The Way of Kings, Author: Brandon Sanderson [Checked Out: Bob]")));
}
