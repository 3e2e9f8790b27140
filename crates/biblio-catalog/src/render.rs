//! Catalog display lines
//!
//! [`Render`] is a lazy pre-order traversal that turns the catalog graph into
//! [`RenderLine`]s. Calling [`CatalogStore::render`] again (or cloning a
//! `Render`) restarts the traversal from the beginning.
//!
//! Line formats, indented two spaces per depth level:
//!
//! ```text
//! + Category: Fantasy
//!   - Book: The Hobbit, Author: J.R.R. Tolkien [Available]
//!     *** Rating: 4.5 ***
//!   - Book: Dune, Author: Frank Herbert [Checked Out: Bob]
//! ```

use crate::store::{BookNode, CatalogStore, CategoryNode, Walk};
use crate::types::{CategoryId, NodeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One display line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderLine {
    /// Nesting depth, root is 0
    pub depth: usize,
    /// Unindented text
    pub text: String,
}

impl RenderLine {
    fn category(depth: usize, node: &CategoryNode) -> Self {
        Self {
            depth,
            text: format!("+ Category: {}", node.name()),
        }
    }

    fn book(depth: usize, node: &BookNode) -> Self {
        Self {
            depth,
            text: format!(
                "- Book: {}, Author: {} [{}]",
                node.title(),
                node.author().name(),
                node.loan()
            ),
        }
    }
}

impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.text, indent = self.depth * 2)
    }
}

/// Lazy traversal producing display lines
#[derive(Debug, Clone)]
pub struct Render<'a> {
    store: &'a CatalogStore,
    walk: Walk<'a>,
    pending: Option<RenderLine>,
}

impl<'a> Render<'a> {
    pub(crate) fn new(store: &'a CatalogStore, start: CategoryId) -> Self {
        Self {
            store,
            walk: store.walk(start),
            pending: None,
        }
    }

    /// Collect into indented text, one line per entry
    #[must_use]
    pub fn to_text(self) -> String {
        self.map(|line| format!("{line}\n")).collect()
    }
}

impl Iterator for Render<'_> {
    type Item = RenderLine;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.pending.take() {
            return Some(line);
        }

        loop {
            let (depth, node) = self.walk.next()?;
            match node {
                NodeRef::Category(id) => {
                    if let Some(category) = self.store.category(id) {
                        return Some(RenderLine::category(depth, category));
                    }
                }
                NodeRef::Book(id) => {
                    if let Some(book) = self.store.book(id) {
                        self.pending = book.rating().map(|rating| RenderLine {
                            depth: depth + 1,
                            text: format!("*** Rating: {rating} ***"),
                        });
                        return Some(RenderLine::book(depth, book));
                    }
                }
            }
        }
    }
}
