//! Catalog graph storage
//!
//! [`CatalogStore`] owns every category and book in flat id-keyed maps.
//! Categories keep an ordered list of [`NodeRef`]s; a book id may appear in
//! any number of categories and always resolves to the one stored node.
//!
//! Categories themselves form a tree under the root: they are only ever
//! created beneath an existing parent, so traversal cannot cycle.

use crate::author::Author;
use crate::checkout::LoanState;
use crate::error::{CatalogError, Result};
use crate::rating::Rating;
use crate::render::Render;
use crate::types::{BookId, CategoryId, LookupMode, NodeRef};
use std::collections::HashMap;
use std::sync::Arc;

/// Book leaf
#[derive(Debug, Clone)]
pub struct BookNode {
    id: BookId,
    title: String,
    author: Arc<Author>,
    loan: LoanState,
    rating: Option<Rating>,
}

impl BookNode {
    /// Book id
    #[inline]
    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Book title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Shared author record
    #[inline]
    #[must_use]
    pub fn author(&self) -> &Arc<Author> {
        &self.author
    }

    /// Current lending state
    #[inline]
    #[must_use]
    pub fn loan(&self) -> &LoanState {
        &self.loan
    }

    /// Borrower name, if checked out
    #[inline]
    #[must_use]
    pub fn checked_out_by(&self) -> Option<&str> {
        self.loan.borrower()
    }

    /// Rating attribute, if set
    #[inline]
    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub(crate) fn replace_loan(&mut self, loan: LoanState) -> LoanState {
        std::mem::replace(&mut self.loan, loan)
    }

    pub(crate) fn replace_rating(&mut self, rating: Option<Rating>) -> Option<Rating> {
        std::mem::replace(&mut self.rating, rating)
    }
}

/// Category node
#[derive(Debug, Clone)]
pub struct CategoryNode {
    id: CategoryId,
    name: String,
    children: Vec<NodeRef>,
}

impl CategoryNode {
    /// Category id
    #[inline]
    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Category name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in insertion order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }
}

/// Owner of the category/book graph
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: CategoryId,
    categories: HashMap<CategoryId, CategoryNode>,
    books: HashMap<BookId, BookNode>,
}

impl CatalogStore {
    /// Create store with a single root category
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = CategoryId::new();
        let mut categories = HashMap::new();
        categories.insert(
            root,
            CategoryNode {
                id: root,
                name: root_name.into(),
                children: Vec::new(),
            },
        );
        Self {
            root,
            categories,
            books: HashMap::new(),
        }
    }

    /// Root category id
    #[inline]
    #[must_use]
    pub fn root(&self) -> CategoryId {
        self.root
    }

    /// Create a category under `parent` (root when `None`)
    ///
    /// # Errors
    /// - `Validation` if the name is blank
    /// - `NotFound` if the parent does not exist
    pub fn add_category(
        &mut self,
        parent: Option<CategoryId>,
        name: impl Into<String>,
    ) -> Result<CategoryId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::validation("category name cannot be empty"));
        }

        let parent = parent.unwrap_or(self.root);
        let id = CategoryId::new();
        self.category_mut(parent)?
            .children
            .push(NodeRef::Category(id));
        tracing::debug!("Added category '{}' ({})", name, id);
        self.categories.insert(
            id,
            CategoryNode {
                id,
                name,
                children: Vec::new(),
            },
        );
        Ok(id)
    }

    /// Create a book and append it to `category`
    ///
    /// Adding an existing title again creates a second, distinct book.
    ///
    /// # Errors
    /// - `Validation` if the title is blank
    /// - `NotFound` if the category does not exist
    pub fn add_book(
        &mut self,
        category: CategoryId,
        title: impl Into<String>,
        author: Arc<Author>,
    ) -> Result<BookId> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CatalogError::validation("book title cannot be empty"));
        }

        let id = BookId::new();
        self.category_mut(category)?.children.push(NodeRef::Book(id));
        tracing::debug!("Added book '{}' ({}) to {}", title, id, category);
        self.books.insert(
            id,
            BookNode {
                id,
                title,
                author,
                loan: LoanState::Available,
                rating: None,
            },
        );
        Ok(id)
    }

    /// List an existing book under another category
    ///
    /// Linking a book into a category that already lists it does nothing.
    ///
    /// # Errors
    /// Returns `NotFound` if either id is unknown
    pub fn link_book(&mut self, category: CategoryId, book: BookId) -> Result<()> {
        if !self.books.contains_key(&book) {
            return Err(CatalogError::book_not_found(book.to_string()));
        }
        let node = self.category_mut(category)?;
        let child = NodeRef::Book(book);
        if !node.children.contains(&child) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Find first category named `name`, pre-order from the root
    #[must_use]
    pub fn find_category_by_name(&self, name: &str, mode: LookupMode) -> Option<CategoryId> {
        self.walk(self.root).find_map(|(_, node)| match node {
            NodeRef::Category(id) => self
                .categories
                .get(&id)
                .filter(|c| mode.matches(&c.name, name))
                .map(|_| id),
            NodeRef::Book(_) => None,
        })
    }

    /// Find first book titled `title`, pre-order over the whole catalog
    ///
    /// Titles are not unique keys: the first match in traversal order wins.
    #[inline]
    #[must_use]
    pub fn find_book_by_title(&self, title: &str, mode: LookupMode) -> Option<BookId> {
        self.find_book_in(self.root, title, mode)
    }

    /// Find first book titled `title` within one category's subtree
    #[must_use]
    pub fn find_book_in(
        &self,
        category: CategoryId,
        title: &str,
        mode: LookupMode,
    ) -> Option<BookId> {
        self.walk(category).find_map(|(_, node)| match node {
            NodeRef::Book(id) => self
                .books
                .get(&id)
                .filter(|b| mode.matches(&b.title, title))
                .map(|_| id),
            NodeRef::Category(_) => None,
        })
    }

    /// Get book by id
    #[inline]
    #[must_use]
    pub fn book(&self, id: BookId) -> Option<&BookNode> {
        self.books.get(&id)
    }

    /// Get book by id, or `NotFound`
    ///
    /// # Errors
    /// Returns `NotFound` if the id is unknown
    pub fn book_mut(&mut self, id: BookId) -> Result<&mut BookNode> {
        self.books
            .get_mut(&id)
            .ok_or_else(|| CatalogError::book_not_found(id.to_string()))
    }

    /// Get category by id
    #[inline]
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.categories.get(&id)
    }

    fn category_mut(&mut self, id: CategoryId) -> Result<&mut CategoryNode> {
        self.categories
            .get_mut(&id)
            .ok_or_else(|| CatalogError::category_not_found(id.to_string()))
    }

    /// Number of distinct books
    #[inline]
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of categories, root included
    #[inline]
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Render the whole catalog
    #[inline]
    #[must_use]
    pub fn render(&self) -> Render<'_> {
        Render::new(self, self.root)
    }

    /// Render one category's subtree
    #[inline]
    #[must_use]
    pub fn render_from(&self, category: CategoryId) -> Render<'_> {
        Render::new(self, category)
    }

    pub(crate) fn walk(&self, start: CategoryId) -> Walk<'_> {
        Walk {
            store: self,
            stack: vec![(0, NodeRef::Category(start))],
        }
    }
}

/// Depth-first pre-order walk yielding `(depth, node)`
///
/// Children are visited in insertion order. References to missing nodes are
/// skipped.
#[derive(Debug, Clone)]
pub(crate) struct Walk<'a> {
    store: &'a CatalogStore,
    stack: Vec<(usize, NodeRef)>,
}

impl Iterator for Walk<'_> {
    type Item = (usize, NodeRef);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, node) = self.stack.pop()?;
            match node {
                NodeRef::Category(id) => {
                    let Some(category) = self.store.categories.get(&id) else {
                        continue;
                    };
                    self.stack
                        .extend(category.children.iter().rev().map(|c| (depth + 1, *c)));
                }
                NodeRef::Book(id) => {
                    if !self.store.books.contains_key(&id) {
                        continue;
                    }
                }
            }
            return Some((depth, node));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::AuthorRegistry;

    fn author(name: &str) -> Arc<Author> {
        AuthorRegistry::new().get_or_create(name).unwrap()
    }

    #[test]
    fn new_store_has_root_only() {
        let store = CatalogStore::new("Library Catalog");
        assert_eq!(store.category_count(), 1);
        assert_eq!(store.book_count(), 0);
        assert_eq!(
            store.category(store.root()).unwrap().name(),
            "Library Catalog"
        );
    }

    #[test]
    fn add_category_appends_to_parent() {
        let mut store = CatalogStore::new("root");
        let fiction = store.add_category(None, "Fiction").unwrap();
        let fantasy = store.add_category(Some(fiction), "Fantasy").unwrap();
        let mystery = store.add_category(None, "Mystery").unwrap();

        let root = store.category(store.root()).unwrap();
        assert_eq!(
            root.children(),
            &[NodeRef::Category(fiction), NodeRef::Category(mystery)]
        );
        assert_eq!(
            store.category(fiction).unwrap().children(),
            &[NodeRef::Category(fantasy)]
        );
    }

    #[test]
    fn add_category_unknown_parent() {
        let mut store = CatalogStore::new("root");
        let err = store
            .add_category(Some(CategoryId::new()), "Orphan")
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert_eq!(store.category_count(), 1);
    }

    #[test]
    fn add_book_validates_title() {
        let mut store = CatalogStore::new("root");
        let root = store.root();
        let err = store.add_book(root, "  ", author("Anon")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(store.book_count(), 0);
    }

    #[test]
    fn add_book_unknown_category() {
        let mut store = CatalogStore::new("root");
        let err = store
            .add_book(CategoryId::new(), "Dune", author("Frank Herbert"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert_eq!(store.book_count(), 0);
    }

    #[test]
    fn find_category_is_preorder_and_includes_root() {
        let mut store = CatalogStore::new("Library Catalog");
        let fiction = store.add_category(None, "Fiction").unwrap();
        let nested = store.add_category(Some(fiction), "Classics").unwrap();
        let _later = store.add_category(None, "Classics").unwrap();

        assert_eq!(
            store.find_category_by_name("library catalog", LookupMode::CaseInsensitive),
            Some(store.root())
        );
        assert_eq!(
            store.find_category_by_name("classics", LookupMode::CaseInsensitive),
            Some(nested)
        );
        assert_eq!(
            store.find_category_by_name("classics", LookupMode::CaseSensitive),
            None
        );
    }

    #[test]
    fn duplicate_titles_are_distinct_books() {
        let mut store = CatalogStore::new("root");
        let a = store.add_category(None, "A").unwrap();
        let b = store.add_category(None, "B").unwrap();
        let first = store.add_book(a, "Dune", author("Frank Herbert")).unwrap();
        let second = store.add_book(b, "Dune", author("Frank Herbert")).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.book_count(), 2);
        assert_eq!(
            store.find_book_by_title("dune", LookupMode::CaseInsensitive),
            Some(first)
        );
        assert_eq!(
            store.find_book_in(b, "Dune", LookupMode::CaseSensitive),
            Some(second)
        );
    }

    #[test]
    fn find_book_descends_before_later_siblings() {
        let mut store = CatalogStore::new("root");
        let outer = store.add_category(None, "Outer").unwrap();
        let inner = store.add_category(Some(outer), "Inner").unwrap();
        let deep = store.add_book(inner, "Emma", author("Jane Austen")).unwrap();
        let root = store.root();
        let _shallow = store.add_book(root, "Emma", author("Jane Austen")).unwrap();

        assert_eq!(
            store.find_book_by_title("Emma", LookupMode::CaseSensitive),
            Some(deep)
        );
    }

    #[test]
    fn link_book_shares_one_node() {
        let mut store = CatalogStore::new("root");
        let fantasy = store.add_category(None, "Fantasy").unwrap();
        let children = store.add_category(None, "Children's Books").unwrap();
        let hobbit = store
            .add_book(fantasy, "The Hobbit", author("J.R.R. Tolkien"))
            .unwrap();

        store.link_book(children, hobbit).unwrap();
        store.link_book(children, hobbit).unwrap();

        assert_eq!(store.book_count(), 1);
        assert_eq!(
            store.category(children).unwrap().children(),
            &[NodeRef::Book(hobbit)]
        );
        assert_eq!(
            store.find_book_in(children, "the hobbit", LookupMode::CaseInsensitive),
            Some(hobbit)
        );
    }

    #[test]
    fn link_unknown_book_fails() {
        let mut store = CatalogStore::new("root");
        let root = store.root();
        let err = store.link_book(root, BookId::new()).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn walk_reports_depths() {
        let mut store = CatalogStore::new("root");
        let fiction = store.add_category(None, "Fiction").unwrap();
        store.add_book(fiction, "Emma", author("Jane Austen")).unwrap();

        let depths: Vec<usize> = store.walk(store.root()).map(|(d, _)| d).collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }
}
