//! Core types for the catalog
//!
//! Defines identifiers, users and lookup options shared by every module:
//! - Node identifiers and the category child reference
//! - Users and their roles
//! - Title/name lookup mode

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Unique category identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Ulid);

impl CategoryId {
    /// Generate new category ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique book identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(pub Ulid);

impl BookId {
    /// Generate new book ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Child entry of a category
///
/// Categories hold references, never owned nodes, so one book can be listed
/// under several categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    /// Nested category
    Category(CategoryId),
    /// Book leaf
    Book(BookId),
}

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Manages the catalog
    Admin,
    /// Borrows books
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("Admin"),
            Self::User => f.write_str("User"),
        }
    }
}

impl FromStr for Role {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("admin") {
            Ok(Self::Admin)
        } else if trimmed.eq_ignore_ascii_case("user") {
            Ok(Self::User)
        } else {
            Err(CatalogError::validation(format!("unknown role: '{trimmed}'")))
        }
    }
}

/// Library user, supplied per call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UserRepr")]
pub struct User {
    name: String,
    role: Role,
}

/// Unvalidated wire form of [`User`]
#[derive(Deserialize)]
struct UserRepr {
    name: String,
    role: Role,
}

impl TryFrom<UserRepr> for User {
    type Error = CatalogError;

    fn try_from(repr: UserRepr) -> Result<Self> {
        Self::new(repr.name, repr.role)
    }
}

impl User {
    /// Create user
    ///
    /// # Errors
    /// Returns `Validation` if the name is blank
    pub fn new(name: impl Into<String>, role: Role) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::validation("user name cannot be empty"));
        }
        Ok(Self { name, role })
    }

    /// Create admin user
    ///
    /// # Errors
    /// Returns `Validation` if the name is blank
    #[inline]
    pub fn admin(name: impl Into<String>) -> Result<Self> {
        Self::new(name, Role::Admin)
    }

    /// Create regular user
    ///
    /// # Errors
    /// Returns `Validation` if the name is blank
    #[inline]
    pub fn member(name: impl Into<String>) -> Result<Self> {
        Self::new(name, Role::User)
    }

    /// User name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// User role
    #[inline]
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Check if user is an admin
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

/// How names and titles are compared during lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Exact match
    CaseSensitive,
    /// Match ignoring case
    #[default]
    CaseInsensitive,
}

impl LookupMode {
    /// Compare candidate against needle
    #[inline]
    #[must_use]
    pub fn matches(self, candidate: &str, needle: &str) -> bool {
        match self {
            Self::CaseSensitive => candidate == needle,
            Self::CaseInsensitive => candidate.to_lowercase() == needle.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" user ".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn deserialized_user_name_is_validated() {
        let blank = serde_json::from_str::<User>(r#"{"name":"  ","role":"Admin"}"#);
        assert!(blank.is_err());

        let user: User = serde_json::from_str(r#"{"name":"Bob","role":"User"}"#).unwrap();
        assert_eq!(user, User::member("Bob").unwrap());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "Librarian".parse::<Role>().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn blank_user_name_is_rejected() {
        assert!(User::member("   ").is_err());
        assert!(User::admin("").is_err());
    }

    #[test]
    fn user_accessors() {
        let admin = User::admin("root").unwrap();
        assert!(admin.is_admin());
        assert_eq!(admin.name(), "root");
        assert_eq!(admin.to_string(), "root (Admin)");

        let bob = User::member("Bob").unwrap();
        assert!(!bob.is_admin());
        assert_eq!(bob.role(), Role::User);
    }

    #[test]
    fn lookup_mode_matching() {
        assert!(LookupMode::CaseInsensitive.matches("Science Fiction", "science fiction"));
        assert!(!LookupMode::CaseSensitive.matches("Science Fiction", "science fiction"));
        assert!(LookupMode::CaseSensitive.matches("Dune", "Dune"));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(BookId::new(), BookId::new());
        assert_ne!(CategoryId::new(), CategoryId::new());
    }
}
