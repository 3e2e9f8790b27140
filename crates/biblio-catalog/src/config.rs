//! Catalog configuration
//!
//! [`CatalogConfig`] is plain serde data, built with `with_*` methods or
//! loaded from TOML:
//!
//! ```toml
//! root_name = "City Library"
//! lookup = "case_insensitive"
//! default_category = "Unsorted"
//! ```

use crate::error::{CatalogError, Result};
use crate::types::LookupMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root category name used by the process-wide catalog
pub const DEFAULT_ROOT_NAME: &str = "Library Catalog";

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Name of the root category
    pub root_name: String,
    /// How category names and book titles are matched by the facade
    pub lookup: LookupMode,
    /// Category used when `add_book` is called with a blank category.
    /// Empty means the root.
    pub default_category: String,
}

impl CatalogConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With root category name
    #[inline]
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// With lookup mode
    #[inline]
    #[must_use]
    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    /// With default category
    #[inline]
    #[must_use]
    pub fn with_default_category(mut self, name: impl Into<String>) -> Self {
        self.default_category = name.into();
        self
    }

    /// Parse and validate TOML configuration
    ///
    /// # Errors
    /// Returns `Config` on malformed TOML or invalid values
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| CatalogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&input)
    }

    /// Check configuration values
    ///
    /// # Errors
    /// Returns `Config` if the root name is blank
    pub fn validate(&self) -> Result<()> {
        if self.root_name.trim().is_empty() {
            return Err(CatalogError::Config("root_name cannot be empty".into()));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            lookup: LookupMode::CaseInsensitive,
            default_category: String::new(),
        }
    }
}
