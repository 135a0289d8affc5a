//! Category service
//!
//! Manages the category vocabulary. New installations start with the default
//! set; users may add their own names but never remove them.

use tracing::info;

use crate::error::{SpendlogError, SpendlogResult};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The vocabulary in insertion order
    pub fn list(&self) -> SpendlogResult<Vec<String>> {
        self.storage.categories()
    }

    /// Add a category name
    pub fn add(&self, name: &str) -> SpendlogResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SpendlogError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        let mut categories = self.storage.categories()?;
        if categories.iter().any(|c| c.eq_ignore_ascii_case(name)) {
            return Err(SpendlogError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        categories.push(name.to_string());
        self.storage.save_categories(&categories)?;

        info!(category = name, "Added category");
        Ok(name.to_string())
    }

    /// Check whether a name is in the vocabulary
    pub fn is_known(&self, name: &str) -> SpendlogResult<bool> {
        Ok(self.storage.categories()?.iter().any(|c| c == name))
    }

    /// Fail with a validation error unless the name is in the vocabulary
    pub fn ensure_known(&self, name: &str) -> SpendlogResult<()> {
        if self.is_known(name)? {
            Ok(())
        } else {
            Err(SpendlogError::Validation(format!(
                "Unknown category '{}'. Add it first with `spendlog category add`",
                name
            )))
        }
    }
}
