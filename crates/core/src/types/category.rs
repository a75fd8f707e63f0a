//! Category domain model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named bucket that books are filed under
///
/// The name is the only identity a category has. Nothing prevents two
/// categories with the same name from being stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    /// Creates a category from an already sanitized name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the category name
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        let category = Category::new("Fiction");
        assert_eq!(category.to_string(), "Fiction");
        assert_eq!(category.as_str(), "Fiction");
    }

    #[test]
    fn test_duplicates_compare_equal() {
        assert_eq!(Category::from("History"), Category::new("History".to_string()));
    }
}
