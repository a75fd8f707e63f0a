//! Book domain model

use serde::{Deserialize, Serialize};

/// A shared book link filed under a category
///
/// `category` refers to a [`crate::Category`] by name only. A book may name a
/// category that was never created; such a book is stored but never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub link: String,
    pub category: String,
}

impl Book {
    /// Creates a book from already sanitized fields
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            category: category.into(),
        }
    }
}
