//! Database query operations organized by entity

pub mod books;
pub mod categories;

pub use books::{insert_book, list_books};
pub use categories::{insert_category, list_categories};
