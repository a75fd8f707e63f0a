//! Domain types for Bookboard
//!
//! - `category`: named buckets
//! - `book`: book links filed under a category
//! - `text`: trimming and HTML escaping of submitted text

mod book;
mod category;
mod text;

pub use book::Book;
pub use category::Category;
pub use text::{escape_html, sanitize_field};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_book_fields() {
        let book = Book::new(
            sanitize_field(" <Dune> "),
            sanitize_field("http://x?a=1&b=2"),
            sanitize_field("Sci|Fi"),
        );
        assert_eq!(book.title, "&lt;Dune&gt;");
        assert_eq!(book.link, "http://x?a=1&amp;b=2");
        assert_eq!(book.category, "Sci&#124;Fi");
    }
}
