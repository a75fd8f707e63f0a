// FILE: crates/library/src/listing.rs

use bookboard_core::{Book, Category, Result};
use bookboard_database::RecordStore;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// A book as shown inside its category group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub title: String,
    pub link: String,
}

impl From<Book> for BookEntry {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            link: book.link,
        }
    }
}

/// One rendered category with the books filed under it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub books: &'a [BookEntry],
}

impl CategoryGroup<'_> {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Categories in storage order plus books keyed by category name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedListing {
    categories: Vec<Category>,
    books_by_category: HashMap<String, Vec<BookEntry>>,
}

impl GroupedListing {
    /// Groups `books` under their category names, keeping book-store order
    pub fn build(categories: Vec<Category>, books: Vec<Book>) -> Self {
        let mut books_by_category: HashMap<String, Vec<BookEntry>> = HashMap::new();

        for book in books {
            let key = book.category.clone();
            books_by_category
                .entry(key)
                .or_default()
                .push(BookEntry::from(book));
        }

        Self {
            categories,
            books_by_category,
        }
    }

    /// All categories, duplicates included
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Books filed under `name`; empty when there are none
    pub fn books_for(&self, name: &str) -> &[BookEntry] {
        self.books_by_category
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// One group per stored category, in storage order
    pub fn groups(&self) -> impl Iterator<Item = CategoryGroup<'_>> + '_ {
        self.categories.iter().map(move |category| CategoryGroup {
            category,
            books: self.books_for(&category.name),
        })
    }

    /// Books whose category matches no stored category
    pub fn orphaned_books(&self) -> Vec<(&str, &BookEntry)> {
        let mut orphans: Vec<(&str, &BookEntry)> = self
            .books_by_category
            .iter()
            .filter(|(name, _)| !self.categories.iter().any(|c| &c.name == *name))
            .flat_map(|(name, entries)| entries.iter().map(move |e| (name.as_str(), e)))
            .collect();
        orphans.sort_by(|a, b| a.0.cmp(b.0));
        orphans
    }

    /// True when there are no categories to show
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Reads both stores and assembles a [`GroupedListing`]
#[derive(Clone)]
pub struct ListingBuilder {
    store: Arc<dyn RecordStore>,
}

impl ListingBuilder {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn build(&self) -> Result<GroupedListing> {
        let categories = self.store.read_all_categories().await?;
        let books = self.store.read_all_books().await?;
        let listing = GroupedListing::build(categories, books);

        let orphaned = listing.orphaned_books().len();
        if orphaned > 0 {
            debug!("{} book(s) filed under unknown categories", orphaned);
        }

        Ok(listing)
    }
}
