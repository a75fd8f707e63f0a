// FILE: crates/library/src/ingest.rs

use bookboard_core::{sanitize_field, Book, Result, ValidationError};
use bookboard_database::RecordStore;
use log::{debug, info};
use serde::Deserialize;
use std::sync::Arc;

/// Form field carrying a new category name
pub const CATEGORY_NAME_FIELD: &str = "categoryName";
/// Form field carrying a new book's title
pub const BOOK_TITLE_FIELD: &str = "bookTitle";
/// Form field carrying a new book's link
pub const BOOK_LINK_FIELD: &str = "bookLink";
/// Form field carrying a new book's category
pub const BOOK_CATEGORY_FIELD: &str = "bookCategory";

/// Raw form data as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub category_name: Option<String>,
    pub book_title: Option<String>,
    pub book_link: Option<String>,
    pub book_category: Option<String>,
}

impl Submission {
    /// A submission adding one category
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// A submission adding one book
    pub fn book(
        title: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            book_title: Some(title.into()),
            book_link: Some(link.into()),
            book_category: Some(category.into()),
            ..Default::default()
        }
    }

    fn has_book_fields(&self) -> bool {
        self.book_title.is_some() || self.book_link.is_some() || self.book_category.is_some()
    }
}

/// What the caller should do after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A record was written; redirect to the listing and stop
    Committed,
    /// Nothing was written; render the page as for a plain view
    Rejected(ValidationError),
}

impl Outcome {
    /// True when the client should be redirected
    pub fn should_redirect(&self) -> bool {
        matches!(self, Outcome::Committed)
    }
}

/// Validates submitted form data and appends it to the store
#[derive(Clone)]
pub struct Ingestor {
    store: Arc<dyn RecordStore>,
}

impl Ingestor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Adds a category if the name is non-empty after trimming and escaping
    pub async fn submit_category(&self, raw_name: &str) -> Result<Outcome> {
        let name = match required(CATEGORY_NAME_FIELD, raw_name) {
            Ok(name) => name,
            Err(rejection) => return Ok(reject(rejection)),
        };

        self.store.append_category(&name).await?;
        info!("Added category '{}'", name);
        Ok(Outcome::Committed)
    }

    /// Adds a book if title, link and category are all non-empty
    pub async fn submit_book(
        &self,
        raw_title: &str,
        raw_link: &str,
        raw_category: &str,
    ) -> Result<Outcome> {
        let fields = required(BOOK_TITLE_FIELD, raw_title).and_then(|title| {
            let link = required(BOOK_LINK_FIELD, raw_link)?;
            let category = required(BOOK_CATEGORY_FIELD, raw_category)?;
            Ok(Book::new(title, link, category))
        });

        let book = match fields {
            Ok(book) => book,
            Err(rejection) => return Ok(reject(rejection)),
        };

        self.store.append_book(&book).await?;
        info!("Added book '{}' to category '{}'", book.title, book.category);
        Ok(Outcome::Committed)
    }

    /// Handles a posted form
    ///
    /// A category is tried first. Only if that does not commit are the book
    /// fields looked at, so at most one record is written per request.
    pub async fn submit(&self, submission: &Submission) -> Result<Outcome> {
        let mut rejection = None;

        if let Some(name) = submission.category_name.as_deref() {
            match self.submit_category(name).await? {
                Outcome::Committed => return Ok(Outcome::Committed),
                Outcome::Rejected(err) => rejection = Some(err),
            }
        }

        if submission.has_book_fields() {
            return self
                .submit_book(
                    submission.book_title.as_deref().unwrap_or_default(),
                    submission.book_link.as_deref().unwrap_or_default(),
                    submission.book_category.as_deref().unwrap_or_default(),
                )
                .await;
        }

        Ok(Outcome::Rejected(rejection.unwrap_or(
            ValidationError::MissingField(CATEGORY_NAME_FIELD),
        )))
    }
}

/// Checks the raw value, then the sanitized one
fn required(field: &'static str, raw: &str) -> std::result::Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    let sanitized = sanitize_field(raw);
    if sanitized.is_empty() {
        return Err(ValidationError::EmptyAfterEscape(field));
    }

    Ok(sanitized)
}

fn reject(rejection: ValidationError) -> Outcome {
    debug!("Ignoring submission: {}", rejection);
    Outcome::Rejected(rejection)
}
