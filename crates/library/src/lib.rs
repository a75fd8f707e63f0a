//! Bookboard Library
//!
//! Business rules on top of the record store: form submissions are
//! trimmed, escaped and appended, and the stored records are grouped into
//! the per-category listing the page shows.

pub mod error;
pub mod ingest;
pub mod listing;
pub mod manager;

pub use error::LibraryError;
pub use ingest::{Ingestor, Outcome, Submission};
pub use listing::{BookEntry, CategoryGroup, GroupedListing, ListingBuilder};
pub use manager::{open_store, Bookshelf};
