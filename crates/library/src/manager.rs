// FILE: crates/library/src/manager.rs

use crate::error::Result;
use crate::ingest::{Ingestor, Outcome, Submission};
use crate::listing::{GroupedListing, ListingBuilder};
use bookboard_config::{MalformedRecords, StorageBackend, StorageConfig};
use bookboard_core::StorageError;
use bookboard_database::{
    FlatFileStore, MalformedRecordPolicy, MemoryStore, RecordStore, SqliteStore,
};
use log::info;
use std::sync::Arc;

/// Opens the record store selected by `config`
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StorageBackend::FlatFile => {
            let policy = match config.malformed_records {
                MalformedRecords::Skip => MalformedRecordPolicy::Skip,
                MalformedRecords::Fail => MalformedRecordPolicy::Fail,
            };
            let store = FlatFileStore::open_with_names(
                &config.data_dir,
                &config.categories_file,
                &config.books_file,
            )?
            .with_policy(policy);
            Arc::new(store)
        }
        StorageBackend::Sqlite => {
            std::fs::create_dir_all(&config.data_dir)
                .map_err(|e| StorageError::io(&config.data_dir, e))?;
            Arc::new(SqliteStore::open(config.database_path()).await?)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    info!("Using {} record store", store.backend_name());
    Ok(store)
}

/// The bookshelf: submissions in, grouped listing out
#[derive(Clone)]
pub struct Bookshelf {
    store: Arc<dyn RecordStore>,
    ingestor: Ingestor,
    listing: ListingBuilder,
}

impl Bookshelf {
    /// Wraps an already opened store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            ingestor: Ingestor::new(store.clone()),
            listing: ListingBuilder::new(store.clone()),
            store,
        }
    }

    /// Opens the configured store and wraps it
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        Ok(Self::new(open_store(config).await?))
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Handles a posted form; see [`Ingestor::submit`]
    pub async fn submit(&self, submission: &Submission) -> Result<Outcome> {
        Ok(self.ingestor.submit(submission).await?)
    }

    pub async fn submit_category(&self, raw_name: &str) -> Result<Outcome> {
        Ok(self.ingestor.submit_category(raw_name).await?)
    }

    pub async fn submit_book(
        &self,
        raw_title: &str,
        raw_link: &str,
        raw_category: &str,
    ) -> Result<Outcome> {
        Ok(self
            .ingestor
            .submit_book(raw_title, raw_link, raw_category)
            .await?)
    }

    /// Re-reads storage and groups books by category
    pub async fn listing(&self) -> Result<GroupedListing> {
        Ok(self.listing.build().await?)
    }
}
