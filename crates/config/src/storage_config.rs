//! Storage configuration section

use crate::validation::{bare_file_name, ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which record store backs the bookshelf
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Two line-delimited text files
    FlatFile,
    /// A SQLite database file
    Sqlite,
    /// Process memory; everything is lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat_file" | "flatfile" | "file" => Ok(StorageBackend::FlatFile),
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// How unreadable lines in the book store are treated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRecords {
    /// Log and leave the line out
    Skip,
    /// Fail the whole listing
    Fail,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,

    /// Directory holding the store files
    pub data_dir: PathBuf,

    /// Category store file name (flat-file backend)
    pub categories_file: String,

    /// Book store file name (flat-file backend)
    pub books_file: String,

    /// Database file name (sqlite backend)
    pub database_file: String,

    /// Handling of malformed book lines (flat-file backend)
    pub malformed_records: MalformedRecords,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::FlatFile,
            data_dir: PathBuf::from("data"),
            categories_file: "categories.txt".to_string(),
            books_file: "books.txt".to_string(),
            database_file: "bookboard.db".to_string(),
            malformed_records: MalformedRecords::Skip,
        }
    }
}

impl StorageConfig {
    /// Full path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

impl ConfigSection for StorageConfig {
    const NAME: &'static str = "storage";

    fn check(&self, problems: &mut Vec<ValidationError>) {
        if self.data_dir.as_os_str().is_empty() {
            Self::problem(problems, "data_dir", "must not be empty");
        }

        for (key, value) in [
            ("categories_file", &self.categories_file),
            ("books_file", &self.books_file),
            ("database_file", &self.database_file),
        ] {
            if let Err(message) = bare_file_name(value) {
                Self::problem(problems, key, message);
            }
        }

        if self.categories_file == self.books_file {
            Self::problem(problems, "books_file", "must differ from storage.categories_file");
        }
    }
}
