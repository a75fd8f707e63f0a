// FILE: crates/library/src/error.rs

use bookboard_core::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LibraryError {
    /// True when the failure needs an operator, not a retry
    pub fn is_critical(&self) -> bool {
        match self {
            Self::Storage(err) => err.is_critical(),
        }
    }

    /// Message safe to show on a web page
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(err) => err.user_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
