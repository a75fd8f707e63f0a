//! Config errors

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A filesystem step on the config file failed
    #[error("Could not {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but holds nothing
    #[error("Config file {path} is empty")]
    Empty { path: PathBuf },

    #[error("Config file {path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Refused to write a config that fails validation
    #[error("Config has {} invalid value(s): {}", .0.len(), join(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Invalid value '{value}' for environment variable {variable}")]
    InvalidOverride { variable: String, value: String },

    /// No home directory to put the config in
    #[error("Could not determine the user config directory")]
    NoConfigDir,
}

impl ConfigError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// One bad value, named by its `section.key` path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(section: &str, key: &str, message: impl Into<String>) -> Self {
        Self {
            field: format!("{}.{}", section, key),
            message: message.into(),
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
