//! Bookboard Configuration System
//!
//! Configuration is read from a TOML file, falls back to defaults when the
//! file is missing, and can be overridden from the environment.
//!
//! Precedence, lowest first: defaults, `config.toml`, `BOOKBOARD_*`
//! variables. Each `[section]` checks its own values; problems found on load
//! are logged, while writing a config with problems is refused.
//!
//! ```rust,no_run
//! use bookboard_config::ConfigManager;
//!
//! # fn main() -> Result<(), bookboard_config::ConfigError> {
//! let config = ConfigManager::new()?.load_with_env_overrides()?;
//! println!("Listening on {}", config.server.socket_address());
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
pub mod server_config;
pub mod storage_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{apply_env_overrides, ConfigManager, ENV_PREFIX};
pub use validation::ConfigSection;

pub use app_config::{AppConfig, LogLevel};
pub use server_config::ServerConfig;
pub use storage_config::{MalformedRecords, StorageBackend, StorageConfig};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// HTTP listener
    pub server: ServerConfig,

    /// Record store selection and layout
    pub storage: StorageConfig,
}

impl Config {
    /// Checks every section, returning all problems found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut problems = Vec::new();
        self.app.check(&mut problems);
        self.server.check(&mut problems);
        self.storage.check(&mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}
