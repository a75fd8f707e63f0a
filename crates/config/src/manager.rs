//! Locating and loading the config file

use crate::persistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel, StorageBackend};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "BOOKBOARD_";

/// Owns the location of the config file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses `config.toml` in the platform config directory
    ///
    /// - Linux: `~/.config/bookboard/`
    /// - macOS: `~/Library/Application Support/bookboard/`
    /// - Windows: `%APPDATA%\bookboard\`
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "bookboard").ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_directory(dirs.config_dir()))
    }

    pub fn with_directory(config_dir: impl AsRef<Path>) -> Self {
        Self::with_file(config_dir.as_ref().join("config.toml"))
    }

    pub fn with_file(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the config file, or returns defaults when there is none
    ///
    /// Out-of-range values are logged but still returned; the caller decides
    /// whether to run with them.
    pub fn load(&self) -> ConfigResult<Config> {
        let config = match persistence::read(&self.config_path)? {
            Some(config) => config,
            None => {
                log::info!(
                    "No config file at {}, using defaults",
                    self.config_path.display()
                );
                return Ok(Config::default());
            }
        };

        if let Err(problems) = config.validate() {
            log::warn!("{}", ConfigError::Invalid(problems));
        }
        Ok(config)
    }

    /// [`load`](Self::load), then apply `BOOKBOARD_*` variables from the process environment
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Writes a default config file
    ///
    /// An existing file is left alone unless `force` is set, in which case it
    /// is kept as `config.toml.backup` before being replaced. Returns whether
    /// a file was written.
    pub fn initialize(&self, force: bool) -> ConfigResult<bool> {
        if !force && self.config_path.exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path.display()
            );
            return Ok(false);
        }

        persistence::write(&self.config_path, &Config::default())?;
        Ok(true)
    }

    /// Where [`initialize`](Self::initialize) keeps the replaced file
    pub fn backup_path(&self) -> PathBuf {
        persistence::backup_path(&self.config_path)
    }
}

/// Applies overrides looked up through `lookup` to `config`
///
/// Variables follow `BOOKBOARD_SECTION_FIELD`, e.g. `BOOKBOARD_SERVER_PORT`.
/// Unset variables leave the config untouched; unparseable values are errors.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| {
        let name = format!("{}{}", ENV_PREFIX, suffix);
        lookup(&name).map(|value| (name, value))
    };

    if let Some((_, value)) = var("SERVER_BIND_ADDRESS") {
        config.server.bind_address = value;
    }

    if let Some((name, value)) = var("SERVER_PORT") {
        config.server.port = value
            .trim()
            .parse::<u16>()
            .map_err(|_| invalid_override(name, value))?;
    }

    if let Some((_, value)) = var("STORAGE_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(value);
    }

    if let Some((name, value)) = var("STORAGE_BACKEND") {
        config.storage.backend = value
            .parse::<StorageBackend>()
            .map_err(|_| invalid_override(name, value))?;
    }

    if let Some((name, value)) = var("APP_LOG_LEVEL") {
        config.app.log_level = value
            .parse::<LogLevel>()
            .map_err(|_| invalid_override(name, value))?;
    }

    Ok(())
}

fn invalid_override(variable: String, value: String) -> ConfigError {
    ConfigError::InvalidOverride { variable, value }
}
