//! Reading and writing the config file
//!
//! Writes go to a temp file in the target directory which is then renamed
//! over the config, so a crash never leaves half a file behind.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads and parses `path`; `None` when there is no such file
pub(crate) fn read(path: &Path) -> ConfigResult<Option<Config>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::io("read", path, e)),
    };

    if text.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.version > CONFIG_VERSION {
        log::warn!(
            "{} has format version {}, this build understands {}",
            path.display(),
            config.version,
            CONFIG_VERSION
        );
    }

    Ok(Some(config))
}

/// Writes `config` to `path`, copying any existing file to `<path>.backup`
pub(crate) fn write(path: &Path, config: &Config) -> ConfigResult<()> {
    config.validate().map_err(ConfigError::Invalid)?;
    let text = toml::to_string_pretty(config)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ConfigError::io("create", dir, e))?;

    if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup).map_err(|e| ConfigError::io("back up", path, e))?;
        log::debug!("Kept previous config as {}", backup.display());
    }

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| ConfigError::io("stage", dir, e))?;
    staged
        .write_all(text.as_bytes())
        .and_then(|()| staged.flush())
        .map_err(|e| ConfigError::io("write", path, e))?;
    staged
        .persist(path)
        .map_err(|e| ConfigError::io("replace", path, e.error))?;

    log::info!("Wrote config to {}", path.display());
    Ok(())
}

/// `config.toml` -> `config.toml.backup`
pub(crate) fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}
