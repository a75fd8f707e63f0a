//! Integration tests for the configuration system

use bookboard_config::{
    apply_env_overrides, ConfigError, ConfigManager, LogLevel, MalformedRecords, StorageBackend,
    CONFIG_VERSION,
};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path());
    Ok((temp_dir, manager))
}

#[test]
fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    assert!(manager.initialize(false)?);
    let config = manager.load()?;
    assert_eq!(config.version, CONFIG_VERSION);

    fs::write(
        manager.config_path(),
        "[server]\nport = 8088\n\n[storage]\nbackend = \"sqlite\"\nmalformed_records = \"fail\"\n",
    )?;
    let edited = manager.load()?;
    assert_eq!(edited.server.port, 8088);
    assert_eq!(edited.storage.backend, StorageBackend::Sqlite);
    assert_eq!(edited.storage.malformed_records, MalformedRecords::Fail);

    assert!(!manager.initialize(false)?);
    assert_eq!(manager.load()?, edited);

    assert!(manager.initialize(true)?);
    assert_eq!(manager.load()?.server.port, 8080);
    assert!(fs::read_to_string(manager.backup_path())?.contains("port = 8088"));

    Ok(())
}

#[test]
fn test_out_of_range_values_still_load() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(
        manager.config_path(),
        "[server]\nport = 0\nbind_address = \"nowhere\"\n",
    )?;

    let config = manager.load()?;
    let problems = config.validate().unwrap_err();
    assert_eq!(problems.len(), 2);

    let message = ConfigError::Invalid(problems).to_string();
    assert!(message.contains("server.port"));
    assert!(message.contains("server.bind_address"));

    Ok(())
}

#[test]
fn test_hand_written_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(
        manager.config_path(),
        r#"
[app]
log_level = "warn"

[server]
bind_address = "0.0.0.0"
port = 80

[storage]
backend = "flat_file"
data_dir = "/var/lib/bookboard"
"#,
    )?;

    let config = manager.load()?;
    assert_eq!(config.app.log_level, LogLevel::Warn);
    assert_eq!(config.server.socket_address(), "0.0.0.0:80");
    assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/bookboard"));
    assert_eq!(config.storage.books_file, "books.txt");

    Ok(())
}

#[test]
fn test_env_beats_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[server]\nport = 3000\n")?;
    let vars: HashMap<&str, &str> = HashMap::from([("BOOKBOARD_SERVER_PORT", "4000")]);

    let mut config = manager.load()?;
    apply_env_overrides(&mut config, |name| vars.get(name).map(|v| v.to_string()))?;

    assert_eq!(config.server.port, 4000);
    Ok(())
}

#[test]
fn test_corrupted_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "this is not valid TOML {{{")?;

    assert!(matches!(manager.load(), Err(ConfigError::Parse { .. })));
    assert!(!manager.initialize(false)?);

    Ok(())
}

#[test]
fn test_unknown_backend_is_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[storage]\nbackend = \"postgres\"\n")?;

    assert!(matches!(manager.load(), Err(ConfigError::Parse { .. })));

    Ok(())
}

#[test]
fn test_initialize_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let nested_path = temp_dir.path().join("a").join("b").join("c");
    let manager = ConfigManager::with_directory(&nested_path);

    assert!(manager.initialize(false)?);
    assert!(manager.config_path().exists());

    Ok(())
}
