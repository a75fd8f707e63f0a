// FILE: crates/server/src/main.rs

use anyhow::{Context, Result};
use bookboard_config::{Config, ConfigError, ConfigManager};
use bookboard_library::Bookshelf;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("bookboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Share book links filed under categories")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the config file")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDR")
                .help("Address to listen on")
                .global(true),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to listen on")
                .value_parser(value_parser!(u16))
                .global(true),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the record store")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("serve").about("Start the web server (default)"))
        .subcommand(
            Command::new("init-config")
                .about("Write a default config file")
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Replace an existing file, keeping it as config.toml.backup")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Starts logging before the config is read
///
/// `RUST_LOG` wins when set. Otherwise the level starts at `info` and is
/// moved to `app.log_level` once the config is loaded. Returns whether the
/// config may set the level.
fn init_logging() -> bool {
    let level_from_config = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_none();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if level_from_config {
        log::set_max_level(log::LevelFilter::Info);
    }
    level_from_config
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(ConfigManager::with_file(path)),
        None => ConfigManager::new().context("Failed to locate the config directory"),
    }
}

/// Flags win over the config file and the environment
fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.server.bind_address = bind.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config.storage.data_dir = dir.clone();
    }
}

fn init_config(manager: &ConfigManager, matches: &ArgMatches) -> Result<()> {
    let force = matches.get_flag("force");
    let wrote = manager.initialize(force).context("Cannot write config")?;
    if wrote {
        println!("Wrote default config to {}", manager.config_path().display());
        if force && manager.backup_path().exists() {
            println!("Previous config kept at {}", manager.backup_path().display());
        }
    } else {
        println!(
            "Config already exists at {} (use --force to replace it)",
            manager.config_path().display()
        );
    }
    Ok(())
}

async fn serve(
    manager: &ConfigManager,
    matches: &ArgMatches,
    level_from_config: bool,
) -> Result<()> {
    let mut config = manager
        .load_with_env_overrides()
        .with_context(|| format!("Failed to load {}", manager.config_path().display()))?;
    apply_cli_overrides(&mut config, matches);

    if level_from_config {
        log::set_max_level(config.app.log_level.into());
    }

    config
        .validate()
        .map_err(ConfigError::Invalid)
        .context("Refusing to start")?;

    let shelf = Bookshelf::open(&config.storage)
        .await
        .context("Failed to open the record store")?;

    let addr = config.server.socket_address();
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    bookboard_server::serve(listener, shelf)
        .await
        .context("Server error")
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let level_from_config = init_logging();
    let manager = config_manager(&matches)?;

    match matches.subcommand() {
        Some(("init-config", sub_matches)) => init_config(&manager, sub_matches),
        Some(("serve", sub_matches)) => serve(&manager, sub_matches, level_from_config).await,
        _ => serve(&manager, &matches, level_from_config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let matches = build_cli()
            .try_get_matches_from([
                "bookboard",
                "serve",
                "--port",
                "9000",
                "--data-dir",
                "/tmp/shelf",
            ])
            .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();

        let mut config = Config::default();
        apply_cli_overrides(&mut config, sub_matches);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/shelf"));
        assert_eq!(config.server.bind_address, "127.0.0.1");
    }

    #[test]
    fn test_serve_is_default() {
        let matches = build_cli()
            .try_get_matches_from(["bookboard", "--bind", "0.0.0.0"])
            .unwrap();
        assert!(matches.subcommand().is_none());

        let mut config = Config::default();
        apply_cli_overrides(&mut config, &matches);
        assert_eq!(config.server.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_init_config_force_flag() {
        let matches = build_cli()
            .try_get_matches_from(["bookboard", "init-config", "--force"])
            .unwrap();
        let (name, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "init-config");
        assert!(sub_matches.get_flag("force"));

        let matches = build_cli()
            .try_get_matches_from(["bookboard", "init-config"])
            .unwrap();
        assert!(!matches.subcommand().unwrap().1.get_flag("force"));
    }

    #[test]
    fn test_init_config_writes_once() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(temp_dir.path());
        let plain = build_cli()
            .try_get_matches_from(["bookboard", "init-config"])
            .unwrap();
        let (_, plain) = plain.subcommand().unwrap();

        init_config(&manager, plain).unwrap();
        std::fs::write(manager.config_path(), "[server]\nport = 3000\n").unwrap();
        init_config(&manager, plain).unwrap();
        assert_eq!(manager.load().unwrap().server.port, 3000);

        let forced = build_cli()
            .try_get_matches_from(["bookboard", "init-config", "--force"])
            .unwrap();
        init_config(&manager, forced.subcommand().unwrap().1).unwrap();
        assert_eq!(manager.load().unwrap().server.port, 8080);
        assert!(manager.backup_path().exists());
    }

    #[test]
    fn test_bad_port_rejected() {
        assert!(build_cli()
            .try_get_matches_from(["bookboard", "--port", "http"])
            .is_err());
    }
}
