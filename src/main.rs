//! tile-dashboard - CLI entry point
//!
//! Runs the dashboard and manages its settings file and stored layout.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tile_dashboard::config::error::ConfigError;
use tile_dashboard::config::schema::{Config, LoggingConfig, StorageBackend, StorageConfig};
use tile_dashboard::config::{default, loader::ConfigLoader, xdg};
use tile_dashboard::layout::{
    build_default, ConfigController, ConfigStore, FileStore, MemoryStore, CONFIG_SLOT,
};
use tile_dashboard::logging;
use tile_dashboard::tui::app::App;
use tile_dashboard::widgets::WidgetRegistry;

/// Personal dashboard of draggable widget tiles
#[derive(Parser)]
#[command(name = "tdash")]
#[command(version, about = "Personal dashboard of draggable widget tiles")]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the tdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the dashboard
    Tui {
        /// Keep the layout in memory only, ignoring the storage settings
        #[arg(long)]
        ephemeral: bool,
    },

    /// Manage settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Inspect or clear the stored widget layout
    Layout {
        #[command(subcommand)]
        action: LayoutCommand,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default settings file
    Init {
        /// Overwrite existing settings (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show settings file path
    Path,
    /// Validate settings file
    Validate,
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutCommand {
    /// Print the stored layout as JSON (defaults if nothing is stored)
    Show,
    /// Print the path of the layout file
    Path,
    /// Remove the stored layout
    Reset,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => run_config_command(action, cli.config.as_deref()),
        Commands::Layout { action } => {
            let settings = match load_settings(cli.config.as_deref()) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Config error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = init_cli_logging(&settings.logging) {
                eprintln!("Failed to open log file: {e}");
                return ExitCode::FAILURE;
            }
            run_layout_command(action, &settings.storage)
        }
        Commands::Tui { ephemeral } => {
            let settings = match load_settings(cli.config.as_deref()) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Config error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            run_tui(&settings, ephemeral)
        }
    }
}

/// Loads settings from `path`, or from the default location.
fn load_settings(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => ConfigLoader::load_from_path(path),
        None => ConfigLoader::load_default(),
    }
}

/// Logs to the configured file if there is one, otherwise stderr.
fn init_cli_logging(settings: &LoggingConfig) -> std::io::Result<()> {
    match settings.file_path() {
        Some(path) => logging::init_file(settings.level, &path),
        None => {
            logging::init_stderr(settings.level);
            Ok(())
        }
    }
}

/// Builds the layout store selected by the storage settings.
fn open_store(storage: &StorageConfig, ephemeral: bool) -> ConfigStore {
    if ephemeral {
        return ConfigStore::new(MemoryStore::new());
    }
    match storage.backend {
        StorageBackend::File => ConfigStore::new(FileStore::new(storage.dir_path())),
        StorageBackend::Memory => ConfigStore::new(MemoryStore::new()),
        StorageBackend::None => ConfigStore::unavailable(),
    }
}

fn run_config_command(action: ConfigAction, path: Option<&Path>) -> ExitCode {
    logging::init_stderr(Default::default());
    let result = match action {
        ConfigAction::Init { force } => {
            let created = match path {
                Some(path) => {
                    default::create_default_config_at(path, force).map(|()| path.to_path_buf())
                }
                None => default::create_default_config(force),
            };
            created.map(|path| println!("Created configuration at {}", path.display()))
        }
        ConfigAction::Path => {
            let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => load_settings(path).and_then(|config| {
            // Durations are strings until used; check them here too.
            config.tui.tick_rate()?;
            config.tui.save_confirmation()?;
            println!("Configuration is valid");
            println!("{config:#?}");
            Ok(())
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_layout_command(action: LayoutCommand, storage: &StorageConfig) -> ExitCode {
    let store = open_store(storage, false);
    match action {
        LayoutCommand::Show => {
            let config = match store.load() {
                Ok(Some(config)) => config,
                Ok(None) => {
                    eprintln!("No stored layout, showing defaults");
                    build_default()
                }
                Err(e) => {
                    eprintln!("Layout error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match serde_json::to_string_pretty(&config) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Layout error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        LayoutCommand::Path => {
            if storage.backend != StorageBackend::File {
                eprintln!("Storage backend {:?} keeps no layout file", storage.backend);
                return ExitCode::FAILURE;
            }
            println!(
                "{}",
                FileStore::new(storage.dir_path()).path_for(CONFIG_SLOT).display()
            );
        }
        LayoutCommand::Reset => match store.clear() {
            Ok(true) => println!("Removed stored layout"),
            Ok(false) => println!("No stored layout"),
            Err(e) => {
                eprintln!("Layout error: {e}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

fn run_tui(settings: &Config, ephemeral: bool) -> ExitCode {
    let log_path = settings
        .logging
        .file_path()
        .unwrap_or_else(|| xdg::data_dir().join(logging::LOG_FILE_NAME));
    if let Err(e) = logging::init_file(settings.logging.level, &log_path) {
        eprintln!("Failed to open log file {}: {e}", log_path.display());
        return ExitCode::FAILURE;
    }

    let durations = settings
        .tui
        .tick_rate()
        .and_then(|tick| Ok((tick, settings.tui.save_confirmation()?)));
    let (tick_rate, confirmation_delay) = match durations {
        Ok(durations) => durations,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = open_store(&settings.storage, ephemeral);
    let controller = match ConfigController::new(store, confirmation_delay) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("failed to load widget layout: {}", e);
            eprintln!("Failed to load widget layout: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = rt.block_on(async {
        let mut app = App::new(controller, WidgetRegistry::new(), tick_rate);
        app.run().await
    }) {
        tracing::error!("dashboard exited with error: {}", e);
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
