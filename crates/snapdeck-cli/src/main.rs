use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snapdeck_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "snapdeck")]
#[command(author, version, about = "Scroll-snap paging carousel and segmented stepper for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this configuration file instead of ~/.config/snapdeck/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive carousel (default)
    Run,
    /// List the easing curves
    Easings {
        /// Only show this curve
        name: Option<String>,
        /// Print this many evenly spaced samples per curve
        #[arg(short = 's', long, default_value_t = 0)]
        samples: usize,
    },
    /// Replay a scripted gesture without a terminal and print what happens
    Simulate {
        /// Script file, one step per line; a built-in swipe demo when omitted
        script: Option<PathBuf>,
        /// Number of pages
        #[arg(short = 'p', long, default_value_t = 4)]
        pages: usize,
        /// Page size in host units
        #[arg(long, default_value_t = 200.0)]
        page_size: f32,
        /// Frame length in milliseconds used while waiting
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
    },
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration if no file exists yet
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    // The TUI owns the terminal, so its logs go to a file
    let interactive = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, cli.config.clone()).await,
        Some(Commands::Easings { name, samples }) => commands::easings::run(name.as_deref(), samples),
        Some(Commands::Simulate {
            script,
            pages,
            page_size,
            frame_ms,
        }) => commands::simulate::run(&config, script.as_deref(), pages, page_size, frame_ms),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(cli.config.as_deref()),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(),
        },
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
