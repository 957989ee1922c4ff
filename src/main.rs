//! Agentdeck CLI
//!
//! Opens a session snapshot, follows its event feed and hands both to the TUI.

use agentdeck::config::{data_dir, default_config_path, FileConfig};
use agentdeck::session::load_snapshot;
use agentdeck::tui::{App, AppState, Theme};
use agentdeck::{DeckConfig, EventFeed, Outbox, SessionStore, ThemeName};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Agentdeck - watch and steer an autonomous agent session
#[derive(Parser, Debug)]
#[command(name = "agentdeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session file, session id, or `latest`
    #[arg(short, long, default_value = "latest")]
    session: String,

    /// JSON-lines event source (file or FIFO) for live updates
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// File that emitted actions are appended to
    #[arg(short, long)]
    outbox: Option<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeName>,

    /// Where diagnostics are written while the TUI owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let data_dir = data_dir();

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir.join("agentdeck.log"));
    init_logging(&log_file, cli.verbose)?;
    info!("Starting agentdeck {}", env!("CARGO_PKG_VERSION"));

    let file_config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => FileConfig::load(&path)?,
        None => FileConfig::default(),
    };

    let store = SessionStore::new(data_dir.join("sessions"));
    let session_file = resolve_session(&store, &cli.session)?;
    info!("Session file: {:?}", session_file);

    let mut config = file_config.apply(DeckConfig::new(session_file));
    if let Some(events) = cli.events {
        config = config.with_events_file(events);
    }
    if let Some(outbox) = cli.outbox {
        config = config.with_outbox_file(outbox);
    }
    if let Some(theme) = cli.theme {
        config = config.with_theme(theme);
    }

    run(config).await
}

async fn run(config: DeckConfig) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&config.session_file).await?;
    let outbox = Outbox::new(config.outbox_file.clone()).await?;
    info!("Emitting actions to {:?}", outbox.path());

    let cancel = CancellationToken::new();
    let feed = match &config.events_file {
        Some(path) => {
            Some(EventFeed::open(path, config.event_queue_capacity, cancel.child_token()).await?)
        }
        None => {
            warn!("No event source configured; showing a static snapshot");
            None
        }
    };

    let state = AppState::new(snapshot, config.limits, config.toast_duration);
    let mut app = App::new(state, Theme::from_name(config.theme), outbox, feed)?;
    let result = app.run().await;
    drop(app);
    cancel.cancel();

    if let Err(e) = &result {
        error!("TUI error: {}", e);
    }
    result.context("terminal I/O failed")
}

/// Map `--session` to a file: an existing path, `latest`, or a session id.
fn resolve_session(store: &SessionStore, arg: &str) -> anyhow::Result<PathBuf> {
    let path = Path::new(arg);
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    if arg == "latest" {
        return store
            .latest()?
            .context("no sessions found; pass --session <file or id>");
    }
    Ok(store.path_for(arg))
}

fn init_logging(log_file: &Path, verbose: bool) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("cannot open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}
