//! `qafeteria-tui`: interactive terminal front end for the QAfeteria login
//! flow.
//!
//! Built on [ratatui](https://ratatui.rs). The login screen hands off to
//! the home screen on success and the home screen logs out back to login;
//! both render their own toast. `F2` toggles the element inspector, which
//! tags every element with the identifier UI automation matches on.
//!
//! Logs go to a file (default `/tmp/qafeteria-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Terminal front end for the QAfeteria login fixture.
#[derive(Parser, Debug)]
#[command(name = "qafeteria-tui", version, about)]
struct Cli {
    /// Config file path (defaults to the platform config location)
    #[arg(short, long, env = "QAFETERIA_CONFIG")]
    config: Option<PathBuf>,

    /// Skip the simulated latencies
    #[arg(long)]
    instant: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/qafeteria-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Returns the guard that flushes the writer on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("qafeteria_tui={level},qafeteria_core={level}"))
    });

    let dir = cli.log_file.parent().unwrap_or(Path::new("/tmp"));
    let file = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("qafeteria-tui.log"));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let path = cli.config.clone().unwrap_or_else(qafeteria_config::config_path);
    let mut settings = qafeteria_config::load_config_from(&path)?.to_session_config()?;
    if cli.instant {
        settings.timing = settings.timing.instant();
    }

    info!(config = %path.display(), instant = cli.instant, "starting qafeteria-tui");

    let mut app = App::new(settings);
    app.run().await?;

    Ok(())
}
