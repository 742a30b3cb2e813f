//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast;

use qafeteria_config::Config;
use qafeteria_core::NavigationRequest;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::{CliError, prompt_err};
use crate::output;

/// Config file selected by `--config` / `QAFETERIA_CONFIG`, else the
/// platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(qafeteria_config::config_path)
}

/// `--output` wins; otherwise the config's `defaults.output`.
pub fn resolve_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

/// An explicit `--color always|never` wins over the config.
pub fn resolve_color(global: &GlobalOpts, cfg: &Config) -> bool {
    let mode = match global.color {
        ColorMode::Auto => ColorMode::from_str(&cfg.defaults.color, true).unwrap_or(ColorMode::Auto),
        explicit => explicit,
    };
    output::should_color(mode)
}

pub fn stdin_is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !stdin_is_interactive() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Spinner on stderr while a simulated latency runs.
///
/// Only shown for interactive table output.
pub fn spinner(message: &str, format: OutputFormat, quiet: bool) -> Option<ProgressBar> {
    if quiet || format != OutputFormat::Table || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

/// Everything published on a navigation receiver so far.
pub fn drain_navigation(rx: &mut broadcast::Receiver<NavigationRequest>) -> Vec<NavigationRequest> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

/// "replace -> Home, replace -> Login", or "none".
pub fn describe_navigation(requests: &[NavigationRequest]) -> String {
    if requests.is_empty() {
        return "none".into();
    }
    requests
        .iter()
        .map(|r| match r {
            NavigationRequest::Replace(route) => format!("replace -> {route}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
