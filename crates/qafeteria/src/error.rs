//! CLI error types with miette diagnostics.
//!
//! Maps config and core failures, plus rejected login runs, into
//! user-facing errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use qafeteria_config::ConfigError;
use qafeteria_core::CoreError;

/// Process exit codes. Scripts branch on these.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const REJECTED: i32 = 3;
    pub const LOCKED: i32 = 4;
    pub const CONFIG: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Login outcomes ───────────────────────────────────────────────
    #[error("Login rejected ({kind}): {message}")]
    #[diagnostic(
        code(qafeteria::login_rejected),
        help(
            "The configured pair is shown by: qafeteria config show\n\
             Attempts left before lockout: {remaining}"
        )
    )]
    LoginRejected {
        kind: String,
        message: String,
        remaining: u32,
    },

    #[error("Login locked after {attempts} failed attempts")]
    #[diagnostic(
        code(qafeteria::locked),
        help("Lockout lasts for the controller lifetime. Start a new run to reset it.")
    )]
    Locked { attempts: u32 },

    #[error("Login flow ended without a verdict: {outcome}")]
    #[diagnostic(code(qafeteria::no_verdict))]
    NoVerdict { outcome: String },

    // ── Session ──────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(qafeteria::session))]
    Session(#[from] CoreError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(qafeteria::validation))]
    Validation { field: String, reason: String },

    #[error("Missing {field}")]
    #[diagnostic(
        code(qafeteria::missing_input),
        help("Pass --{field} or run in an interactive terminal to be prompted.")
    )]
    MissingInput { field: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(qafeteria::config),
        help("Check the file at `qafeteria config path` and QAFETERIA_* variables.")
    )]
    Config(#[from] ConfigError),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(qafeteria::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(qafeteria::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LoginRejected { .. } => exit_code::REJECTED,
            Self::Locked { .. } => exit_code::LOCKED,
            Self::Validation { .. }
            | Self::MissingInput { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Config(_) | Self::ConfigExists { .. } => exit_code::CONFIG,
            Self::NoVerdict { .. } | Self::Session(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
