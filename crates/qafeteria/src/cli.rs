//! Clap derive structures for the `qafeteria` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This
//! file is also compiled by `build.rs` for man page generation, so it may
//! only depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// qafeteria -- headless driver for the QAfeteria login fixture
#[derive(Debug, Parser)]
#[command(
    name = "qafeteria",
    version,
    about = "Drive the QAfeteria login flow from the command line",
    long_about = "Runs the QAfeteria login and logout flows without a screen.\n\n\
        Every notification, phase change and navigation request is reported,\n\
        so scripted QA runs can assert on the same behavior the UI shows.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "QAFETERIA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "QAFETERIA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit credentials to a fresh login controller
    #[command(alias = "in")]
    Login(LoginArgs),

    /// Log in with the configured pair, then run the logout sequence
    #[command(alias = "out")]
    Logout(LogoutArgs),

    /// List stable element identifiers and accessibility labels
    #[command(alias = "elements")]
    Ids(IdsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Flow commands ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email to submit (prompted when omitted on a terminal)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password to submit (prompted when omitted on a terminal)
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Submit the same pair this many times, stopping early on success
    #[arg(long, short = 'n', default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Skip simulated latencies
    #[arg(long)]
    pub instant: bool,
}

#[derive(Debug, Args)]
pub struct LogoutArgs {
    /// Skip simulated latencies
    #[arg(long)]
    pub instant: bool,
}

#[derive(Debug, Args)]
pub struct IdsArgs {
    /// Only list elements on this screen
    #[arg(long, short = 's')]
    pub screen: Option<ScreenArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScreenArg {
    Login,
    Home,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file, with guided setup on a terminal
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Write built-in defaults without prompting
        #[arg(long)]
        defaults: bool,
    },

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
