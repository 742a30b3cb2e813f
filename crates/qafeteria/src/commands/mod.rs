//! Command dispatch: bridges CLI args -> core flows -> output formatting.

pub mod config_cmd;
pub mod ids;
pub mod login;
pub mod logout;
pub mod util;

use qafeteria_core::SessionConfig;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a flow command needs once config is resolved.
#[derive(Debug)]
pub struct Context {
    pub settings: SessionConfig,
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Context {
    /// Load config (file + env), then apply CLI flag overrides.
    pub fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = qafeteria_config::load_config_from(&util::config_file(global))?;
        Ok(Self {
            settings: cfg.to_session_config()?,
            format: util::resolve_format(global, &cfg),
            color: util::resolve_color(global, &cfg),
            quiet: global.quiet,
            yes: global.yes,
        })
    }
}

/// Dispatch a flow command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => login::handle(args, ctx).await,
        Command::Logout(args) => logout::handle(args, ctx).await,
        Command::Ids(args) => {
            ids::handle(&args, ctx);
            Ok(())
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
