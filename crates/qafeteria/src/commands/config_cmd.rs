//! Config subcommand handlers.

use dialoguer::{Input, Select};

use qafeteria_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::commands::util;
use crate::error::{CliError, prompt_err};
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = util::config_file(global);

    match args.command {
        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = qafeteria_config::load_config_from(&path)?;
            let format = util::resolve_format(global, &cfg);
            let out = output::render_single(format, &cfg, to_toml, to_toml);
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init { force, defaults } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = if defaults || !util::stdin_is_interactive() {
                Config::default()
            } else {
                eprintln!("QAfeteria: configuration wizard");
                eprintln!("   Config path: {}\n", path.display());
                wizard()?
            };
            cfg.validate()?;
            qafeteria_config::save_config_to(&cfg, &path)?;

            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                if global.output == Some(OutputFormat::Plain) {
                    println!("{}", path.display());
                }
            }
            Ok(())
        }
    }
}

fn to_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg)
        .unwrap_or_else(|e| format!("# failed to serialize config: {e}\n{cfg:#?}"))
}

fn wizard() -> Result<Config, CliError> {
    let mut cfg = Config::default();

    cfg.auth.email = Input::new()
        .with_prompt("Accepted email")
        .default(cfg.auth.email.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let password = rpassword::prompt_password("Accepted password (blank keeps default): ")
        .map_err(prompt_err)?;
    if !password.is_empty() {
        cfg.auth.password = password;
    }

    cfg.auth.max_login_attempts = Input::new()
        .with_prompt("Attempts before lockout")
        .default(cfg.auth.max_login_attempts)
        .validate_with(|n: &u32| if *n >= 1 { Ok(()) } else { Err("must be at least 1") })
        .interact_text()
        .map_err(prompt_err)?;

    cfg.user.name = Input::new()
        .with_prompt("Display name")
        .default(cfg.user.name.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let roles = ["user", "admin"];
    let role = Select::new()
        .with_prompt("Role")
        .items(&roles)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    cfg.user.role = roles.get(role).copied().unwrap_or("user").into();

    Ok(cfg)
}
