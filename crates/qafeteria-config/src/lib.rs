//! Shared configuration for the QAfeteria CLI and TUI.
//!
//! A TOML file layered over built-in defaults and `QAFETERIA_` environment
//! variables, validated and translated into `qafeteria_core::SessionConfig`.
//! Both binaries depend on this crate.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use qafeteria_core::{AuthExpectation, Role, SessionConfig, Timing, User};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Front-end presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// The accepted credential pair and lockout policy.
    #[serde(default)]
    pub auth: AuthSection,

    /// Simulated latencies, in milliseconds.
    #[serde(default)]
    pub timing: TimingSection,

    /// Mock profile shown after login.
    #[serde(default)]
    pub user: UserSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthSection {
    #[serde(default = "default_email")]
    pub email: String,

    /// Plaintext: this is a fixture password, published in the login hint.
    #[serde(default = "default_password")]
    pub password: String,

    /// Reserved. Carried through to core but unused by any flow.
    #[serde(default = "default_token_expiration_ms")]
    pub token_expiration_ms: u64,

    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
            token_expiration_ms: default_token_expiration_ms(),
            max_login_attempts: default_max_login_attempts(),
        }
    }
}

fn default_email() -> String {
    "vitor@app.com".into()
}
fn default_password() -> String {
    "vitor123".into()
}
fn default_token_expiration_ms() -> u64 {
    3_600_000
}
fn default_max_login_attempts() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimingSection {
    #[serde(default = "default_login_latency_ms")]
    pub login_latency_ms: u64,

    #[serde(default = "default_login_handoff_ms")]
    pub login_handoff_ms: u64,

    #[serde(default = "default_logout_teardown_ms")]
    pub logout_teardown_ms: u64,

    #[serde(default = "default_logout_handoff_ms")]
    pub logout_handoff_ms: u64,

    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            login_latency_ms: default_login_latency_ms(),
            login_handoff_ms: default_login_handoff_ms(),
            logout_teardown_ms: default_logout_teardown_ms(),
            logout_handoff_ms: default_logout_handoff_ms(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

fn default_login_latency_ms() -> u64 {
    1500
}
fn default_login_handoff_ms() -> u64 {
    1000
}
fn default_logout_teardown_ms() -> u64 {
    1000
}
fn default_logout_handoff_ms() -> u64 {
    1500
}
fn default_toast_duration_ms() -> u64 {
    3000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSection {
    /// Display name. Empty falls back to the email local part.
    #[serde(default = "default_user_name")]
    pub name: String,

    /// "user" or "admin".
    #[serde(default = "default_user_role")]
    pub role: String,
}

impl Default for UserSection {
    fn default() -> Self {
        Self {
            name: default_user_name(),
            role: default_user_role(),
        }
    }
}

fn default_user_name() -> String {
    "Vitor".into()
}
fn default_user_role() -> String {
    "user".into()
}

// ── Validation & translation ────────────────────────────────────────

/// Values accepted for `defaults.output`.
pub const OUTPUT_FORMATS: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];

/// Values accepted for `defaults.color`.
pub const COLOR_MODES: &[&str] = &["auto", "always", "never"];

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.email.trim().is_empty() {
            return Err(ConfigError::invalid("auth.email", "must not be empty"));
        }
        if self.auth.password.is_empty() {
            return Err(ConfigError::invalid("auth.password", "must not be empty"));
        }
        if self.auth.max_login_attempts < 1 {
            return Err(ConfigError::invalid(
                "auth.max_login_attempts",
                "must be at least 1",
            ));
        }
        if !OUTPUT_FORMATS.contains(&self.defaults.output.as_str()) {
            return Err(ConfigError::invalid(
                "defaults.output",
                format!(
                    "expected one of {}, got '{}'",
                    OUTPUT_FORMATS.join(", "),
                    self.defaults.output
                ),
            ));
        }
        if !COLOR_MODES.contains(&self.defaults.color.as_str()) {
            return Err(ConfigError::invalid(
                "defaults.color",
                format!(
                    "expected one of {}, got '{}'",
                    COLOR_MODES.join(", "),
                    self.defaults.color
                ),
            ));
        }
        self.role()?;
        Ok(())
    }

    fn role(&self) -> Result<Role, ConfigError> {
        Role::from_str(&self.user.role).map_err(|_| {
            ConfigError::invalid(
                "user.role",
                format!("expected 'user' or 'admin', got '{}'", self.user.role),
            )
        })
    }

    pub fn auth_expectation(&self) -> AuthExpectation {
        AuthExpectation {
            email: self.auth.email.clone(),
            password: SecretString::from(self.auth.password.clone()),
            max_attempts: self.auth.max_login_attempts,
            token_expiration: Duration::from_millis(self.auth.token_expiration_ms),
        }
    }

    pub fn timing(&self) -> Timing {
        let t = &self.timing;
        Timing {
            login_latency: Duration::from_millis(t.login_latency_ms),
            login_handoff: Duration::from_millis(t.login_handoff_ms),
            logout_teardown: Duration::from_millis(t.logout_teardown_ms),
            logout_handoff: Duration::from_millis(t.logout_handoff_ms),
            toast_duration: Duration::from_millis(t.toast_duration_ms),
        }
    }

    /// Build the core session settings. Validates first.
    pub fn to_session_config(&self) -> Result<SessionConfig, ConfigError> {
        self.validate()?;
        let name = self.user.name.trim();
        let user = User {
            email: self.auth.email.clone(),
            name: (!name.is_empty()).then(|| name.to_owned()),
            role: self.role()?,
            ..User::default()
        };
        Ok(SessionConfig {
            auth: self.auth_expectation(),
            timing: self.timing(),
            user,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "qafeteria", "qafeteria").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("qafeteria");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load and validate the Config from `path` + environment.
///
/// A missing file is not an error: defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("QAFETERIA_").split("__"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use figment::Jail;

    const FILE: &str = "config.toml";

    /// Run `f` in a temp working directory with an empty environment, so
    /// `QAFETERIA_*` variables from the caller never leak into a load.
    fn jailed(f: impl FnOnce(&mut Jail) -> figment::error::Result<()>) {
        Jail::expect_with(|jail| {
            jail.clear_env();
            f(jail)
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        jailed(|_| {
            let config = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_overrides_individual_keys() {
        jailed(|jail| {
            jail.create_file(
                FILE,
                r#"
                [auth]
                max_login_attempts = 5

                [timing]
                login_latency_ms = 10

                [user]
                role = "admin"
                "#,
            )?;
            let config = load_config_from(Path::new(FILE)).unwrap();
            assert_eq!(config.auth.max_login_attempts, 5);
            assert_eq!(config.auth.email, "vitor@app.com");
            assert_eq!(config.timing.login_latency_ms, 10);
            assert_eq!(config.timing.toast_duration_ms, 3000);

            let session = config.to_session_config().unwrap();
            assert_eq!(session.auth.max_attempts, 5);
            assert_eq!(session.auth.password.expose_secret(), "vitor123");
            assert_eq!(session.timing.login_latency, Duration::from_millis(10));
            assert!(session.user.is_admin());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        jailed(|jail| {
            jail.create_file(
                FILE,
                "[auth]\nemail = \"file@app.com\"\nmax_login_attempts = 2\n",
            )?;
            jail.set_env("QAFETERIA_AUTH__MAX_LOGIN_ATTEMPTS", 5);
            jail.set_env("QAFETERIA_TIMING__TOAST_DURATION_MS", 250);

            let config = load_config_from(Path::new(FILE)).unwrap();
            assert_eq!(config.auth.max_login_attempts, 5);
            assert_eq!(config.auth.email, "file@app.com");
            assert_eq!(config.timing.toast_duration_ms, 250);
            Ok(())
        });
    }

    #[test]
    fn env_applies_without_a_file() {
        jailed(|jail| {
            jail.set_env("QAFETERIA_AUTH__EMAIL", "env@app.com");
            jail.set_env("QAFETERIA_USER__ROLE", "admin");

            let config = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(config.auth.email, "env@app.com");
            assert_eq!(config.auth.password, "vitor123");
            assert!(config.to_session_config().unwrap().user.is_admin());
            Ok(())
        });
    }

    #[test]
    fn invalid_env_value_fails_validation() {
        jailed(|jail| {
            jail.set_env("QAFETERIA_AUTH__MAX_LOGIN_ATTEMPTS", 0);
            let err = load_config_from(Path::new("absent.toml")).unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation { ref field, .. } if field == "auth.max_login_attempts")
            );
            Ok(())
        });
    }

    #[test]
    fn zero_attempts_rejected() {
        jailed(|jail| {
            jail.create_file(FILE, "[auth]\nmax_login_attempts = 0\n")?;
            let err = load_config_from(Path::new(FILE)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation { ref field, .. } if field == "auth.max_login_attempts")
            );
            Ok(())
        });
    }

    #[test]
    fn unknown_role_rejected() {
        let mut config = Config::default();
        config.user.role = "root".into();
        let err = config.to_session_config().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid user.role: expected 'user' or 'admin', got 'root'"
        );
    }

    #[test]
    fn empty_credentials_rejected() {
        let mut config = Config::default();
        config.auth.email = "  ".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.auth.password = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_output_format_rejected() {
        let mut config = Config::default();
        config.defaults.output = "xml".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().starts_with("invalid defaults.output"));
    }

    #[test]
    fn empty_name_falls_back_to_email() {
        let mut config = Config::default();
        config.user.name = String::new();
        let session = config.to_session_config().unwrap();
        assert_eq!(session.user.display_name(), "vitor");
    }

    #[test]
    fn save_then_load_preserves_config() {
        jailed(|jail| {
            let path = jail.directory().join("nested").join(FILE);
            let mut config = Config::default();
            config.auth.max_login_attempts = 7;
            config.user.name = "Ana".into();

            save_config_to(&config, &path).unwrap();
            assert_eq!(load_config_from(&path).unwrap(), config);
            Ok(())
        });
    }

    #[test]
    fn malformed_toml_is_a_figment_error() {
        jailed(|jail| {
            jail.create_file(FILE, "[auth\nemail = ")?;
            assert!(matches!(
                load_config_from(Path::new(FILE)),
                Err(ConfigError::Figment(_))
            ));
            Ok(())
        });
    }
}
