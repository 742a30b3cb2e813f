// ── Runtime session configuration ──
//
// These types describe *what* the fixture accepts and *how long* each
// simulated step takes. They carry credential data but never touch disk.
// The CLI/TUI builds a `SessionConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use crate::model::User;

/// The one credential pair the fixture accepts, plus lockout policy.
///
/// Read-only after construction.
#[derive(Debug, Clone)]
pub struct AuthExpectation {
    pub email: String,
    pub password: SecretString,
    /// Consecutive failures before the controller locks. Always >= 1.
    pub max_attempts: u32,
    /// Reserved. Carried through configuration but unused by any flow.
    pub token_expiration: Duration,
}

impl Default for AuthExpectation {
    fn default() -> Self {
        Self {
            email: "vitor@app.com".into(),
            password: SecretString::from("vitor123"),
            max_attempts: 3,
            token_expiration: Duration::from_millis(3_600_000),
        }
    }
}

/// Simulated latencies for every suspended step of the login and logout
/// flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Suspension between a submit and its verdict.
    pub login_latency: Duration,
    /// Delay between the success notification and the handoff.
    pub login_handoff: Duration,
    /// Simulated teardown before the logout notification.
    pub logout_teardown: Duration,
    /// Delay between the logout notification and the handoff.
    pub logout_handoff: Duration,
    /// How long a notification stays visible.
    pub toast_duration: Duration,
}

impl Timing {
    /// Zero every flow delay, keeping the notification lifetime.
    ///
    /// Used by scripted runs that only care about the event trail.
    pub fn instant(self) -> Self {
        Self {
            login_latency: Duration::ZERO,
            login_handoff: Duration::ZERO,
            logout_teardown: Duration::ZERO,
            logout_handoff: Duration::ZERO,
            ..self
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            login_latency: Duration::from_millis(1500),
            login_handoff: Duration::from_millis(1000),
            logout_teardown: Duration::from_millis(1000),
            logout_handoff: Duration::from_millis(1500),
            toast_duration: Duration::from_millis(3000),
        }
    }
}

/// Everything needed to run one session.
///
/// Built by CLI/TUI, passed to `Session` and `LoginController`. Core never
/// reads config files.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub auth: AuthExpectation,
    pub timing: Timing,
    /// Profile shown on the home screen once authenticated.
    pub user: User,
}
