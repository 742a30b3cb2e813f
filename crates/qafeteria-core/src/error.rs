// ── Core error types ──
//
// Two layers live here. `LoginError` is the domain taxonomy for a rejected
// submission: it is a value carried inside `SubmitOutcome`, surfaced as a
// notification and never propagated. `CoreError` covers the operations that
// can genuinely fail for a caller (logout preconditions, navigation, the
// pluggable verifier).

use thiserror::Error;

use crate::navigation::Route;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Session is not authenticated (current phase: {phase})")]
    NotAuthenticated { phase: String },

    #[error("Logout already in progress")]
    LogoutInProgress,

    // ── Navigation errors ────────────────────────────────────────────
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    // ── Verification errors ──────────────────────────────────────────
    #[error("Credential check failed: {message}")]
    Verification { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a login submission was rejected.
///
/// Every variant is recovered at the controller boundary. Only
/// [`MaxAttemptsExceeded`](Self::MaxAttemptsExceeded) is terminal; the
/// rest can be retried immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("email or password is empty")]
    EmptyField,

    #[error("invalid credentials (attempt {attempt} of {max})")]
    InvalidCredentials { attempt: u32, max: u32 },

    #[error("too many failed login attempts")]
    MaxAttemptsExceeded,

    #[error("internal error: {0}")]
    Internal(String),
}

impl LoginError {
    /// Whether the controller will reject every later submission.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::MaxAttemptsExceeded)
    }

    /// Short machine-friendly kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::InvalidCredentials { .. } => "invalid_credentials",
            Self::MaxAttemptsExceeded => "max_attempts_exceeded",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Navigation requests the navigator refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Cannot go back from {current}: no earlier screen")]
    NoHistory { current: Route },
}
