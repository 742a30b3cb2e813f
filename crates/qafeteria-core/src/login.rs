// ── Login attempt controller ──
//
// One controller per process. It owns the attempt counter, runs the
// simulated verification, and drives the session handoff on success.
// Every failure is recovered here and surfaced through the presenter of
// the view the controller is attached to; callers get a `SubmitOutcome`
// value, never an error.
//
// Attempt invariant: `locked == (count >= max_attempts)`, and `count`
// never decreases for the lifetime of the controller.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::{SessionConfig, Timing};
use crate::error::LoginError;
use crate::messages;
use crate::model::Credentials;
use crate::notification::{NotificationLevel, NotificationPresenter};
use crate::session::Session;
use crate::sync::{lock, pause};
use crate::validator::{ExpectationVerifier, Verifier};

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum LoginPhase {
    #[default]
    Idle,
    Validating,
    Locked,
}

/// Failed-attempt bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttemptState {
    pub count: u32,
    pub locked: bool,
}

impl AttemptState {
    fn record_failure(&mut self, max_attempts: u32) {
        self.count = self.count.saturating_add(1);
        self.locked = self.count >= max_attempts;
    }
}

/// Published controller state. Rendering subscribes to this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoginState {
    pub phase: LoginPhase,
    pub attempts: AttemptState,
    pub max_attempts: u32,
}

impl LoginState {
    /// A submission is suspended awaiting its verdict.
    pub fn loading(&self) -> bool {
        self.phase == LoginPhase::Validating
    }

    /// The form should refuse input: the controller is locked for good.
    pub fn disabled(&self) -> bool {
        self.attempts.locked
    }
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Credentials matched and the session was handed off.
    Authenticated,
    /// The submission failed; the reason was already shown to the user.
    Rejected(LoginError),
    /// Another submission was in flight. Nothing happened.
    Ignored,
    /// The attached view went away while the submission was suspended.
    /// Attempt state was not touched.
    Abandoned,
}

impl SubmitOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authenticated => "authenticated",
            Self::Rejected(err) => err.kind(),
            Self::Ignored => "ignored",
            Self::Abandoned => "abandoned",
        }
    }
}

enum Entry {
    Started,
    Busy,
    Locked,
}

/// Cloneable handle to the login attempt controller.
#[derive(Clone)]
pub struct LoginController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    verifier: Arc<dyn Verifier>,
    max_attempts: u32,
    timing: Timing,
    session: Session,
    state: watch::Sender<LoginState>,
    /// Presenter of the attached view. Its teardown detaches the controller.
    presenter: Mutex<NotificationPresenter>,
}

impl LoginController {
    /// Controller checking credentials against `config.auth`.
    pub fn new(config: &SessionConfig, session: Session, presenter: NotificationPresenter) -> Self {
        Self::with_verifier(
            ExpectationVerifier::new(config.auth.clone()),
            config.auth.max_attempts,
            config.timing,
            session,
            presenter,
        )
    }

    /// Controller with a custom verification step.
    ///
    /// `max_attempts` is clamped to at least 1.
    pub fn with_verifier(
        verifier: impl Verifier,
        max_attempts: u32,
        timing: Timing,
        session: Session,
        presenter: NotificationPresenter,
    ) -> Self {
        let max_attempts = max_attempts.max(1);
        let (state, _) = watch::channel(LoginState {
            max_attempts,
            ..LoginState::default()
        });
        Self {
            inner: Arc::new(ControllerInner {
                verifier: Arc::new(verifier),
                max_attempts,
                timing,
                session,
                state,
                presenter: Mutex::new(presenter),
            }),
        }
    }

    // ── State observation ────────────────────────────────────────────

    pub fn state(&self) -> LoginState {
        *self.inner.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.inner.state.subscribe()
    }

    pub fn loading(&self) -> bool {
        self.state().loading()
    }

    pub fn disabled(&self) -> bool {
        self.state().disabled()
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Presenter of the currently attached view.
    pub fn presenter(&self) -> NotificationPresenter {
        lock(&self.inner.presenter).clone()
    }

    // ── View lifecycle ───────────────────────────────────────────────

    /// Bind the controller to a freshly mounted view.
    ///
    /// Attempt state carries over: re-mounting the login view never
    /// resets a lockout.
    pub fn attach(&self, presenter: NotificationPresenter) {
        let previous = std::mem::replace(&mut *lock(&self.inner.presenter), presenter);
        previous.teardown();
        debug!("login controller attached to view");
    }

    /// Unbind from the current view, abandoning any suspended submission.
    pub fn detach(&self) {
        self.presenter().teardown();
        debug!("login controller detached from view");
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Run one login attempt.
    pub async fn submit(&self, credentials: Credentials) -> SubmitOutcome {
        let presenter = self.presenter();

        match self.enter() {
            Entry::Started => {}
            Entry::Busy => {
                debug!("submit ignored, validation already in flight");
                return SubmitOutcome::Ignored;
            }
            Entry::Locked => {
                warn!("submit rejected, controller locked");
                presenter.show(messages::TOO_MANY_ATTEMPTS, NotificationLevel::Error);
                return SubmitOutcome::Rejected(LoginError::MaxAttemptsExceeded);
            }
        }

        let scope = presenter.view_scope();
        self.inner.session.begin_authentication();

        if !pause(self.inner.timing.login_latency, &scope).await {
            return self.abandon();
        }

        let verdict = if credentials.has_empty_field() {
            None
        } else {
            Some(self.inner.verifier.verify(&credentials))
        };

        match verdict {
            None => {
                let attempts = self.record_failure();
                warn!(count = attempts.count, "login rejected, empty field");
                presenter.show(messages::FILL_ALL_FIELDS, NotificationLevel::Warning);
                self.inner.session.cancel_authentication();
                SubmitOutcome::Rejected(LoginError::EmptyField)
            }
            Some(Err(e)) => {
                warn!(error = %e, "credential check failed");
                self.set_phase(LoginPhase::Idle);
                presenter.show(messages::INTERNAL_ERROR, NotificationLevel::Error);
                self.inner.session.cancel_authentication();
                SubmitOutcome::Rejected(LoginError::Internal(e.to_string()))
            }
            Some(Ok(false)) => {
                let attempts = self.record_failure();
                let max = self.inner.max_attempts;
                self.inner.session.cancel_authentication();
                if attempts.locked {
                    warn!(count = attempts.count, "login rejected, controller locked");
                    presenter.show(messages::ACCOUNT_LOCKED, NotificationLevel::Error);
                    SubmitOutcome::Rejected(LoginError::MaxAttemptsExceeded)
                } else {
                    warn!(count = attempts.count, max, "login rejected, invalid credentials");
                    presenter.show(
                        messages::invalid_credentials(attempts.count, max),
                        NotificationLevel::Error,
                    );
                    SubmitOutcome::Rejected(LoginError::InvalidCredentials {
                        attempt: attempts.count,
                        max,
                    })
                }
            }
            Some(Ok(true)) => {
                info!(email = %credentials.email, "credentials accepted");
                presenter.show(messages::LOGIN_SUCCESS, NotificationLevel::Success);
                if !pause(self.inner.timing.login_handoff, &scope).await {
                    return self.abandon();
                }
                self.inner.session.complete_login();
                self.set_phase(LoginPhase::Idle);
                SubmitOutcome::Authenticated
            }
        }
    }

    /// Atomically decide whether a submission may start.
    fn enter(&self) -> Entry {
        let mut entry = Entry::Busy;
        self.inner.state.send_if_modified(|state| {
            if state.phase == LoginPhase::Validating {
                return false;
            }
            if state.attempts.locked {
                entry = Entry::Locked;
                let changed = state.phase != LoginPhase::Locked;
                state.phase = LoginPhase::Locked;
                return changed;
            }
            entry = Entry::Started;
            state.phase = LoginPhase::Validating;
            true
        });
        entry
    }

    fn record_failure(&self) -> AttemptState {
        let max = self.inner.max_attempts;
        let mut attempts = AttemptState::default();
        self.inner.state.send_modify(|state| {
            state.attempts.record_failure(max);
            state.phase = if state.attempts.locked {
                LoginPhase::Locked
            } else {
                LoginPhase::Idle
            };
            attempts = state.attempts;
        });
        attempts
    }

    fn set_phase(&self, phase: LoginPhase) {
        self.inner.state.send_modify(|state| state.phase = phase);
        debug!(%phase, "login phase");
    }

    fn abandon(&self) -> SubmitOutcome {
        warn!("submit abandoned, view detached");
        self.set_phase(LoginPhase::Idle);
        self.inner.session.cancel_authentication();
        SubmitOutcome::Abandoned
    }
}

impl std::fmt::Debug for LoginController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
