// ── Session handoff ──
//
// Owns the session phase and the navigation history. Login success enters
// through `complete_login` (called by the controller); logout is a public
// async flow that runs after the caller has confirmed. Both transitions
// replace history, so back navigation across them is refused.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use strum::Display;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::config::Timing;
use crate::error::CoreError;
use crate::messages;
use crate::model::User;
use crate::navigation::{NavigationRequest, Navigator, Route};
use crate::notification::{NotificationLevel, NotificationPresenter};
use crate::sync::{lock, pause};

const NAVIGATION_CHANNEL_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
    LoggingOut,
}

/// How a logout request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutOutcome {
    LoggedOut,
    /// The owning view went away mid-flow; the session stays authenticated.
    Abandoned,
}

/// Cloneable handle to the one session of a process.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    timing: Timing,
    phase: watch::Sender<SessionPhase>,
    navigator: Mutex<Navigator>,
    navigation_tx: broadcast::Sender<NavigationRequest>,
    user: Mutex<User>,
}

impl Session {
    pub fn new(timing: Timing, user: User) -> Self {
        let (phase, _) = watch::channel(SessionPhase::Unauthenticated);
        let (navigation_tx, _) = broadcast::channel(NAVIGATION_CHANNEL_SIZE);
        Self {
            inner: Arc::new(SessionInner {
                timing,
                phase,
                navigator: Mutex::new(Navigator::new(Route::Login)),
                navigation_tx,
                user: Mutex::new(user),
            }),
        }
    }

    // ── State observation ────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        *self.inner.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<SessionPhase> {
        self.inner.phase.subscribe()
    }

    /// Navigation requests published from now on.
    pub fn navigation(&self) -> broadcast::Receiver<NavigationRequest> {
        self.inner.navigation_tx.subscribe()
    }

    pub fn current_route(&self) -> Route {
        lock(&self.inner.navigator).current()
    }

    /// Snapshot of the signed-in profile.
    pub fn user(&self) -> User {
        lock(&self.inner.user).clone()
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Attempt back navigation. Handoffs replace the current entry, so
    /// the request is always refused and the refusal is returned.
    pub fn go_back(&self) -> CoreError {
        let refusal = lock(&self.inner.navigator).back();
        warn!(error = %refusal, "back navigation refused");
        refusal.into()
    }

    fn replace_route(&self, route: Route) {
        let request = lock(&self.inner.navigator).replace(route);
        debug!(?request, "navigation requested");
        let _ = self.inner.navigation_tx.send(request);
    }

    fn set_phase(&self, to: SessionPhase) {
        let from = self.inner.phase.send_replace(to);
        debug!(%from, %to, "session phase");
    }

    // ── Login handoff (driven by the controller) ─────────────────────

    pub(crate) fn begin_authentication(&self) {
        let moved = self.inner.phase.send_if_modified(|phase| {
            if *phase == SessionPhase::Unauthenticated {
                *phase = SessionPhase::Authenticating;
                true
            } else {
                false
            }
        });
        if moved {
            debug!("session phase: unauthenticated -> authenticating");
        }
    }

    pub(crate) fn cancel_authentication(&self) {
        let moved = self.inner.phase.send_if_modified(|phase| {
            if *phase == SessionPhase::Authenticating {
                *phase = SessionPhase::Unauthenticated;
                true
            } else {
                false
            }
        });
        if moved {
            debug!("session phase: authenticating -> unauthenticated");
        }
    }

    pub(crate) fn complete_login(&self) {
        let email = {
            let mut user = lock(&self.inner.user);
            user.last_login_at = Some(Utc::now());
            user.email.clone()
        };
        self.set_phase(SessionPhase::Authenticated);
        self.replace_route(Route::Home);
        info!(%email, "session authenticated");
    }

    // ── Logout ───────────────────────────────────────────────────────

    /// Run the simulated logout sequence.
    ///
    /// Confirmation is the caller's job. `presenter` belongs to the view
    /// that requested the logout: the success notification goes there, and
    /// tearing it down abandons the flow.
    pub async fn logout(
        &self,
        presenter: &NotificationPresenter,
    ) -> Result<LogoutOutcome, CoreError> {
        let mut refused = None;
        self.inner.phase.send_if_modified(|phase| match phase {
            SessionPhase::Authenticated => {
                *phase = SessionPhase::LoggingOut;
                true
            }
            SessionPhase::LoggingOut => {
                refused = Some(CoreError::LogoutInProgress);
                false
            }
            other => {
                refused = Some(CoreError::NotAuthenticated {
                    phase: other.to_string(),
                });
                false
            }
        });
        if let Some(err) = refused {
            warn!(error = %err, "logout refused");
            return Err(err);
        }
        info!("logging out");

        let scope = presenter.view_scope();
        let timing = self.inner.timing;

        if !pause(timing.logout_teardown, &scope).await {
            return Ok(self.abandon_logout());
        }
        presenter.show(messages::LOGOUT_SUCCESS, NotificationLevel::Success);

        if !pause(timing.logout_handoff, &scope).await {
            return Ok(self.abandon_logout());
        }
        self.set_phase(SessionPhase::Unauthenticated);
        self.replace_route(Route::Login);
        info!("session ended");
        Ok(LogoutOutcome::LoggedOut)
    }

    fn abandon_logout(&self) -> LogoutOutcome {
        warn!("logout abandoned, view torn down");
        self.set_phase(SessionPhase::Authenticated);
        LogoutOutcome::Abandoned
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase())
            .field("route", &self.current_route())
            .finish_non_exhaustive()
    }
}
