//! Everything that changes UI state travels through the action channel.

use std::fmt;

use qafeteria_core::messages;
use qafeteria_core::{
    Credentials, LoginState, LogoutOutcome, NavigationRequest, NotificationLevel,
    NotificationState, SessionPhase, SubmitOutcome,
};

#[derive(Debug)]
pub enum Action {
    Quit,
    Tick,
    Render,

    // ── Session ──
    Navigate(NavigationRequest),
    PhaseChanged(SessionPhase),
    GoBack,

    // ── Login ──
    LoginStateChanged(LoginState),
    SubmitLogin(Credentials),
    LoginFinished(SubmitOutcome),

    // ── Home ──
    QuickAction(&'static str),
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    LogoutFinished(Result<LogoutOutcome, String>),

    // ── Notifications ──
    /// Toast state of the presenter owning `element`.
    ToastChanged {
        element: &'static str,
        state: NotificationState,
    },
    Notify(String, NotificationLevel),

    ToggleInspector,
}

/// An action waiting on the confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Logout,
}

impl ConfirmAction {
    pub fn title(self) -> &'static str {
        match self {
            Self::Logout => messages::LOGOUT_CONFIRM_TITLE,
        }
    }

    /// Labels of the (cancel, accept) buttons.
    pub fn buttons(self) -> (&'static str, &'static str) {
        match self {
            Self::Logout => (messages::LOGOUT_CONFIRM_CANCEL, messages::LOGOUT_CONFIRM_ACCEPT),
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logout => f.write_str(messages::LOGOUT_CONFIRM_BODY),
        }
    }
}
