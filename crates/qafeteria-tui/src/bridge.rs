//! Bridges from core watch/broadcast channels into the action loop.
//!
//! The session bridge lives as long as the app. A toast bridge lives as long
//! as the screen whose presenter it follows.

use qafeteria_core::{LoginController, NotificationPresenter, Session};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::Action;

/// Forward navigation requests, session phases and login state until
/// cancelled.
pub fn spawn_session_bridge(
    session: &Session,
    controller: &LoginController,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut navigation = session.navigation();
    let mut phase = session.subscribe_phase();
    let mut login = controller.subscribe();

    tokio::spawn(async move {
        let _ = action_tx.send(Action::PhaseChanged(*phase.borrow_and_update()));
        let _ = action_tx.send(Action::LoginStateChanged(*login.borrow_and_update()));

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                Ok(request) = navigation.recv() => {
                    debug!(route = %request.target(), "dispatching navigation");
                    let _ = action_tx.send(Action::Navigate(request));
                }
                Ok(()) = phase.changed() => {
                    let current = *phase.borrow_and_update();
                    let _ = action_tx.send(Action::PhaseChanged(current));
                }
                Ok(()) = login.changed() => {
                    let current = *login.borrow_and_update();
                    let _ = action_tx.send(Action::LoginStateChanged(current));
                }
            }
        }
        debug!("session bridge shut down");
    });
}

/// Forward toast changes of one screen's presenter until cancelled.
pub fn spawn_toast_bridge(
    presenter: &NotificationPresenter,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let element = presenter.element_id();
    let mut toast = presenter.subscribe();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                Ok(()) = toast.changed() => {
                    let state = toast.borrow_and_update().clone();
                    let _ = action_tx.send(Action::ToastChanged { element, state });
                }
            }
        }
        debug!(element, "toast bridge shut down");
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use qafeteria_core::elements::id;
    use qafeteria_core::{
        Credentials, NavigationRequest, NotificationLevel, Route, SessionConfig, SessionPhase,
        SubmitOutcome,
    };
    use std::time::Duration;

    fn instant_config() -> SessionConfig {
        let config = SessionConfig::default();
        SessionConfig {
            timing: config.timing.instant(),
            ..config
        }
    }

    #[tokio::test(start_paused = true)]
    async fn session_bridge_forwards_login_handoff() {
        let config = instant_config();
        let session = Session::new(config.timing, config.user.clone());
        let presenter = NotificationPresenter::new(id::LOGIN_TOAST, Duration::from_secs(3));
        let controller = LoginController::new(&config, session.clone(), presenter);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        spawn_session_bridge(&session, &controller, tx, cancel.clone());

        let outcome = controller
            .submit(Credentials::new("vitor@app.com", "vitor123"))
            .await;
        assert_eq!(outcome, SubmitOutcome::Authenticated);

        let mut navigated = None;
        let mut saw_authenticated = false;
        while let Ok(Some(action)) =
            tokio::time::timeout(Duration::from_millis(50), rx.recv()).await
        {
            match action {
                Action::Navigate(request) => navigated = Some(request),
                Action::PhaseChanged(SessionPhase::Authenticated) => saw_authenticated = true,
                _ => {}
            }
        }
        cancel.cancel();

        assert_eq!(navigated, Some(NavigationRequest::Replace(Route::Home)));
        assert!(saw_authenticated);
    }

    #[tokio::test(start_paused = true)]
    async fn toast_bridge_tags_presenter_element() {
        let presenter = NotificationPresenter::new(id::HOME_TOAST, Duration::from_secs(3));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        spawn_toast_bridge(&presenter, tx, cancel.clone());
        tokio::task::yield_now().await;

        presenter.show("olá", NotificationLevel::Info);
        let Some(Action::ToastChanged { element, state }) = rx.recv().await else {
            panic!("expected a toast change");
        };
        assert_eq!(element, id::HOME_TOAST);
        assert!(state.visible);
        assert_eq!(state.message, "olá");

        cancel.cancel();
    }
}
