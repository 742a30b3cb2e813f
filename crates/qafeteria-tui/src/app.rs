//! Application core: event loop, screen lifecycle and action dispatch.
//!
//! The app owns one [`Session`] and one [`LoginController`] for the whole
//! process. Screens come and go with navigation requests; each mounted
//! screen gets a fresh [`NotificationPresenter`] that is torn down when the
//! screen is replaced, which abandons any flow suspended on its behalf.

use std::time::Duration;

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use qafeteria_core::elements::id;
use qafeteria_core::{
    LoginController, LogoutOutcome, NotificationLevel, NotificationPresenter, NotificationState,
    Route, Session, SessionConfig, SessionPhase, SubmitOutcome, messages,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use secrecy::ExposeSecret;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::action::{Action, ConfirmAction};
use crate::bridge;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::{home::HomeScreen, login::LoginScreen};
use crate::theme;
use crate::tui::Tui;
use crate::widgets;

pub struct App {
    settings: SessionConfig,
    session: Session,
    controller: LoginController,
    route: Route,
    /// Mounted screen, `None` before the first mount.
    screen: Option<Box<dyn Component>>,
    /// Presenter of the mounted screen.
    presenter: NotificationPresenter,
    toast: NotificationState,
    /// Cancels the mounted screen's toast bridge.
    screen_cancel: CancellationToken,
    /// Cancels every bridge on shutdown.
    app_cancel: CancellationToken,
    pending_confirm: Option<ConfirmAction>,
    inspector_visible: bool,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(settings: SessionConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let session = Session::new(settings.timing, settings.user.clone());
        let presenter = toast_presenter(Route::Login, &settings);
        let controller = LoginController::new(&settings, session.clone(), presenter.clone());
        let route = session.current_route();
        let app_cancel = CancellationToken::new();

        Self {
            settings,
            session,
            controller,
            route,
            screen: None,
            presenter,
            toast: NotificationState::default(),
            screen_cancel: app_cancel.child_token(),
            app_cancel,
            pending_confirm: None,
            inspector_visible: false,
            running: true,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        bridge::spawn_session_bridge(
            &self.session,
            &self.controller,
            self.action_tx.clone(),
            self.app_cancel.clone(),
        );
        self.mount(self.route)?;

        let mut events = EventReader::new(Duration::from_millis(100), Duration::from_millis(33));
        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render | Event::Resize(..) => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.shutdown();
        events.stop();
        tui.exit();
        info!("event loop ended");
        Ok(())
    }

    // ── Screen lifecycle ─────────────────────────────────────────────

    /// Replace the mounted screen with the one for `route`.
    fn mount(&mut self, route: Route) -> Result<()> {
        self.unmount();

        let presenter = toast_presenter(route, &self.settings);
        let mut screen: Box<dyn Component> = match route {
            Route::Login => {
                self.controller.attach(presenter.clone());
                Box::new(LoginScreen::new(self.controller.state(), self.credentials_hint()))
            }
            Route::Home => {
                let user = self.session.user();
                let greeting = user.welcome_line(&Local::now());
                Box::new(HomeScreen::new(user, greeting))
            }
        };
        screen.init(self.action_tx.clone())?;
        screen.update(&Action::PhaseChanged(self.session.phase()))?;

        self.screen_cancel = self.app_cancel.child_token();
        bridge::spawn_toast_bridge(&presenter, self.action_tx.clone(), self.screen_cancel.clone());

        debug!(%route, screen = screen.id(), "screen mounted");
        self.screen = Some(screen);
        self.presenter = presenter;
        self.toast = NotificationState::default();
        self.pending_confirm = None;
        self.route = route;
        Ok(())
    }

    /// Tear down the mounted screen and its presenter.
    fn unmount(&mut self) {
        let Some(screen) = self.screen.take() else {
            return;
        };
        self.screen_cancel.cancel();
        match self.route {
            Route::Login => self.controller.detach(),
            Route::Home => self.presenter.teardown(),
        }
        debug!(screen = screen.id(), "screen unmounted");
    }

    fn shutdown(&mut self) {
        self.unmount();
        self.app_cancel.cancel();
    }

    fn credentials_hint(&self) -> String {
        let auth = &self.settings.auth;
        format!("Dica: {} / {}", auth.email, auth.password.expose_secret())
    }

    // ── Input ────────────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // The confirmation dialog captures all other input
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        match key.code {
            KeyCode::F(2) => return Ok(Some(Action::ToggleInspector)),
            KeyCode::Esc => return Ok(Some(Action::GoBack)),
            _ => {}
        }

        match self.screen.as_mut() {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render => {}

            Action::Navigate(request) => {
                let target = request.target();
                if target == self.route {
                    debug!(%target, "already on route");
                } else {
                    info!(from = %self.route, to = %target, "navigating");
                    self.mount(target)?;
                }
            }

            Action::GoBack => {
                let refusal = self.session.go_back();
                debug!(error = %refusal, "back refused");
                self.presenter.show(refusal.to_string(), NotificationLevel::Info);
            }

            Action::SubmitLogin(credentials) => {
                let controller = self.controller.clone();
                let credentials = credentials.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let outcome = controller.submit(credentials).await;
                    let _ = tx.send(Action::LoginFinished(outcome));
                });
            }

            Action::LoginFinished(outcome) => match outcome {
                SubmitOutcome::Rejected(e) => debug!(kind = e.kind(), "login rejected"),
                other => debug!(outcome = other.kind(), "login finished"),
            },

            Action::QuickAction(label) => {
                self.presenter
                    .show(messages::action_coming_soon(label), NotificationLevel::Info);
            }

            Action::Notify(message, level) => self.presenter.show(message.clone(), *level),

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(*confirm),

            Action::ConfirmNo => self.pending_confirm = None,

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::LogoutFinished(result) => match result {
                Ok(LogoutOutcome::LoggedOut) => debug!("logout finished"),
                Ok(LogoutOutcome::Abandoned) => debug!("logout abandoned"),
                Err(e) => {
                    warn!(error = %e, "logout failed");
                    self.action_tx.send(Action::Notify(
                        messages::LOGOUT_FAILED.into(),
                        NotificationLevel::Error,
                    ))?;
                }
            },

            Action::ToastChanged { element, state } => {
                if *element == self.presenter.element_id() {
                    self.toast = state.clone();
                }
            }

            Action::ToggleInspector => self.inspector_visible = !self.inspector_visible,

            Action::Tick | Action::PhaseChanged(_) | Action::LoginStateChanged(_) => {
                if let Some(screen) = self.screen.as_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn execute_confirm(&self, confirm: ConfirmAction) {
        match confirm {
            ConfirmAction::Logout => {
                let session = self.session.clone();
                let presenter = self.presenter.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = session.logout(&presenter).await.map_err(|e| e.to_string());
                    let _ = tx.send(Action::LogoutFinished(result));
                });
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [content, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let mut markers = Vec::new();
        if let Some(screen) = self.screen.as_ref() {
            screen.render(frame, content, &mut markers);
        }
        widgets::toast::render(frame, content, self.presenter.element_id(), &self.toast, &mut markers);

        self.render_status_bar(frame, status);

        if let Some(confirm) = self.pending_confirm {
            widgets::confirm::render(frame, content, confirm);
        }
        if self.inspector_visible {
            widgets::inspector::render(frame, content, self.route, &markers);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let phase = self.session.phase();
        let phase_color = match phase {
            SessionPhase::Authenticated => theme::GREEN,
            SessionPhase::Authenticating | SessionPhase::LoggingOut => theme::YELLOW,
            SessionPhase::Unauthenticated => theme::MUTED,
        };
        let hints = match self.route {
            Route::Login => "Tab campo  Enter entrar",
            Route::Home => "←/→ foco  Enter ativar  s sair",
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.route), theme::title_style()),
            Span::styled(format!("● {phase}"), Style::default().fg(phase_color)),
            Span::styled(format!("  │ {hints}  F2 inspetor  Esc voltar  Ctrl+C sair"), theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn toast_presenter(route: Route, settings: &SessionConfig) -> NotificationPresenter {
    let element = match route {
        Route::Login => id::LOGIN_TOAST,
        Route::Home => id::HOME_TOAST,
    };
    NotificationPresenter::new(element, settings.timing.toast_duration)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use qafeteria_core::{Credentials, NavigationRequest};

    fn app() -> App {
        let settings = SessionConfig::default();
        App::new(SessionConfig {
            timing: settings.timing.instant(),
            ..settings
        })
    }

    /// Process queued actions until the channel stays quiet.
    async fn settle(app: &mut App) {
        while let Ok(Some(action)) =
            tokio::time::timeout(Duration::from_millis(20), app.action_rx.recv()).await
        {
            app.process_action(&action).unwrap();
        }
    }

    async fn started() -> App {
        let mut app = app();
        bridge::spawn_session_bridge(
            &app.session,
            &app.controller,
            app.action_tx.clone(),
            app.app_cancel.clone(),
        );
        app.mount(app.route).unwrap();
        settle(&mut app).await;
        app
    }

    #[tokio::test(start_paused = true)]
    async fn successful_login_mounts_home() {
        let mut app = started().await;
        app.process_action(&Action::SubmitLogin(Credentials::new("vitor@app.com", "vitor123")))
            .unwrap();
        settle(&mut app).await;

        assert_eq!(app.route, Route::Home);
        assert_eq!(app.presenter.element_id(), id::HOME_TOAST);
        assert_eq!(app.session.phase(), SessionPhase::Authenticated);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_login_shows_toast_on_login_screen() {
        let mut app = started().await;
        app.process_action(&Action::SubmitLogin(Credentials::new("vitor@app.com", "errada")))
            .unwrap();
        settle(&mut app).await;

        assert_eq!(app.route, Route::Login);
        assert!(app.toast.visible);
        assert_eq!(app.toast.message, messages::invalid_credentials(1, 3));
    }

    #[tokio::test(start_paused = true)]
    async fn back_is_refused_after_handoff() {
        let mut app = started().await;
        app.process_action(&Action::SubmitLogin(Credentials::new("vitor@app.com", "vitor123")))
            .unwrap();
        settle(&mut app).await;

        app.process_action(&Action::GoBack).unwrap();
        settle(&mut app).await;

        assert_eq!(app.route, Route::Home);
        assert!(app.toast.visible);
        assert_eq!(app.toast.level, NotificationLevel::Info);
        assert_eq!(app.toast.message, "Cannot go back from Home: no earlier screen");
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_logout_returns_to_login_and_keeps_lockout_state() {
        let mut app = started().await;
        app.process_action(&Action::SubmitLogin(Credentials::new("vitor@app.com", "errada")))
            .unwrap();
        settle(&mut app).await;
        app.process_action(&Action::SubmitLogin(Credentials::new("vitor@app.com", "vitor123")))
            .unwrap();
        settle(&mut app).await;
        assert_eq!(app.route, Route::Home);

        app.process_action(&Action::ShowConfirm(ConfirmAction::Logout)).unwrap();
        app.process_action(&Action::ConfirmYes).unwrap();
        settle(&mut app).await;

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.session.phase(), SessionPhase::Unauthenticated);
        assert_eq!(app.controller.state().attempts.count, 1);
        assert!(app.pending_confirm.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_confirmation_keeps_session() {
        let mut app = started().await;
        app.process_action(&Action::SubmitLogin(Credentials::new("vitor@app.com", "vitor123")))
            .unwrap();
        settle(&mut app).await;

        app.process_action(&Action::ShowConfirm(ConfirmAction::Logout)).unwrap();
        app.process_action(&Action::ConfirmNo).unwrap();
        settle(&mut app).await;

        assert_eq!(app.route, Route::Home);
        assert_eq!(app.session.phase(), SessionPhase::Authenticated);
    }

    #[tokio::test(start_paused = true)]
    async fn quick_action_shows_info_toast() {
        let mut app = started().await;
        app.process_action(&Action::Navigate(NavigationRequest::Replace(Route::Home)))
            .unwrap();
        app.process_action(&Action::QuickAction(messages::QUICK_ACTION_PROFILE))
            .unwrap();
        settle(&mut app).await;

        assert!(app.toast.visible);
        assert_eq!(app.toast.message, "Ação \"Ver Perfil\" será implementada em breve!");
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_login_abandons_a_pending_submit() {
        let settings = SessionConfig::default();
        let mut app = App::new(settings);
        app.mount(app.route).unwrap();

        app.process_action(&Action::SubmitLogin(Credentials::new("vitor@app.com", "vitor123")))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.process_action(&Action::Navigate(NavigationRequest::Replace(Route::Home)))
            .unwrap();

        let finished = loop {
            match app.action_rx.recv().await {
                Some(Action::LoginFinished(outcome)) => break outcome,
                Some(_) => {}
                None => panic!("action channel closed"),
            }
        };
        assert_eq!(finished, SubmitOutcome::Abandoned);
        assert_eq!(app.session.phase(), SessionPhase::Unauthenticated);
    }
}
