//! Login screen: email and password fields, submit button, lockout notice
//! and the credentials hint.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use qafeteria_core::elements::{Suffix, derived, id};
use qafeteria_core::{Field, LoginForm, LoginState, messages};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tui_input::{Input, InputRequest};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::inspector::Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Email,
    Password,
    Submit,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Submit,
            Self::Submit => Self::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Email => Self::Submit,
            Self::Password => Self::Email,
            Self::Submit => Self::Password,
        }
    }

    fn field(self) -> Option<Field> {
        match self {
            Self::Email => Some(Field::Email),
            Self::Password => Some(Field::Password),
            Self::Submit => None,
        }
    }
}

pub struct LoginScreen {
    form: LoginForm,
    email: Input,
    password: Input,
    focus: Focus,
    state: LoginState,
    throbber: ThrobberState,
    hint: String,
}

impl LoginScreen {
    /// `hint` is the demo credentials line shown in the footer.
    pub fn new(state: LoginState, hint: String) -> Self {
        Self {
            form: LoginForm::default(),
            email: Input::default(),
            password: Input::default(),
            focus: Focus::Email,
            state,
            throbber: ThrobberState::default(),
            hint,
        }
    }

    /// Move focus, touching the field being left.
    fn focus_on(&mut self, focus: Focus) {
        if let Some(field) = self.focus.field() {
            self.form.touch(field);
        }
        self.focus = focus;
    }

    fn input_mut(&mut self, field: Field) -> &mut Input {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    /// Apply an edit to the focused field and mirror it into the form.
    fn edit(&mut self, field: Field, request: InputRequest) {
        let input = self.input_mut(field);
        if input.handle(request).is_some() {
            let value = input.value().to_owned();
            self.form.set(field, value);
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.state.loading() || self.state.disabled() {
            return None;
        }
        self.focus_on(self.focus);
        self.form.submit().map(Action::SubmitLogin)
    }

    // ── Rendering helpers ───────────────────────────────────────────

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: Field,
        markers: &mut Vec<Marker>,
    ) {
        let (element, label, placeholder, input) = match field {
            Field::Email => (id::EMAIL_INPUT, "Email", "Digite seu email", &self.email),
            Field::Password => (id::PASSWORD_INPUT, "Senha", "Digite sua senha", &self.password),
        };
        let focused = self.focus.field() == Some(field);
        let error = self.form.error(field);

        let [label_area, box_area, error_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let label_style = if focused {
            Style::default().fg(theme::CYAN)
        } else {
            theme::text()
        };
        frame.render_widget(Paragraph::new(Span::styled(label, label_style)), label_area);
        markers.push(Marker::new(derived(element, Suffix::Label), label_area));

        let border = match (error.is_some(), focused) {
            (true, _) => theme::error(),
            (false, true) => theme::border_focused(),
            (false, false) => theme::border_default(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(box_area);
        frame.render_widget(block, box_area);
        markers.push(Marker::new(element, box_area));

        let width = usize::from(inner.width.max(1));
        let scroll = input.visual_scroll(width);
        let text = if input.value().is_empty() {
            Span::styled(placeholder, theme::muted())
        } else if field == Field::Password {
            Span::styled("•".repeat(input.value().chars().count()), theme::text())
        } else {
            Span::styled(input.value(), theme::text())
        };
        frame.render_widget(
            Paragraph::new(text).scroll((0, u16::try_from(scroll).unwrap_or(0))),
            inner,
        );
        if focused {
            let offset = input.visual_cursor().saturating_sub(scroll);
            let x = inner.x + u16::try_from(offset).unwrap_or(0).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }

        if let Some(error) = error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.to_string(), theme::error())),
                error_area,
            );
            markers.push(Marker::new(derived(element, Suffix::Error), error_area));
        }
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect, markers: &mut Vec<Marker>) {
        let focused = self.focus == Focus::Submit;
        let enabled = !self.state.loading() && !self.state.disabled();
        let style = if enabled {
            theme::button(focused)
        } else {
            theme::button_disabled()
        };

        frame.render_widget(Block::default().style(style), area);
        if self.state.loading() {
            let throbber = Throbber::default()
                .label("Entrar")
                .style(style)
                .throbber_style(style.fg(theme::CYAN));
            let at = crate::widgets::centered(area, 10, 1);
            frame.render_stateful_widget(throbber, at, &mut self.throbber.clone());
            markers.push(Marker::new(derived(id::SUBMIT_BUTTON, Suffix::Loader), at));
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled("Entrar", style)).alignment(Alignment::Center),
                area,
            );
        }
        markers.push(Marker::new(id::SUBMIT_BUTTON, area));
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_on(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus_on(self.focus.prev()),
            KeyCode::Enter => {
                if self.focus == Focus::Email {
                    self.focus_on(Focus::Password);
                } else {
                    return Ok(self.submit());
                }
            }
            code => {
                let Some(field) = self.focus.field() else {
                    return Ok(None);
                };
                let request = match code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        InputRequest::InsertChar(c)
                    }
                    KeyCode::Backspace => InputRequest::DeletePrevChar,
                    KeyCode::Delete => InputRequest::DeleteNextChar,
                    KeyCode::Left => InputRequest::GoToPrevChar,
                    KeyCode::Right => InputRequest::GoToNextChar,
                    KeyCode::Home => InputRequest::GoToStart,
                    KeyCode::End => InputRequest::GoToEnd,
                    _ => return Ok(None),
                };
                self.edit(field, request);
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LoginStateChanged(state) => self.state = *state,
            Action::Tick if self.state.loading() => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, markers: &mut Vec<Marker>) {
        frame.render_widget(Block::default().style(Style::default().bg(theme::BG_DARK)), area);
        markers.push(Marker::new(id::LOGIN_SCREEN, area));

        let panel = crate::widgets::centered(area, 56, 24);
        let [title, subtitle, _, form, blocked, _, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(13),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(panel);

        frame.render_widget(
            Paragraph::new(Span::styled("QAfeteria", theme::heading())).alignment(Alignment::Center),
            title,
        );
        markers.push(Marker::new(id::LOGIN_TITLE, title));
        frame.render_widget(
            Paragraph::new(Span::styled("Faça login para continuar", theme::text()))
                .alignment(Alignment::Center),
            subtitle,
        );
        markers.push(Marker::new(id::LOGIN_SUBTITLE, subtitle));

        let [email, password, _, submit] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(form);
        self.render_field(frame, email, Field::Email, markers);
        self.render_field(frame, password, Field::Password, markers);
        self.render_submit(frame, submit, markers);
        markers.push(Marker::new(id::LOGIN_FORM, form));

        if self.state.disabled() {
            frame.render_widget(
                Paragraph::new(Span::styled(messages::LOCKED_NOTICE, theme::error()))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                blocked,
            );
            markers.push(Marker::new(id::LOGIN_BLOCKED_MESSAGE, blocked));
        }

        frame.render_widget(
            Paragraph::new(Span::styled(self.hint.as_str(), theme::muted())).alignment(Alignment::Center),
            hint,
        );
        markers.push(Marker::new(id::LOGIN_CREDENTIALS_HINT, hint));
    }

    fn id(&self) -> &'static str {
        id::LOGIN_SCREEN
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::widgets::testing::screen_text;
    use pretty_assertions::assert_eq;
    use qafeteria_core::{AttemptState, LoginPhase};
    use ratatui::{Terminal, backend::TestBackend};
    use secrecy::ExposeSecret;

    fn screen() -> LoginScreen {
        LoginScreen::new(LoginState::default(), "Dica: vitor@app.com / vitor123".into())
    }

    fn press(screen: &mut LoginScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn draw(screen: &LoginScreen) -> (String, Vec<Marker>) {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut markers = Vec::new();
        terminal
            .draw(|frame| screen.render(frame, frame.area(), &mut markers))
            .unwrap();
        (screen_text(&terminal), markers)
    }

    #[test]
    fn typing_then_enter_submits_credentials() {
        let mut screen = screen();
        type_text(&mut screen, "vitor@app.com");
        assert!(press(&mut screen, KeyCode::Enter).is_none());
        type_text(&mut screen, "vitor123");

        let Some(Action::SubmitLogin(credentials)) = press(&mut screen, KeyCode::Enter) else {
            panic!("expected a submission");
        };
        assert_eq!(credentials.email, "vitor@app.com");
        assert_eq!(credentials.password.expose_secret(), "vitor123");
    }

    #[test]
    fn padded_email_is_rejected_before_submit() {
        let mut screen = screen();
        type_text(&mut screen, " vitor@app.com ");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "vitor123");
        assert!(press(&mut screen, KeyCode::Enter).is_none());

        let (text, _) = draw(&screen);
        assert!(text.contains("Email inválido"));
    }

    #[test]
    fn invalid_form_does_not_submit_and_shows_errors() {
        let mut screen = screen();
        type_text(&mut screen, "vitor");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "123");
        assert!(press(&mut screen, KeyCode::Enter).is_none());

        let (text, markers) = draw(&screen);
        assert!(text.contains("Email inválido"));
        assert!(text.contains("Senha deve ter pelo menos 6 caracteres"));
        assert!(markers.iter().any(|m| m.id == "login-form-email-input-error"));
        assert!(markers.iter().any(|m| m.id == "login-form-password-input-error"));
    }

    #[test]
    fn errors_wait_for_blur() {
        let mut screen = screen();
        type_text(&mut screen, "vitor");
        let (text, _) = draw(&screen);
        assert!(!text.contains("Email inválido"));

        press(&mut screen, KeyCode::Tab);
        let (text, _) = draw(&screen);
        assert!(text.contains("Email inválido"));
    }

    #[test]
    fn editing_keys_move_within_the_field() {
        let mut screen = screen();
        type_text(&mut screen, "vitr@app.com");
        for _ in 0..9 {
            press(&mut screen, KeyCode::Left);
        }
        press(&mut screen, KeyCode::Char('o'));
        press(&mut screen, KeyCode::End);
        press(&mut screen, KeyCode::Backspace);
        assert_eq!(screen.form.email(), "vitor@app.co");
    }

    #[test]
    fn password_is_masked() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "segredo9");
        let (text, _) = draw(&screen);
        assert!(text.contains("••••••••"));
        assert!(!text.contains("segredo9"));
    }

    #[test]
    fn loading_blocks_submit_and_shows_loader() {
        let mut screen = screen();
        type_text(&mut screen, "vitor@app.com");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "vitor123");
        screen
            .update(&Action::LoginStateChanged(LoginState {
                phase: LoginPhase::Validating,
                ..LoginState::default()
            }))
            .unwrap();

        assert!(press(&mut screen, KeyCode::Enter).is_none());
        let (_, markers) = draw(&screen);
        assert!(markers.iter().any(|m| m.id == "login-form-submit-button-loader"));
    }

    #[test]
    fn locked_state_shows_notice_and_blocks_submit() {
        let mut screen = screen();
        type_text(&mut screen, "vitor@app.com");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "vitor123");
        screen
            .update(&Action::LoginStateChanged(LoginState {
                phase: LoginPhase::Locked,
                attempts: AttemptState {
                    count: 3,
                    locked: true,
                },
                max_attempts: 3,
            }))
            .unwrap();

        assert!(press(&mut screen, KeyCode::Enter).is_none());
        let (text, markers) = draw(&screen);
        assert!(text.contains("Conta temporariamente bloqueada"));
        assert!(markers.iter().any(|m| m.id == id::LOGIN_BLOCKED_MESSAGE));
    }

    #[test]
    fn renders_every_static_element() {
        let (text, markers) = draw(&screen());
        assert!(text.contains("QAfeteria"));
        assert!(text.contains("Faça login para continuar"));
        assert!(text.contains("Dica: vitor@app.com / vitor123"));
        for element in [
            id::LOGIN_SCREEN,
            id::LOGIN_TITLE,
            id::LOGIN_SUBTITLE,
            id::LOGIN_FORM,
            id::EMAIL_INPUT,
            id::PASSWORD_INPUT,
            id::SUBMIT_BUTTON,
            id::LOGIN_CREDENTIALS_HINT,
        ] {
            assert!(markers.iter().any(|m| m.id == element), "missing {element}");
        }
    }
}
