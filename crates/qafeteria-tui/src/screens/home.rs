//! Home screen: welcome block, quick actions, account section and logout.

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use qafeteria_core::elements::{Suffix, derived, id};
use qafeteria_core::model::format_timestamp;
use qafeteria_core::{SessionPhase, User, messages};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::inspector::Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Profile,
    Settings,
    Logout,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Profile => Self::Settings,
            Self::Settings => Self::Logout,
            Self::Logout => Self::Profile,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Profile => Self::Logout,
            Self::Settings => Self::Profile,
            Self::Logout => Self::Settings,
        }
    }
}

pub struct HomeScreen {
    user: User,
    greeting: String,
    focus: Focus,
    phase: SessionPhase,
    throbber: ThrobberState,
}

impl HomeScreen {
    /// `greeting` is the welcome line computed at mount time.
    pub fn new(user: User, greeting: String) -> Self {
        Self {
            user,
            greeting,
            focus: Focus::Profile,
            phase: SessionPhase::Authenticated,
            throbber: ThrobberState::default(),
        }
    }

    fn logging_out(&self) -> bool {
        self.phase == SessionPhase::LoggingOut
    }

    fn activate(&self, focus: Focus) -> Option<Action> {
        match focus {
            Focus::Profile => Some(Action::QuickAction(messages::QUICK_ACTION_PROFILE)),
            Focus::Settings => Some(Action::QuickAction(messages::QUICK_ACTION_SETTINGS)),
            Focus::Logout if self.logging_out() => None,
            Focus::Logout => Some(Action::ShowConfirm(ConfirmAction::Logout)),
        }
    }

    // ── Rendering helpers ───────────────────────────────────────────

    fn render_welcome(&self, frame: &mut Frame, area: Rect, markers: &mut Vec<Marker>) {
        let mut rows = vec![
            (
                Suffix::Greeting,
                Line::from(Span::styled(self.greeting.as_str(), theme::heading())),
            ),
            (
                Suffix::Subtitle,
                Line::from(Span::styled("Bem-vindo de volta!", theme::text())),
            ),
        ];
        if let Some(at) = self.user.last_login_at {
            let stamp = format_timestamp(&at.with_timezone(&Local));
            rows.push((
                Suffix::LastLogin,
                Line::from(Span::styled(format!("Último acesso: {stamp}"), theme::muted())),
            ));
        }
        if self.user.is_admin() {
            rows.push((
                Suffix::AdminBadge,
                Line::from(Span::styled(
                    " Admin ",
                    Style::default()
                        .fg(theme::BG_DARK)
                        .bg(theme::YELLOW)
                        .add_modifier(Modifier::BOLD),
                )),
            ));
        }

        for ((suffix, line), y) in rows.into_iter().zip(area.y..area.bottom()) {
            let row = Rect::new(area.x, y, area.width, 1);
            frame.render_widget(Paragraph::new(line), row);
            markers.push(Marker::new(derived(id::WELCOME_MESSAGE, suffix), row));
        }
        markers.push(Marker::new(id::WELCOME_MESSAGE, area));
    }

    fn render_quick_actions(&self, frame: &mut Frame, area: Rect, markers: &mut Vec<Marker>) {
        let [title, _, buttons] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(Span::styled("Ações Rápidas", theme::title_style())), title);
        markers.push(Marker::new(id::QUICK_ACTIONS_TITLE, title));

        let [profile, _, settings] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(buttons);
        for (focus, label, element, at) in [
            (Focus::Profile, messages::QUICK_ACTION_PROFILE, id::PROFILE_BUTTON, profile),
            (Focus::Settings, messages::QUICK_ACTION_SETTINGS, id::SETTINGS_BUTTON, settings),
        ] {
            let style = theme::button(self.focus == focus);
            frame.render_widget(
                Paragraph::new(Span::styled(label, style))
                    .alignment(Alignment::Center)
                    .style(style),
                at,
            );
            markers.push(Marker::new(element, at));
        }
    }

    fn render_account(&self, frame: &mut Frame, area: Rect, markers: &mut Vec<Marker>) {
        let [title, _, email, role] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(Span::styled("Conta", theme::title_style())), title);
        markers.push(Marker::new(id::ACCOUNT_SECTION_TITLE, title));

        for (label, value, element, at) in [
            ("Email: ", self.user.email.as_str(), id::USER_EMAIL, email),
            ("Tipo:  ", self.user.role.label(), id::USER_ROLE, role),
        ] {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(label, theme::muted()),
                    Span::styled(value, theme::text()),
                ])),
                at,
            );
            markers.push(Marker::new(element, at));
        }
    }

    fn render_logout(&self, frame: &mut Frame, area: Rect, markers: &mut Vec<Marker>) {
        let style = if self.logging_out() {
            theme::button_disabled()
        } else if self.focus == Focus::Logout {
            Style::default()
                .fg(theme::BG_DARK)
                .bg(theme::RED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::RED).bg(theme::BG_HIGHLIGHT)
        };

        frame.render_widget(Block::default().style(style), area);
        if self.logging_out() {
            let throbber = Throbber::default()
                .label("Sair")
                .style(style)
                .throbber_style(style.fg(theme::CYAN));
            let at = crate::widgets::centered(area, 8, 1);
            frame.render_stateful_widget(throbber, at, &mut self.throbber.clone());
            markers.push(Marker::new(derived(id::LOGOUT_BUTTON, Suffix::Loader), at));
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(messages::LOGOUT_CONFIRM_ACCEPT, style))
                    .alignment(Alignment::Center),
                area,
            );
        }
        markers.push(Marker::new(id::LOGOUT_BUTTON, area));
    }
}

impl Component for HomeScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focus),
            KeyCode::Char('p') => self.activate(Focus::Profile),
            KeyCode::Char('c') => self.activate(Focus::Settings),
            KeyCode::Char('s') => self.activate(Focus::Logout),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PhaseChanged(phase) => self.phase = *phase,
            Action::Tick if self.logging_out() => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, markers: &mut Vec<Marker>) {
        frame.render_widget(Block::default().style(Style::default().bg(theme::BG_DARK)), area);
        markers.push(Marker::new(id::HOME_SCREEN, area));

        let panel = crate::widgets::centered(area, 64, 20);
        let [welcome, _, actions, _, account, _, logout] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(panel);

        self.render_welcome(frame, welcome, markers);
        self.render_quick_actions(frame, actions, markers);
        self.render_account(frame, account, markers);
        self.render_logout(frame, logout, markers);
    }

    fn id(&self) -> &'static str {
        id::HOME_SCREEN
    }
}
