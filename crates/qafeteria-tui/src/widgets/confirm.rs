//! Modal confirmation dialog.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::action::ConfirmAction;
use crate::theme;

pub fn render(frame: &mut Frame, area: Rect, confirm: ConfirmAction) {
    let dialog = super::centered(area, 46, 7);
    let (cancel, accept) = confirm.buttons();

    frame.render_widget(Clear, dialog);
    let block = Block::default()
        .title(format!(" {} ", confirm.title()))
        .title_style(theme::title_style())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::YELLOW))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let [body, _, buttons, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(confirm.to_string(), theme::text())).alignment(Alignment::Center),
        body,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {cancel} "), theme::button(false)),
            Span::raw("   "),
            Span::styled(format!(" {accept} "), Style::default().fg(theme::BG_DARK).bg(theme::RED)),
        ]))
        .alignment(Alignment::Center),
        buttons,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled(cancel.to_lowercase(), theme::key_hint()),
            Span::styled("   Enter ", theme::key_hint_key()),
            Span::styled(accept.to_lowercase(), theme::key_hint()),
        ]))
        .alignment(Alignment::Center),
        hints,
    );
}
