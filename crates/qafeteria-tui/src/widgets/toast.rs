//! Toast drawn at the top of the screen while a notification is visible.

use qafeteria_core::NotificationState;
use qafeteria_core::elements::{Suffix, derived};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::theme;
use crate::widgets::inspector::Marker;

const MIN_WIDTH: u16 = 24;
const MAX_WIDTH: u16 = 72;

/// Render `state` under element `element`. Nothing is drawn when hidden.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    element: &'static str,
    state: &NotificationState,
    markers: &mut Vec<Marker>,
) {
    if !state.visible || area.height < 3 {
        return;
    }

    let text_width = u16::try_from(state.message.chars().count()).unwrap_or(MAX_WIDTH);
    let width = text_width
        .saturating_add(6)
        .clamp(MIN_WIDTH, MAX_WIDTH)
        .min(area.width);
    let inner_width = width.saturating_sub(5).max(1);
    let lines = text_width.div_ceil(inner_width).max(1);
    let height = (lines + 2).min(area.height);

    let toast_area = Rect::new(area.x + (area.width - width) / 2, area.y + 1, width, height)
        .intersection(area);

    let (color, icon) = theme::notification(state.level);

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(state.message.as_str(), theme::text()),
    ]);
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);

    markers.push(Marker::new(element, toast_area));
    markers.push(Marker::new(derived(element, Suffix::Text), inner));
}
