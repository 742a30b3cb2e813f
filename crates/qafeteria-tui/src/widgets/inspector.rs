//! Element inspector overlay.
//!
//! Screens record a [`Marker`] for every identified element they draw. The
//! overlay tags each marker with its identifier and lists the route's
//! catalogue, flagging which entries are currently on screen.

use qafeteria_core::Route;
use qafeteria_core::elements::{self, Element};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::theme;

/// Where an identified element was drawn in the last frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub id: String,
    pub area: Rect,
}

impl Marker {
    pub fn new(id: impl Into<String>, area: Rect) -> Self {
        Self {
            id: id.into(),
            area,
        }
    }
}

const PANEL_WIDTH: u16 = 52;

pub fn render(frame: &mut Frame, area: Rect, route: Route, markers: &[Marker]) {
    for marker in markers {
        tag(frame, area, marker);
    }
    panel(frame, area, route, markers);
}

/// Identifier label at the top-left corner of the element.
fn tag(frame: &mut Frame, area: Rect, marker: &Marker) {
    let label = format!("#{}", marker.id);
    let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
    let at = Rect::new(marker.area.x, marker.area.y, width, 1).intersection(area);
    if at.is_empty() {
        return;
    }
    frame.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default().fg(theme::BG_DARK).bg(theme::YELLOW),
        )),
        at,
    );
}

fn panel(frame: &mut Frame, area: Rect, route: Route, markers: &[Marker]) {
    let width = PANEL_WIDTH.min(area.width);
    let panel = Rect::new(area.right() - width, area.y, width, area.height);

    frame.render_widget(Clear, panel);
    let block = Block::default()
        .title(format!(" Elements · {route} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let lines: Vec<Line> = elements::for_route(route)
        .map(|element| entry(element, markers.iter().any(|m| m.id == element.id)))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn entry(element: &Element, shown: bool) -> Line<'static> {
    let (bullet, id_style) = if shown {
        ("● ", Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD))
    } else {
        ("○ ", theme::muted())
    };
    let mut spans = vec![
        Span::styled(bullet, id_style),
        Span::styled(element.id, id_style),
        Span::styled(format!(" {}", element.role), theme::key_hint()),
    ];
    if let Some(label) = element.label {
        spans.push(Span::styled(format!(" \"{label}\""), theme::text()));
    }
    Line::from(spans)
}
