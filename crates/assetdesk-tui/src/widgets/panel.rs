//! Small rendering helpers shared by the screens: hint lines, detail rows,
//! and the loading / error placeholders shown while a view has no data.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::theme;

/// `key action` pairs rendered as one hint line.
pub fn hints(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (key, action) in pairs {
        spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
        spans.push(Span::styled(format!("{action} "), theme::key_hint()));
    }
    Line::from(spans)
}

pub fn section(title: &str) -> [Line<'static>; 2] {
    [
        Line::from(Span::styled(format!(" {title}"), theme::section_title())),
        Line::from(Span::styled(
            " ─────────────────────────────────────────",
            theme::muted(),
        )),
    ]
}

pub fn detail_row(label: &str, value: impl Into<String>) -> Line<'static> {
    detail_row_styled(label, value, theme::value())
}

pub fn detail_row_styled(label: &str, value: impl Into<String>, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<16}"), theme::label()),
        Span::styled(value.into(), style),
    ])
}

/// `"—"` for blank optional text.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => "—".into(),
    }
}

/// Rectangle of at most `width` x `height` centred in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render_loading(frame: &mut Frame, area: Rect, state: &ThrobberState, what: &str) {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let label = format!("Loading {what}…");
    let width = u16::try_from(label.chars().count() + 2).unwrap_or(u16::MAX);
    let throbber = Throbber::default()
        .label(label)
        .style(theme::label())
        .throbber_style(theme::title_style());
    let row = centered(row, width, 1);
    frame.render_stateful_widget(throbber, row, &mut state.clone());
}

/// Load failure: the message and nothing else.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let mut lines = vec![
        Line::from(Span::styled("Failed to load", theme::error_text())),
        Line::from(""),
    ];
    lines.extend(
        message
            .lines()
            .map(|line| Line::from(Span::styled(line.to_owned(), theme::label()))),
    );
    lines.push(Line::from(""));
    lines.push(hints(&[("r", "retry")]).alignment(Alignment::Center));
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body,
    );
}
