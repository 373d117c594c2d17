//! Dashboard screen: headline counts, the asset mix, shortcuts and recent
//! additions.
//!
//! Layout:
//! ┌─ Customers ─┐┌─ Sites ─┐┌─ VMs ─┐┌─ Switches ─┐┌─ Firewalls ─┐
//! ├─ Asset Breakdown ────────────────┐┌─ Quick Actions ──────────────┤
//! ├─ Recent Activity ────────────────────────────────────────────────┤
//! └──────────────────────────────────────────────────────────────────┘

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::ThrobberState;

use assetdesk_core::DashboardData;
use assetdesk_core::dashboard::{ActivityKind, QUICK_ACTIONS};

use crate::action::{Action, ViewData};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::panel;

/// Stat cards in display order and the view each one opens.
const CARDS: [(&str, ScreenId); 5] = [
    ("Customers", ScreenId::Customers),
    ("Sites", ScreenId::Sites),
    ("Virtual Machines", ScreenId::VirtualMachines),
    ("Switches", ScreenId::Switches),
    ("Firewalls", ScreenId::Firewalls),
];

/// Cards first, then quick actions.
const TARGETS: usize = CARDS.len() + QUICK_ACTIONS.len();

enum LoadState {
    Loading,
    Failed(String),
    Ready(DashboardData),
}

pub struct DashboardScreen {
    focused: bool,
    load: LoadState,
    /// Highlighted card or quick action.
    selected: usize,
    throbber_state: ThrobberState,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            load: LoadState::Loading,
            selected: 0,
            throbber_state: ThrobberState::default(),
        }
    }

    fn activate(&self) -> Option<Action> {
        if let Some((_, id)) = CARDS.get(self.selected) {
            return Some(Action::SwitchScreen(*id));
        }
        let quick = QUICK_ACTIONS.get(self.selected - CARDS.len())?;
        Some(Action::SwitchAndCreate(ScreenId::from_key(quick.view)))
    }

    fn counts(data: &DashboardData) -> [usize; 5] {
        let stats = data.stats;
        [
            stats.customers,
            stats.sites,
            stats.vms,
            stats.switches,
            stats.firewalls,
        ]
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, data: &DashboardData) {
        let areas = Layout::horizontal([Constraint::Fill(1); 5]).split(area);
        for (idx, ((label, _), count)) in CARDS.iter().zip(Self::counts(data)).enumerate() {
            let Some(&card) = areas.get(idx) else {
                continue;
            };
            let selected = self.focused && idx == self.selected;
            let block = Block::default()
                .title(Span::styled(format!(" {label} "), theme::label()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border(selected));
            let value = Paragraph::new(vec![
                Line::from(Span::styled(
                    count.to_string(),
                    Style::default()
                        .fg(theme::NEON_CYAN)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled("Enter to open", theme::muted())),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(value, card);
        }
    }

    fn render_breakdown(frame: &mut Frame, area: Rect, data: &DashboardData) {
        let block = Block::default()
            .title(Span::styled(" Asset Breakdown ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let breakdown = data.stats.breakdown();
        let stats = data.stats;
        let bar_width = inner.width.saturating_sub(28).clamp(6, 40);
        let rows = [
            ("VMs", stats.vms, breakdown.vms),
            ("Switches", stats.switches, breakdown.switches),
            ("Firewalls", stats.firewalls, breakdown.firewalls),
        ];
        let mut lines = vec![Line::from("")];
        for ((label, count, share), color) in rows.into_iter().zip(theme::ASSET_COLORS) {
            lines.push(share_line(label, count, share, bar_width, color));
        }
        if stats.vms + stats.switches + stats.firewalls == 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" No assets yet", theme::muted())));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_quick_actions(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Quick Actions ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];
        for (idx, quick) in QUICK_ACTIONS.iter().enumerate() {
            let selected = self.focused && self.selected == CARDS.len() + idx;
            let (marker, style) = if selected {
                ("▸ ", theme::table_selected())
            } else {
                ("  ", theme::table_row())
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {marker}"), style),
                Span::styled("+ ", Style::default().fg(theme::SUCCESS_GREEN)),
                Span::styled(quick.label, style),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_recent(frame: &mut Frame, area: Rect, data: &DashboardData) {
        let block = Block::default()
            .title(Span::styled(" Recent Activity ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if data.recent.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(" No recent activity", theme::muted())),
                inner,
            );
            return;
        }

        let now = Utc::now().naive_utc();
        let lines: Vec<Line> = data
            .recent
            .iter()
            .take(usize::from(inner.height))
            .map(|item| {
                let (icon, color) = match item.kind {
                    ActivityKind::Vm => ("◆", theme::ELECTRIC_PURPLE),
                    ActivityKind::Network => ("◈", theme::NEON_CYAN),
                    ActivityKind::Site => ("●", theme::CORAL),
                };
                Line::from(vec![
                    Span::styled(format!(" {icon} "), Style::default().fg(color)),
                    Span::styled(
                        format!("{:<28}", item.name),
                        Style::default().fg(theme::NEON_CYAN),
                    ),
                    Span::styled(format!("{:<28}", item.description), theme::label()),
                    Span::styled(item.age(now), theme::muted()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// `" VMs        ████░░░░  3  42%"`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn share_line(label: &str, count: usize, share: f64, width: u16, color: Color) -> Line<'static> {
    let share = share.clamp(0.0, 1.0);
    let filled = (share * f64::from(width)).round() as u16;
    let empty = width.saturating_sub(filled);
    Line::from(vec![
        Span::styled(format!(" {label:<10}"), theme::label()),
        Span::styled("█".repeat(usize::from(filled)), Style::default().fg(color)),
        Span::styled("░".repeat(usize::from(empty)), theme::muted()),
        Span::styled(format!(" {count:>4}"), theme::value()),
        Span::styled(format!(" {:>3.0}%", share * 100.0), theme::label()),
    ])
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') => return Ok(Some(Action::Reload)),
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j') => {
                self.selected = (self.selected + 1).min(TARGETS - 1);
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter if matches!(self.load, LoadState::Ready(_)) => {
                return Ok(self.activate());
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if matches!(self.load, LoadState::Loading) => {
                self.throbber_state.calc_next();
            }
            Action::LoadStarted(_) => self.load = LoadState::Loading,
            Action::Loaded(_, data) => {
                if let ViewData::Dashboard(data) = data.as_ref() {
                    self.load = LoadState::Ready(data.clone());
                }
            }
            Action::LoadFailed(_, message) => self.load = LoadState::Failed(message.clone()),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Dashboard ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let data = match &self.load {
            LoadState::Loading => {
                panel::render_loading(frame, inner, &self.throbber_state, "dashboard");
                return;
            }
            LoadState::Failed(message) => {
                panel::render_error(frame, inner, message);
                return;
            }
            LoadState::Ready(data) => data,
        };

        let [cards, middle, recent, hints] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(inner);
        let [breakdown, quick] =
            Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(middle);

        self.render_cards(frame, cards, data);
        Self::render_breakdown(frame, breakdown, data);
        self.render_quick_actions(frame, quick);
        Self::render_recent(frame, recent, data);
        frame.render_widget(
            Paragraph::new(panel::hints(&[
                ("←/→", "select"),
                ("Enter", "open"),
                ("r", "reload"),
            ])),
            hints,
        );
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> ScreenId {
        ScreenId::Dashboard
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use assetdesk_core::dashboard::{ActivityItem, DashboardStats};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
    }

    fn data() -> DashboardData {
        DashboardData {
            stats: DashboardStats {
                customers: 2,
                sites: 3,
                vms: 6,
                switches: 3,
                firewalls: 1,
            },
            recent: vec![ActivityItem {
                kind: ActivityKind::Vm,
                name: "prod-web-01".into(),
                description: "New virtual machine added",
                added: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            }],
        }
    }

    fn loaded() -> DashboardScreen {
        let mut screen = DashboardScreen::new();
        screen
            .update(&Action::Loaded(
                ScreenId::Dashboard,
                Box::new(ViewData::Dashboard(data())),
            ))
            .unwrap();
        screen
    }

    #[test]
    fn cards_open_their_view() {
        let mut screen = loaded();
        screen.handle_key_event(press(KeyCode::Right)).unwrap();
        let action = screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::SwitchScreen(ScreenId::Sites))));
    }

    #[test]
    fn quick_actions_open_the_create_form() {
        let mut screen = loaded();
        for _ in 0..CARDS.len() + 2 {
            screen.handle_key_event(press(KeyCode::Down)).unwrap();
        }
        let action = screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        assert!(matches!(
            action,
            Some(Action::SwitchAndCreate(ScreenId::VirtualMachines))
        ));

        for _ in 0..10 {
            screen.handle_key_event(press(KeyCode::Down)).unwrap();
        }
        assert_eq!(screen.selected, TARGETS - 1);
        let action = screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        assert!(matches!(
            action,
            Some(Action::SwitchAndCreate(ScreenId::Switches))
        ));
    }

    #[test]
    fn enter_does_nothing_until_loaded() {
        let mut screen = DashboardScreen::new();
        assert!(screen.handle_key_event(press(KeyCode::Enter)).unwrap().is_none());
    }

    #[test]
    fn share_bar_fills_proportionally() {
        let line = share_line("VMs", 6, 0.6, 10, theme::ELECTRIC_PURPLE);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, " VMs       ██████░░░░    6  60%");
    }

    #[test]
    fn renders_counts_and_recent_items() {
        let mut screen = loaded();
        screen.set_focused(true);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| screen.render(frame, frame.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Asset Breakdown"));
        assert!(text.contains("Add Network Device"));
        assert!(text.contains("prod-web-01"));
        assert!(text.contains("days ago"));
    }

    #[test]
    fn load_failure_shows_message() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&Action::LoadFailed(
                ScreenId::Dashboard,
                "connection refused".into(),
            ))
            .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| screen.render(frame, frame.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Failed to load"));
        assert!(text.contains("connection refused"));
    }
}
