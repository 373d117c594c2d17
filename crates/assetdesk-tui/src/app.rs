//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use assetdesk_core::{Command, CoreError, Inventory};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel, ViewData};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::{NavEntry, ScreenId, Sidebar};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::panel;

const SIDEBAR_WIDTH: u16 = 26;
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Which half of the layout receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Content,
}

/// Startup choices resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub start_view: ScreenId,
    pub sidebar_open: bool,
    pub tick_rate: Duration,
}

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    sidebar: Sidebar,
    focus: Focus,
    help_visible: bool,
    search_active: bool,
    search_query: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    inventory: Inventory,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    tick_rate: Duration,
}

impl App {
    pub fn new(inventory: Inventory, options: AppOptions) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> = create_screens()
            .into_iter()
            .map(|screen| (screen.id(), screen))
            .collect();

        let mut sidebar = Sidebar::new(options.sidebar_open);
        sidebar.reveal(options.start_view);

        Self {
            active_screen: options.start_view,
            screens,
            running: true,
            sidebar,
            focus: Focus::Content,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            inventory,
            pending_confirm: None,
            notification: None,
            tick_rate: options.tick_rate,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;
        self.load(self.active_screen)?;

        let mut events = EventReader::new(
            self.tick_rate,
            Duration::from_millis(33), // ~30 FPS render
        );

        info!(
            api = %self.inventory.config().base_url,
            screen = %self.active_screen,
            "TUI event loop started"
        );

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
                Event::Resize(cols, rows) => {
                    debug!(cols, rows, "terminal resized");
                    self.action_tx.send(Action::Render)?;
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────

    /// Map a key event to an action. Overlays take keys first, then the
    /// global bindings, then the sidebar or the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl_c = key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c');

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if ctrl_c {
            return Ok(Some(Action::Quit));
        }

        // Open forms and detail panels capture everything else
        if self.active().is_some_and(|screen| screen.captures_input()) {
            return self.forward_key(key);
        }

        if self.search_active {
            return Ok(match key.code {
                KeyCode::Esc => {
                    self.search_query.clear();
                    Some(Action::CloseSearch)
                }
                KeyCode::Enter => Some(Action::SearchSubmit),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?' | 'q') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('/'))
                if self.active_screen != ScreenId::Dashboard =>
            {
                return Ok(Some(Action::OpenSearch));
            }
            (KeyModifiers::NONE, KeyCode::Char('b')) => return Ok(Some(Action::ToggleSidebar)),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::ToggleFocus));
            }
            _ => {}
        }

        if self.focus == Focus::Sidebar {
            return Ok(self.handle_sidebar_key(key));
        }

        self.forward_key(key)
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.sidebar.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.sidebar.move_cursor(-1),
            KeyCode::Char('g') | KeyCode::Home => self.sidebar.move_cursor(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.sidebar.move_cursor(isize::MAX),
            KeyCode::Enter | KeyCode::Char(' ' | 'l') | KeyCode::Right => {
                return self.sidebar.activate().map(Action::SwitchScreen);
            }
            KeyCode::Esc => return Some(Action::ToggleFocus),
            _ => {}
        }
        None
    }

    fn forward_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn active(&self) -> Option<&dyn Component> {
        self.screens.get(&self.active_screen).map(Box::as_ref)
    }

    // ── Dispatch ──────────────────────────────────────────────────────

    /// Hand `action` to one screen and queue whatever it answers with.
    fn deliver(&mut self, id: ScreenId, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        // Load and command results belong to the screen that asked for them
        if let Some(target) = action.target() {
            return self.deliver(target, action);
        }

        match action {
            Action::Quit => self.running = false,

            Action::Render => {}

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                self.deliver(self.active_screen, action)?;
            }

            Action::SwitchScreen(target) => self.switch_to(*target)?,

            Action::SwitchAndCreate(target) => {
                self.switch_to(*target)?;
                self.action_tx.send(Action::OpenCreate)?;
            }

            Action::ToggleSidebar => {
                self.sidebar.toggle();
                if !self.sidebar.is_open() {
                    self.set_focus(Focus::Content);
                }
            }

            Action::ToggleFocus => {
                let next = match self.focus {
                    Focus::Content if self.sidebar.is_open() => Focus::Sidebar,
                    _ => Focus::Content,
                };
                self.set_focus(next);
            }

            Action::Reload => self.load(self.active_screen)?,

            Action::OpenCreate | Action::SearchInput(_) => {
                self.deliver(self.active_screen, action)?;
            }

            Action::Execute { origin, command } => self.execute(*origin, command.clone()),

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.action_tx.send(Action::Execute {
                        origin: confirm.origin,
                        command: confirm.command,
                    })?;
                }
            }

            Action::ConfirmNo => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.deliver(confirm.origin, action)?;
                }
            }

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.deliver(self.active_screen, action)?;
            }

            // The filter stays applied; only the input bar closes
            Action::SearchSubmit => self.search_active = false,

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::LoadStarted(_)
            | Action::Loaded(..)
            | Action::LoadFailed(..)
            | Action::CommandDone { .. }
            | Action::CommandFailed { .. } => {}
        }
        Ok(())
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if focus == Focus::Sidebar {
            self.sidebar.reveal(self.active_screen);
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(focus == Focus::Content);
        }
    }

    /// Activate `target` and fetch its data. Re-selecting the current
    /// screen reloads it.
    fn switch_to(&mut self, target: ScreenId) -> Result<()> {
        if target != self.active_screen {
            debug!("switching screen: {} → {}", self.active_screen, target);
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                screen.set_focused(false);
            }
            self.active_screen = target;
        }
        self.search_active = false;
        self.search_query.clear();
        self.sidebar.reveal(target);
        self.set_focus(Focus::Content);
        self.load(target)
    }

    // ── Background work ───────────────────────────────────────────────

    /// Start a fresh load for `id`. The result is routed back to that screen.
    fn load(&self, id: ScreenId) -> Result<()> {
        self.action_tx.send(Action::LoadStarted(id))?;

        let inventory = self.inventory.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match fetch_view(&inventory, id).await {
                Ok(data) => Action::Loaded(id, Box::new(data)),
                Err(e) => {
                    warn!(
                        screen = %id,
                        error = %e,
                        transient = e.is_transient(),
                        "view load failed"
                    );
                    Action::LoadFailed(id, load_failure_message(&e))
                }
            };
            let _ = tx.send(action);
        });
        Ok(())
    }

    /// Run a mutation in the background, then report back to `origin` and
    /// raise a toast either way.
    fn execute(&self, origin: ScreenId, command: Command) {
        let inventory = self.inventory.clone();
        let tx = self.action_tx.clone();
        let label = format!("{} {}", command.kind(), command.verb());

        tokio::spawn(async move {
            match inventory.execute(command).await {
                Ok(result) => {
                    let _ = tx.send(Action::CommandDone {
                        origin,
                        result: Box::new(result),
                    });
                    let _ = tx.send(Action::Notify(Notification::success(label)));
                }
                Err(e) => {
                    warn!(screen = %origin, error = %e, "command failed");
                    let message = e.to_string();
                    let _ = tx.send(Action::CommandFailed {
                        origin,
                        message: message.clone(),
                    });
                    let _ = tx.send(Action::Notify(Notification::error(message)));
                }
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [body, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        let content = if self.sidebar.is_open() {
            let [nav, content] =
                Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                    .areas(body);
            self.render_sidebar(frame, nav);
            content
        } else {
            body
        };

        if let Some(screen) = self.active() {
            screen.render(frame, content);
        }

        self.render_status_bar(frame, status);

        // Overlays on top (last = topmost)
        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
        if let Some(confirm) = &self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Sidebar;
        let block = Block::default()
            .title(" Asset Manager ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .sidebar
            .entries()
            .into_iter()
            .enumerate()
            .map(|(row, entry)| {
                let line = match entry {
                    NavEntry::Section { section, expanded } => {
                        let arrow = if expanded { "▾" } else { "▸" };
                        Line::from(Span::styled(
                            format!(" {arrow} {}", section.label()),
                            theme::nav_section(),
                        ))
                    }
                    NavEntry::Screen { id, nested } => {
                        let indent = if nested { "    " } else { " " };
                        let (marker, style) = if id == self.active_screen {
                            ("● ", theme::nav_active())
                        } else {
                            ("  ", theme::nav_inactive())
                        };
                        Line::from(Span::styled(format!("{indent}{marker}{}", id.label()), style))
                    }
                };
                if focused && row == self.sidebar.cursor() {
                    line.style(Style::default().bg(theme::BG_HIGHLIGHT))
                } else {
                    line
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::ELECTRIC_PURPLE)),
                Span::styled(&self.search_query, Style::default().fg(theme::NEON_CYAN)),
                Span::styled("█", Style::default().fg(theme::NEON_CYAN)),
                Span::styled("  Esc cancel  Enter keep filter", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let hints = panel::hints(&[
            ("?", "help"),
            ("/", "search"),
            ("b", "sidebar"),
            ("Tab", "focus"),
            ("q", "quit"),
        ]);
        frame.render_widget(Paragraph::new(hints), area);

        let api = Line::from(Span::styled(
            format!("{} ", self.inventory.config().base_url),
            theme::muted(),
        ));
        frame.render_widget(Paragraph::new(api).alignment(Alignment::Right), area);
    }
}

/// Error text for the load-failure panel. Failures that may clear on their
/// own say so.
fn load_failure_message(err: &CoreError) -> String {
    if err.is_transient() {
        format!("{err}\nThe backend may be temporarily unavailable.")
    } else {
        err.to_string()
    }
}

/// Run the loader that backs `id`.
async fn fetch_view(inventory: &Inventory, id: ScreenId) -> Result<ViewData, CoreError> {
    if let Some(kind) = id.device_kind() {
        return inventory
            .load_network_devices(kind)
            .await
            .map(ViewData::NetworkDevices);
    }
    if let Some(flavor) = id.flavor() {
        return inventory
            .load_typed_infrastructure(flavor)
            .await
            .map(ViewData::TypedInfrastructure);
    }
    match id {
        ScreenId::Customers => inventory.load_customers().await.map(ViewData::Customers),
        ScreenId::Sites => inventory.load_sites().await.map(ViewData::Sites),
        ScreenId::VirtualMachines => inventory
            .load_virtual_machines()
            .await
            .map(ViewData::VirtualMachines),
        ScreenId::Infrastructure => inventory
            .load_infrastructure()
            .await
            .map(ViewData::Infrastructure),
        _ => inventory.load_dashboard().await.map(ViewData::Dashboard),
    }
}

/// Dark backdrop plus a rounded border; returns the inner area.
fn overlay_frame(frame: &mut Frame, area: Rect, title: &str, border: Style) -> Rect {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        area,
    );
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    if !title.is_empty() {
        block = block.title(title.to_owned()).title_style(theme::title_style());
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog = panel::centered(area, 60, 7);
    let inner = overlay_frame(
        frame,
        dialog,
        " Confirm ",
        Style::default().fg(theme::ELECTRIC_YELLOW),
    );

    let [prompt, keys] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(
            confirm.to_string(),
            Style::default().fg(theme::DIM_WHITE),
        ))
        .wrap(Wrap { trim: true }),
        prompt.inner(Margin::new(1, 0)),
    );
    frame.render_widget(
        Paragraph::new(panel::hints(&[("y", "confirm"), ("n", "cancel")])),
        keys,
    );
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let message_width = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = message_width
        .saturating_add(6)
        .clamp(20, 60)
        .min(area.width);
    let height = 3u16.min(area.height);

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast = Rect::new(area.x + x, area.y + y, width, height);

    let (color, icon) = match notification.level {
        NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
        NotificationLevel::Error => (theme::ERROR_RED, "✗"),
        NotificationLevel::Info => (theme::NEON_CYAN, "·"),
    };

    let inner = overlay_frame(frame, toast, "", Style::default().fg(color));
    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(
            notification.message.clone(),
            Style::default().fg(theme::DIM_WHITE),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

const HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab", "Switch sidebar / content"),
            ("b", "Show / hide sidebar"),
            ("Enter", "Open view / toggle section"),
            ("j/k ↑/↓", "Move up / down"),
            ("g/G", "Top / bottom"),
            ("Ctrl+d/u", "Page down / up"),
            ("r", "Reload view"),
        ],
    ),
    (
        "Records",
        &[
            ("n", "Add record"),
            ("Enter", "View details"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("/", "Search"),
        ],
    ),
    (
        "Forms",
        &[
            ("Tab ↑/↓", "Next / previous field"),
            ("←/→", "Cycle options"),
            ("Space", "Toggle"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
    ),
];

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help = panel::centered(area, 56, 27);
    let inner = overlay_frame(frame, help, " Keyboard Shortcuts ", theme::border_focused());

    let mut lines = Vec::new();
    for (heading, keys) in HELP {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {heading}"),
            Style::default().fg(theme::NEON_CYAN),
        )));
        for (key, what) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(*what, theme::key_hint()),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled("Esc or ? to close  ", theme::key_hint()))
            .alignment(Alignment::Right),
    );

    frame.render_widget(Paragraph::new(lines), inner);
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;

    use assetdesk_core::ServiceConfig;

    use super::*;

    fn app(start_view: ScreenId) -> App {
        let inventory =
            Inventory::new(ServiceConfig::new("http://127.0.0.1:9".parse().unwrap())).unwrap();
        App::new(
            inventory,
            AppOptions {
                start_view,
                sidebar_open: true,
                tick_rate: Duration::from_millis(250),
            },
        )
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn queued(app: &mut App) -> Vec<Action> {
        std::iter::from_fn(|| app.action_rx.try_recv().ok()).collect()
    }

    fn delete_customer() -> ConfirmAction {
        ConfirmAction {
            origin: ScreenId::Customers,
            prompt: "Delete this customer?".into(),
            command: Command::DeleteCustomer { id: "c1".into() },
        }
    }

    #[test]
    fn confirm_dialog_captures_keys() {
        let mut app = app(ScreenId::Customers);
        app.process_action(&Action::ShowConfirm(delete_customer()))
            .unwrap();

        assert!(press(&mut app, KeyCode::Char('q')).is_none());
        assert!(matches!(
            press(&mut app, KeyCode::Char('y')),
            Some(Action::ConfirmYes)
        ));
        assert!(matches!(
            press(&mut app, KeyCode::Esc),
            Some(Action::ConfirmNo)
        ));
    }

    #[test]
    fn confirm_yes_executes_the_pending_command() {
        let mut app = app(ScreenId::Customers);
        app.process_action(&Action::ShowConfirm(delete_customer()))
            .unwrap();
        app.process_action(&Action::ConfirmYes).unwrap();

        assert!(app.pending_confirm.is_none());
        let actions = queued(&mut app);
        let [
            Action::Execute {
                origin: ScreenId::Customers,
                command: Command::DeleteCustomer { id },
            },
        ] = actions.as_slice()
        else {
            panic!("expected one execute action, got {actions:?}");
        };
        assert_eq!(id, "c1");
    }

    #[test]
    fn confirm_no_drops_the_command() {
        let mut app = app(ScreenId::Customers);
        app.process_action(&Action::ShowConfirm(delete_customer()))
            .unwrap();
        app.process_action(&Action::ConfirmNo).unwrap();

        assert!(app.pending_confirm.is_none());
        assert!(queued(&mut app).is_empty());
    }

    #[test]
    fn open_form_takes_keys_before_global_bindings() {
        let mut app = app(ScreenId::Customers);
        app.process_action(&Action::OpenCreate).unwrap();

        assert!(press(&mut app, KeyCode::Char('q')).is_none());
        assert!(app.running);
        let quit = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(quit, Some(Action::Quit)));
    }

    #[test]
    fn search_keys_build_the_query() {
        let mut app = app(ScreenId::Customers);
        let open = press(&mut app, KeyCode::Char('/')).unwrap();
        app.process_action(&open).unwrap();
        assert!(app.search_active);

        press(&mut app, KeyCode::Char('a'));
        let Some(Action::SearchInput(query)) = press(&mut app, KeyCode::Char('b')) else {
            panic!("expected search input");
        };
        assert_eq!(query, "ab");
        let Some(Action::SearchInput(query)) = press(&mut app, KeyCode::Backspace) else {
            panic!("expected search input");
        };
        assert_eq!(query, "a");
    }

    #[test]
    fn dashboard_has_no_search() {
        let mut app = app(ScreenId::Dashboard);
        assert!(!matches!(
            press(&mut app, KeyCode::Char('/')),
            Some(Action::OpenSearch)
        ));
    }

    #[test]
    fn sidebar_focus_routes_navigation_keys() {
        let mut app = app(ScreenId::Dashboard);
        let toggle = press(&mut app, KeyCode::Tab).unwrap();
        app.process_action(&toggle).unwrap();
        assert_eq!(app.focus, Focus::Sidebar);

        // Dashboard, Infrastructure header, All Locations
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert!(matches!(
            press(&mut app, KeyCode::Enter),
            Some(Action::SwitchScreen(ScreenId::Infrastructure))
        ));
    }

    #[test]
    fn hiding_the_sidebar_returns_focus_to_content() {
        let mut app = app(ScreenId::Dashboard);
        app.process_action(&Action::ToggleFocus).unwrap();
        app.process_action(&Action::ToggleSidebar).unwrap();

        assert!(!app.sidebar.is_open());
        assert_eq!(app.focus, Focus::Content);
        app.process_action(&Action::ToggleFocus).unwrap();
        assert_eq!(app.focus, Focus::Content);
    }

    #[tokio::test]
    async fn switching_screens_starts_a_fresh_load() {
        let mut app = app(ScreenId::Dashboard);
        app.process_action(&Action::SwitchScreen(ScreenId::Aws))
            .unwrap();

        assert_eq!(app.active_screen, ScreenId::Aws);
        let actions = queued(&mut app);
        assert!(matches!(
            actions.first(),
            Some(Action::LoadStarted(ScreenId::Aws))
        ));
    }

    #[tokio::test]
    async fn quick_action_opens_the_form_after_the_load_starts() {
        let mut app = app(ScreenId::Dashboard);
        app.process_action(&Action::SwitchAndCreate(ScreenId::Sites))
            .unwrap();

        let actions = queued(&mut app);
        assert!(matches!(
            actions.as_slice(),
            [Action::LoadStarted(ScreenId::Sites), Action::OpenCreate, ..]
        ));
    }

    #[test]
    fn results_only_reach_their_screen() {
        let mut app = app(ScreenId::Customers);
        app.process_action(&Action::OpenCreate).unwrap();
        app.process_action(&Action::LoadStarted(ScreenId::Sites))
            .unwrap();

        // A load starting elsewhere must not close the open form
        assert!(app.active().unwrap().captures_input());
        app.process_action(&Action::LoadStarted(ScreenId::Customers))
            .unwrap();
        assert!(!app.active().unwrap().captures_input());
    }

    #[test]
    fn notifications_expire_on_tick() {
        let mut app = app(ScreenId::Dashboard);
        app.process_action(&Action::Notify(Notification::success("Customer created")))
            .unwrap();
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_some());

        let shown = Instant::now().checked_sub(Duration::from_secs(4)).unwrap();
        app.notification = Some((Notification::info("old"), shown));
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }

    #[test]
    fn transient_load_failures_suggest_a_retry() {
        let timeout = CoreError::Timeout { timeout_secs: 30 };
        assert_eq!(
            load_failure_message(&timeout),
            "Backend request timed out after 30s\nThe backend may be temporarily unavailable."
        );
        let rejected = CoreError::Rejected {
            message: "bad filter".into(),
        };
        assert_eq!(
            load_failure_message(&rejected),
            "Operation rejected by backend: bad filter"
        );
    }
}
