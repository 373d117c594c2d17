//! Generic list screen: searchable table, detail overlay, create and edit
//! forms, and delete confirmation.
//!
//! Everything record-specific (columns, form fields, search fields,
//! commands) comes from a [`Resource`]. The screen owns the per-view
//! state: the loaded records, the filtered row indices, and whichever
//! overlay is open.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
};
use throbber_widgets_tui::ThrobberState;

use assetdesk_core::search::filter_indices;
use assetdesk_core::{
    Command, CommandResult, DetailModal, Draft, ModalMode, Record, RecordSet, SearchQuery,
};

use crate::action::{Action, ConfirmAction, Notification, ViewData};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::panel;

pub type RecordOf<R> = <<R as Resource>::Draft as Draft>::Record;
pub type RequestOf<R> = <<R as Resource>::Draft as Draft>::Request;

/// Record-specific behaviour plugged into a [`ListScreen`].
pub trait Resource {
    type Draft: Draft;

    /// Table title ("Virtual Machines").
    fn title(&self) -> &'static str;

    /// Singular noun for form titles ("VM").
    fn noun(&self) -> &'static str;

    /// Keep the cross-referenced collections from a load and return the
    /// primary records, or `None` if the payload is for another view.
    fn ingest(&mut self, data: ViewData) -> Option<Vec<RecordOf<Self>>>;

    fn matches(&self, query: &SearchQuery, record: &RecordOf<Self>) -> bool;

    /// Header and width per column, the label column first.
    fn columns(&self) -> Vec<(&'static str, Constraint)>;

    /// Cells after the leading label column.
    fn row(&self, record: &RecordOf<Self>) -> Vec<Cell<'static>>;

    fn detail(&self, record: &RecordOf<Self>) -> Vec<Line<'static>>;

    fn blank(&self) -> Self::Draft;

    fn edit_draft(&self, record: &RecordOf<Self>) -> Self::Draft {
        Self::Draft::from_record(record)
    }

    fn form(&self, title: String, draft: &Self::Draft) -> Form;

    /// Read the form back into a draft, starting from `base` so fields the
    /// form does not show survive.
    fn read(&self, form: &Form, base: &Self::Draft) -> Self::Draft;

    /// Recompute dependent options and conditional fields. Runs after every
    /// edit and whenever new data arrives under an open form.
    fn sync(&self, _form: &mut Form) {}

    fn create(&self, request: RequestOf<Self>) -> Command;

    fn update(&self, id: String, request: RequestOf<Self>) -> Command;

    fn delete(&self, record: &RecordOf<Self>) -> Command;

    /// Reason the delete action is disabled for this record.
    fn delete_blocked(&self, _record: &RecordOf<Self>) -> Option<String> {
        None
    }

    fn delete_prompt(&self) -> String;

    /// The record a command result carries, if it is this screen's type.
    fn take(&self, result: CommandResult) -> Option<RecordOf<Self>>;
}

// ── State ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    Loading,
    Failed(String),
    Ready,
}

enum Overlay<D: Draft> {
    Closed,
    Create(Form),
    Detail {
        modal: DetailModal<D>,
        /// Present while editing.
        form: Option<Form>,
    },
}

pub struct ListScreen<R: Resource> {
    id: ScreenId,
    resource: R,
    focused: bool,
    load: LoadState,
    records: RecordSet<RecordOf<R>>,
    /// Indices into `records` that pass the search filter.
    visible: Vec<usize>,
    table_state: TableState,
    query: SearchQuery,
    overlay: Overlay<R::Draft>,
    throbber_state: ThrobberState,
}

impl<R: Resource> ListScreen<R> {
    pub fn new(id: ScreenId, resource: R) -> Self {
        Self {
            id,
            resource,
            focused: false,
            load: LoadState::Loading,
            records: RecordSet::new(),
            visible: Vec::new(),
            table_state: TableState::default(),
            query: SearchQuery::default(),
            overlay: Overlay::Closed,
            throbber_state: ThrobberState::default(),
        }
    }

    fn refilter(&mut self) {
        let resource = &self.resource;
        let query = &self.query;
        self.visible = filter_indices(self.records.iter(), |record| {
            resource.matches(query, record)
        });
        let selected = self.selected_index().min(self.visible.len().saturating_sub(1));
        self.table_state.select(Some(selected));
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_record(&self) -> Option<&RecordOf<R>> {
        let idx = *self.visible.get(self.selected_index())?;
        self.records.get_index(idx)
    }

    fn select(&mut self, idx: usize) {
        let last = self.visible.len().saturating_sub(1);
        self.table_state.select(Some(idx.min(last)));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        self.select(self.selected_index().saturating_add_signed(delta));
    }

    // ── Overlay transitions ─────────────────────────────────────────

    fn open_create(&mut self) {
        let draft = self.resource.blank();
        let mut form = self
            .resource
            .form(format!("Add {}", self.resource.noun()), &draft);
        self.resource.sync(&mut form);
        self.overlay = Overlay::Create(form);
    }

    fn open_detail(&mut self) -> bool {
        let Some(record) = self.selected_record().cloned() else {
            return false;
        };
        self.overlay = Overlay::Detail {
            modal: DetailModal::open(record),
            form: None,
        };
        true
    }

    fn begin_edit(&mut self) {
        let Overlay::Detail { modal, form } = &mut self.overlay else {
            return;
        };
        if !modal.is_viewing() {
            return;
        }
        let draft = self.resource.edit_draft(modal.record());
        let mut edit = self
            .resource
            .form(format!("Edit {}", self.resource.noun()), &draft);
        self.resource.sync(&mut edit);
        modal.begin_edit_with(draft);
        *form = Some(edit);
    }

    fn request_delete(&mut self) -> Option<Action> {
        let Overlay::Detail { modal, .. } = &mut self.overlay else {
            return None;
        };
        if let Some(reason) = self.resource.delete_blocked(modal.record()) {
            return Some(Action::Notify(Notification::info(reason)));
        }
        let command = self.resource.delete(modal.record());
        modal.request_delete();
        Some(Action::ShowConfirm(ConfirmAction {
            origin: self.id,
            prompt: self.resource.delete_prompt(),
            command,
        }))
    }

    // ── Key handling per overlay ────────────────────────────────────

    fn handle_create_key(&mut self, mut form: Form, key: KeyEvent) -> Option<Action> {
        match form.handle_key(key) {
            FormEvent::Cancel => return None,
            FormEvent::Edited(_) => self.resource.sync(&mut form),
            FormEvent::Submit => {
                let draft = self.resource.read(&form, &self.resource.blank());
                match draft.to_request() {
                    Ok(request) => {
                        form.set_error(None);
                        form.set_pending(true);
                        self.overlay = Overlay::Create(form);
                        return Some(Action::Execute {
                            origin: self.id,
                            command: self.resource.create(request),
                        });
                    }
                    Err(e) => form.set_error(Some(e.to_string())),
                }
            }
            FormEvent::Moved | FormEvent::Ignored => {}
        }
        self.overlay = Overlay::Create(form);
        None
    }

    fn handle_edit_key(
        &mut self,
        mut modal: DetailModal<R::Draft>,
        mut form: Form,
        key: KeyEvent,
    ) -> Option<Action> {
        let mut action = None;
        match form.handle_key(key) {
            FormEvent::Cancel => {
                modal.cancel_edit();
                self.overlay = Overlay::Detail { modal, form: None };
                return None;
            }
            FormEvent::Edited(_) => {
                self.resource.sync(&mut form);
                if let Some(draft) = modal.draft_mut() {
                    *draft = self.resource.read(&form, draft);
                }
            }
            FormEvent::Submit => {
                if let Some(draft) = modal.draft_mut() {
                    *draft = self.resource.read(&form, draft);
                    match draft.to_request() {
                        Ok(request) => {
                            form.set_error(None);
                            form.set_pending(true);
                            let id = modal.record().id().to_owned();
                            action = Some(Action::Execute {
                                origin: self.id,
                                command: self.resource.update(id, request),
                            });
                        }
                        Err(e) => form.set_error(Some(e.to_string())),
                    }
                }
            }
            FormEvent::Moved | FormEvent::Ignored => {}
        }
        self.overlay = Overlay::Detail {
            modal,
            form: Some(form),
        };
        action
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.overlay = Overlay::Closed;
                None
            }
            KeyCode::Char('e') => {
                self.begin_edit();
                None
            }
            KeyCode::Char('d') => self.request_delete(),
            _ => None,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('r') => return Some(Action::Reload),
            KeyCode::Char('n') if !matches!(self.load, LoadState::Failed(_)) => {
                self.open_create();
                return None;
            }
            _ => {}
        }
        if self.load != LoadState::Ready {
            return None;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.select(0),
            KeyCode::Char('G') | KeyCode::End => self.select(usize::MAX),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
            }
            KeyCode::Enter => {
                self.open_detail();
            }
            KeyCode::Char('e') => {
                if self.open_detail() {
                    self.begin_edit();
                }
            }
            KeyCode::Char('d') => {
                if self.open_detail() {
                    return self.request_delete();
                }
            }
            _ => {}
        }
        None
    }

    // ── Data updates ────────────────────────────────────────────────

    fn apply_result(&mut self, result: &CommandResult) {
        if let CommandResult::Deleted { id, .. } = result {
            self.records.remove(id);
            self.overlay = Overlay::Closed;
            self.refilter();
            return;
        }
        let Some(record) = self.resource.take(result.clone()) else {
            return;
        };
        self.records.upsert(record.clone());
        if matches!(self.overlay, Overlay::Create(_)) {
            self.overlay = Overlay::Closed;
        } else if let Overlay::Detail { modal, form } = &mut self.overlay {
            if modal.record().id() == record.id() {
                modal.replace_record(record);
                *form = None;
            }
        }
        self.refilter();
    }

    fn apply_failure(&mut self, message: &str) {
        match &mut self.overlay {
            Overlay::Create(form)
            | Overlay::Detail {
                form: Some(form), ..
            } => {
                form.set_pending(false);
                form.set_error(Some(message.to_owned()));
            }
            Overlay::Detail { modal, form: None } => modal.cancel_delete(),
            Overlay::Closed => {}
        }
    }

    fn resync_open_form(&mut self) {
        match &mut self.overlay {
            Overlay::Create(form)
            | Overlay::Detail {
                form: Some(form), ..
            } => self.resource.sync(form),
            Overlay::Detail { form: None, .. } | Overlay::Closed => {}
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let [table_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        if self.records.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No {} yet", self.resource.title().to_lowercase()),
                    theme::muted(),
                )),
            ])
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(empty, table_area);
        } else {
            let columns = self.resource.columns();
            let header = Row::new(
                columns
                    .iter()
                    .map(|(name, _)| Cell::from(*name).style(theme::table_header())),
            );
            let selected = self.selected_index();
            let rows = self.visible.iter().enumerate().filter_map(|(pos, &idx)| {
                let record = self.records.get_index(idx)?;
                let is_selected = pos == selected;
                let prefix = if is_selected { "▸" } else { " " };
                let label = Cell::from(format!("{prefix}{}", record.label())).style(
                    Style::default().fg(theme::NEON_CYAN).add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                );
                let cells = std::iter::once(label).chain(self.resource.row(record));
                let style = if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };
                Some(Row::new(cells).style(style))
            });
            let widths: Vec<Constraint> = columns.iter().map(|(_, width)| *width).collect();
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());
            let mut state = self.table_state;
            frame.render_stateful_widget(table, table_area, &mut state);
        }

        let hints = panel::hints(&[
            ("j/k", "navigate"),
            ("Enter", "view"),
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("r", "reload"),
        ]);
        frame.render_widget(Paragraph::new(hints), hint_area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, modal: &DetailModal<R::Draft>) {
        let record = modal.record();
        let mut lines = self.resource.detail(record);
        let blocked = self.resource.delete_blocked(record);
        if let Some(reason) = &blocked {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {reason}"),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            )));
        }
        lines.push(Line::from(""));
        lines.push(if blocked.is_some() {
            panel::hints(&[("e", "edit"), ("Esc", "close")])
        } else {
            panel::hints(&[("e", "edit"), ("d", "delete"), ("Esc", "close")])
        });

        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let overlay = panel::centered(area, 72, height);
        frame.render_widget(Clear, overlay);
        let block = Block::default()
            .title(format!(" {} ", record.label()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            overlay,
        );
    }
}

impl<R> Component for ListScreen<R>
where
    R: Resource + Send,
    R::Draft: Send,
    RecordOf<R>: Send,
{
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match std::mem::replace(&mut self.overlay, Overlay::Closed) {
            Overlay::Closed => self.handle_list_key(key),
            Overlay::Create(form) => self.handle_create_key(form, key),
            Overlay::Detail {
                modal,
                form: Some(form),
            } => self.handle_edit_key(modal, form, key),
            Overlay::Detail { modal, form: None } => {
                let confirming = matches!(modal.mode(), ModalMode::ConfirmingDelete);
                self.overlay = Overlay::Detail { modal, form: None };
                if confirming {
                    None
                } else {
                    self.handle_detail_key(key)
                }
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.load == LoadState::Loading => self.throbber_state.calc_next(),
            Action::LoadStarted(_) => {
                self.load = LoadState::Loading;
                self.overlay = Overlay::Closed;
                self.query = SearchQuery::default();
            }
            Action::Loaded(_, data) => {
                if let Some(records) = self.resource.ingest((**data).clone()) {
                    self.records = records.into();
                    self.load = LoadState::Ready;
                    self.refilter();
                    self.resync_open_form();
                }
            }
            Action::LoadFailed(_, message) => self.load = LoadState::Failed(message.clone()),
            Action::OpenCreate => self.open_create(),
            Action::SearchInput(raw) => {
                self.query = SearchQuery::new(raw);
                self.refilter();
            }
            Action::CloseSearch => {
                self.query = SearchQuery::default();
                self.refilter();
            }
            Action::CommandDone { result, .. } => self.apply_result(result),
            Action::CommandFailed { message, .. } => self.apply_failure(message),
            Action::ConfirmNo => {
                if let Overlay::Detail { modal, .. } = &mut self.overlay {
                    modal.cancel_delete();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.query.is_empty() {
            format!(" {} ({}) ", self.resource.title(), self.records.len())
        } else {
            format!(
                " {} ({}/{}) ",
                self.resource.title(),
                self.visible.len(),
                self.records.len()
            )
        };
        let mut block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        if !self.query.is_empty() {
            block = block.title_bottom(Line::from(vec![
                Span::styled(" filter ", theme::key_hint()),
                Span::styled(format!("{} ", self.query.as_str()), theme::key_hint_key()),
            ]));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.load {
            LoadState::Loading => panel::render_loading(
                frame,
                inner,
                &self.throbber_state,
                &self.resource.title().to_lowercase(),
            ),
            LoadState::Failed(message) => panel::render_error(frame, inner, message),
            LoadState::Ready => self.render_table(frame, inner),
        }

        match &self.overlay {
            Overlay::Closed => {}
            Overlay::Create(form) => form.render(frame, area),
            Overlay::Detail { modal, form } => {
                self.render_detail(frame, area, modal);
                if let Some(form) = form {
                    form.render(frame, area);
                }
            }
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_input(&self) -> bool {
        !matches!(self.overlay, Overlay::Closed)
    }

    fn id(&self) -> ScreenId {
        self.id
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    pub fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn type_text<R>(screen: &mut ListScreen<R>, text: &str)
    where
        R: Resource + Send,
        R::Draft: Send,
        RecordOf<R>: Send,
    {
        for ch in text.chars() {
            let _ = screen.handle_key_event(press(KeyCode::Char(ch)));
        }
    }

    pub fn key<R>(screen: &mut ListScreen<R>, code: KeyCode) -> Option<Action>
    where
        R: Resource + Send,
        R::Draft: Send,
        RecordOf<R>: Send,
    {
        screen.handle_key_event(press(code)).ok().flatten()
    }

    pub fn load<R>(screen: &mut ListScreen<R>, data: ViewData)
    where
        R: Resource + Send,
        R::Draft: Send,
        RecordOf<R>: Send,
    {
        let id = screen.id();
        let _ = screen.update(&Action::Loaded(id, Box::new(data)));
    }

    impl<R: Resource> ListScreen<R> {
        pub fn visible_labels(&self) -> Vec<String> {
            self.visible
                .iter()
                .filter_map(|&idx| self.records.get_index(idx))
                .map(|record| record.label().to_owned())
                .collect()
        }

        pub fn form(&self) -> Option<&Form> {
            match &self.overlay {
                Overlay::Create(form)
                | Overlay::Detail {
                    form: Some(form), ..
                } => Some(form),
                Overlay::Detail { form: None, .. } | Overlay::Closed => None,
            }
        }

        pub fn resource(&self) -> &R {
            &self.resource
        }
    }
}
