//! Modal form overlay shared by every create and edit flow.
//!
//! A [`Form`] owns raw field values only. Screens read them back into a
//! draft after each edit and on submit, so validation stays in the core
//! drafts and the form never needs to know about record types.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use assetdesk_core::select::{SelectOption, reconcile_selection};

use crate::theme;

const LABEL_WIDTH: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Digits only.
    Number,
    Select(Vec<SelectOption>),
    Toggle,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    kind: FieldKind,
    value: String,
    checked: bool,
    required: bool,
    hidden: bool,
}

impl Field {
    fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            value: String::new(),
            checked: false,
            required: false,
            hidden: false,
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn select(key: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self::new(key, label, FieldKind::Select(options))
    }

    pub fn toggle(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Toggle)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    fn is_textual(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Number)
    }

    fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Text | FieldKind::Number => self.value.clone(),
            FieldKind::Toggle => {
                if self.checked {
                    "[x] Yes".into()
                } else {
                    "[ ] No".into()
                }
            }
            FieldKind::Select(options) => {
                if options.is_empty() {
                    return "(none available)".into();
                }
                options
                    .iter()
                    .find(|option| option.value == self.value)
                    .map_or_else(
                        || format!("Select {}", self.label),
                        |option| format!("‹ {} ›", option.label),
                    )
            }
        }
    }

    /// Apply one key to this field. Returns `true` if the value changed.
    fn apply_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match (&self.kind, key.code) {
            (FieldKind::Text, KeyCode::Char(ch)) => {
                self.value.push(ch);
                true
            }
            (FieldKind::Number, KeyCode::Char(ch)) if ch.is_ascii_digit() => {
                self.value.push(ch);
                true
            }
            (FieldKind::Text | FieldKind::Number, KeyCode::Backspace) => {
                self.value.pop().is_some()
            }
            (FieldKind::Toggle, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) => {
                self.checked = !self.checked;
                true
            }
            (FieldKind::Select(options), KeyCode::Right | KeyCode::Char(' ')) => {
                cycle(&mut self.value, options, true)
            }
            (FieldKind::Select(options), KeyCode::Left) => cycle(&mut self.value, options, false),
            _ => false,
        }
    }
}

/// Step a select value through its options, wrapping at either end.
fn cycle(value: &mut String, options: &[SelectOption], forward: bool) -> bool {
    let len = options.len();
    if len == 0 {
        return false;
    }
    let next = match options.iter().position(|option| option.value == *value) {
        Some(current) if forward => (current + 1) % len,
        Some(current) => (current + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    let changed = options[next].value != *value;
    value.clone_from(&options[next].value);
    changed
}

/// What a key press meant to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Ignored,
    /// The field with this key changed.
    Edited(&'static str),
    Moved,
    Submit,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct Form {
    title: String,
    fields: Vec<Field>,
    focus: usize,
    error: Option<String>,
    note: Option<String>,
    pending: bool,
}

impl Form {
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        let mut form = Self {
            title: title.into(),
            fields,
            focus: 0,
            error: None,
            note: None,
            pending: false,
        };
        form.ensure_visible_focus();
        form
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.key == key)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.key == key)
    }

    /// Raw value of a text, number or select field. Empty if unknown.
    pub fn value(&self, key: &str) -> &str {
        self.field(key).map_or("", |field| field.value.as_str())
    }

    pub fn checked(&self, key: &str) -> bool {
        self.field(key).is_some_and(|field| field.checked)
    }

    #[cfg(test)]
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(key) {
            field.value = value.into();
        }
    }

    /// Replace a select's options, clearing the selection if it is no
    /// longer offered.
    pub fn set_options(&mut self, key: &str, options: Vec<SelectOption>) {
        if let Some(field) = self.field_mut(key) {
            field.value = reconcile_selection(&field.value, &options);
            field.kind = FieldKind::Select(options);
        }
    }

    pub fn options(&self, key: &str) -> &[SelectOption] {
        match self.field(key).map(|field| &field.kind) {
            Some(FieldKind::Select(options)) => options,
            _ => &[],
        }
    }

    pub fn set_hidden(&mut self, key: &str, hidden: bool) {
        if let Some(field) = self.field_mut(key) {
            field.hidden = hidden;
        }
        self.ensure_visible_focus();
    }

    #[cfg(test)]
    pub fn is_hidden(&self, key: &str) -> bool {
        self.field(key).is_none_or(|field| field.hidden)
    }

    #[cfg(test)]
    pub fn focused_key(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|field| field.key)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Extra line shown under the fields (e.g. a name preview).
    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note;
    }

    #[cfg(test)]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    fn visible_count(&self) -> usize {
        self.fields.iter().filter(|field| !field.hidden).count()
    }

    fn ensure_visible_focus(&mut self) {
        if self.fields.get(self.focus).is_some_and(|field| !field.hidden) {
            return;
        }
        self.move_focus(1);
    }

    fn move_focus(&mut self, step: isize) {
        let len = self.fields.len();
        if len == 0 || self.visible_count() == 0 {
            return;
        }
        let mut idx = self.focus;
        for _ in 0..len {
            idx = if step > 0 {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            if !self.fields[idx].hidden {
                self.focus = idx;
                return;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Enter if self.pending => return FormEvent::Ignored,
            KeyCode::Enter => return FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(1);
                return FormEvent::Moved;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(-1);
                return FormEvent::Moved;
            }
            _ => {}
        }
        if self.pending {
            return FormEvent::Ignored;
        }
        let Some(field) = self.fields.get_mut(self.focus) else {
            return FormEvent::Ignored;
        };
        if field.apply_key(key) {
            FormEvent::Edited(field.key)
        } else {
            FormEvent::Ignored
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let extra = usize::from(self.error.is_some()) + usize::from(self.note.is_some());
        let wanted = u16::try_from(self.visible_count() + extra + 4).unwrap_or(u16::MAX);
        let width = 64u16.min(area.width.saturating_sub(4));
        let height = wanted.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let overlay = Rect::new(x, y, width, height);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(theme::ELECTRIC_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(theme::ELECTRIC_PURPLE))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let focused_label = Style::default()
            .fg(theme::ELECTRIC_YELLOW)
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::with_capacity(self.fields.len() + 4);
        for (idx, field) in self.fields.iter().enumerate() {
            if field.hidden {
                continue;
            }
            let is_focused = idx == self.focus;
            let label_style = if is_focused {
                focused_label
            } else {
                theme::label()
            };
            let marker = if is_focused { "▸ " } else { "  " };
            let label = if field.required {
                format!("{}*", field.label)
            } else {
                field.label.to_string()
            };
            let value_style = match field.kind {
                FieldKind::Toggle => theme::active_flag(field.checked),
                FieldKind::Select(_) if field.value.is_empty() => theme::muted(),
                _ => theme::value(),
            };
            let cursor = if is_focused && field.is_textual() {
                "▎"
            } else {
                ""
            };
            lines.push(Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
                Span::styled(field.display_value(), value_style),
                Span::styled(cursor, Style::default().fg(theme::ELECTRIC_YELLOW)),
            ]));
        }

        if let Some(note) = &self.note {
            lines.push(Line::from(Span::styled(format!("  {note}"), theme::muted())));
        }
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(format!("  ✗ {error}"), theme::error_text())));
        }

        lines.push(Line::from(""));
        if self.pending {
            lines.push(Line::from(Span::styled(" Saving…", theme::key_hint_key())));
        } else {
            lines.push(Line::from(vec![
                Span::styled(" Tab", theme::key_hint_key()),
                Span::styled(" next  ", theme::key_hint()),
                Span::styled("←/→", theme::key_hint_key()),
                Span::styled(" choose  ", theme::key_hint()),
                Span::styled("Space", theme::key_hint_key()),
                Span::styled(" toggle  ", theme::key_hint()),
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" save  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" cancel", theme::key_hint()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
