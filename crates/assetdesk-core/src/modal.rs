// Detail overlay state: read-only view, edit form, or pending delete.
//
// Cancelling an edit drops the draft and leaves the record untouched. The
// record is only replaced once the backend has accepted the update.

use crate::draft::Draft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode<D> {
    Viewing,
    Editing(D),
    ConfirmingDelete,
}

/// One record opened in a detail overlay.
#[derive(Debug, Clone)]
pub struct DetailModal<D: Draft> {
    record: D::Record,
    mode: ModalMode<D>,
}

impl<D: Draft> DetailModal<D> {
    pub fn open(record: D::Record) -> Self {
        Self {
            record,
            mode: ModalMode::Viewing,
        }
    }

    pub fn record(&self) -> &D::Record {
        &self.record
    }

    pub fn mode(&self) -> &ModalMode<D> {
        &self.mode
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self.mode, ModalMode::Viewing)
    }

    /// Switch to editing, pre-filled from the current record.
    pub fn begin_edit(&mut self) {
        self.begin_edit_with(D::from_record(&self.record));
    }

    /// Switch to editing with a draft built by the caller (e.g. one that
    /// needs extra lookups to pre-fill).
    pub fn begin_edit_with(&mut self, draft: D) {
        self.mode = ModalMode::Editing(draft);
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match &mut self.mode {
            ModalMode::Editing(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, ModalMode::Editing(_)) {
            self.mode = ModalMode::Viewing;
        }
    }

    pub fn request_delete(&mut self) {
        self.mode = ModalMode::ConfirmingDelete;
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.mode, ModalMode::ConfirmingDelete) {
            self.mode = ModalMode::Viewing;
        }
    }

    /// Adopt the record returned by a successful update and leave edit mode.
    pub fn replace_record(&mut self, record: D::Record) {
        self.record = record;
        self.mode = ModalMode::Viewing;
    }
}
