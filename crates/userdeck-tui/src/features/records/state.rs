use userdeck_core::Record;

use crate::common::TextField;

/// The record being renamed. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target: Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsFocus {
    Field,
    List,
}

/// State of the records screen.
///
/// The add and edit inputs are separate: the add form is hidden (not
/// cleared) while an edit session is active.
#[derive(Debug, Clone)]
pub struct RecordsState {
    pub records: Vec<Record>,
    pub add_field: TextField,
    pub edit_field: TextField,
    pub edit: Option<EditSession>,
    pub focus: RecordsFocus,
    pub selected: usize,
}

impl Default for RecordsState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordsState {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            add_field: TextField::new(),
            edit_field: TextField::new(),
            edit: None,
            focus: RecordsFocus::Field,
            selected: 0,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn field_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Data"
        } else {
            "Add Data"
        }
    }

    /// The input currently shown: the edit field while editing.
    pub fn active_field(&self) -> &TextField {
        if self.is_editing() {
            &self.edit_field
        } else {
            &self.add_field
        }
    }

    pub fn active_field_mut(&mut self) -> &mut TextField {
        if self.is_editing() {
            &mut self.edit_field
        } else {
            &mut self.add_field
        }
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.records.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside the list after it changed.
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            RecordsFocus::Field => RecordsFocus::List,
            RecordsFocus::List => RecordsFocus::Field,
        };
    }
}
