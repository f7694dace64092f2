//! Records feature reducer.
//!
//! Edit flow: `Idle -(edit)-> Editing -(update ok)-> Idle`, and editing
//! another record while editing retargets the session. There is no cancel.
//!
//! Mutations never touch the local list optimistically. Add and update
//! re-fetch the whole list on success; delete filters the removed id out
//! locally. List responses are applied in arrival order.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use userdeck_core::Record;
use userdeck_core::record::is_blank;

use super::state::{EditSession, RecordsFocus, RecordsState};
use crate::effects::UiEffect;
use crate::events::RecordsUiEvent;

/// Requests the full list (run on mount and after add/update).
pub fn list() -> Vec<UiEffect> {
    vec![UiEffect::ListRecords]
}

/// Submits the add field. Blank input is ignored without a call; the raw
/// (untrimmed) text is what gets stored.
pub fn add(state: &RecordsState) -> Vec<UiEffect> {
    let name = state.add_field.value();
    if is_blank(name) {
        return vec![];
    }
    vec![UiEffect::InsertRecord {
        name: name.to_string(),
    }]
}

/// Starts (or retargets) the edit session. Local only.
pub fn edit(state: &mut RecordsState, record: &Record) {
    state.edit_field.set(&record.name);
    state.edit = Some(EditSession {
        target: record.clone(),
    });
    state.focus = RecordsFocus::Field;
}

/// Submits the edit field for the record under edit.
pub fn update(state: &RecordsState) -> Vec<UiEffect> {
    let new_name = state.edit_field.value();
    match &state.edit {
        Some(session) if !is_blank(new_name) => vec![UiEffect::UpdateRecord {
            id: session.target.id.clone(),
            name: new_name.to_string(),
        }],
        _ => {
            tracing::warn!("Updated name is empty or no user is being edited");
            vec![]
        }
    }
}

pub fn delete(id: &str) -> Vec<UiEffect> {
    vec![UiEffect::RemoveRecord { id: id.to_string() }]
}

pub fn handle_key(state: &mut RecordsState, key: KeyEvent) -> Vec<UiEffect> {
    if matches!(key.kind, KeyEventKind::Release) {
        return vec![];
    }
    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        state.toggle_focus();
        return vec![];
    }

    match state.focus {
        RecordsFocus::Field => match key.code {
            KeyCode::Enter if state.is_editing() => update(state),
            KeyCode::Enter => add(state),
            KeyCode::Down if !state.records.is_empty() => {
                state.focus = RecordsFocus::List;
                vec![]
            }
            _ => {
                state.active_field_mut().input(key);
                vec![]
            }
        },
        RecordsFocus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                state.select_prev();
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.select_next();
                vec![]
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(record) = state.selected_record().cloned() {
                    edit(state, &record);
                }
                vec![]
            }
            KeyCode::Delete | KeyCode::Char('d') => state
                .selected_record()
                .map(|record| delete(&record.id))
                .unwrap_or_default(),
            _ => vec![],
        },
    }
}

pub fn handle_paste(state: &mut RecordsState, text: &str) {
    if state.focus == RecordsFocus::Field {
        state.active_field_mut().insert_str(text);
    }
}

/// Applies a storage collaborator result. Failures are logged and leave
/// the screen as it was.
pub fn handle_result(state: &mut RecordsState, event: RecordsUiEvent) -> Vec<UiEffect> {
    match event {
        RecordsUiEvent::Listed { result, .. } => match result {
            Ok(records) => {
                state.records = records;
                state.clamp_selection();
                vec![]
            }
            Err(error) => {
                tracing::error!(%error, "Error fetching documents");
                vec![]
            }
        },
        RecordsUiEvent::Inserted { result, .. } => match result {
            Ok(id) => {
                state.add_field.clear();
                tracing::info!(%id, "User saved");
                list()
            }
            Err(error) => {
                tracing::error!(%error, "Error adding document");
                vec![]
            }
        },
        RecordsUiEvent::Updated { id, result, .. } => match result {
            Ok(()) => {
                state.edit_field.clear();
                state.edit = None;
                tracing::info!(%id, "User updated");
                list()
            }
            Err(error) => {
                tracing::error!(%id, %error, "Error updating document");
                vec![]
            }
        },
        RecordsUiEvent::Removed { id, result, .. } => match result {
            Ok(()) => {
                state.records.retain(|record| record.id != id);
                state.clamp_selection();
                vec![]
            }
            Err(error) => {
                tracing::error!(%id, %error, "Error deleting document");
                vec![]
            }
        },
    }
}
