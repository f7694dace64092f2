//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use userdeck_core::Route;

use crate::effects::UiEffect;
use crate::events::{AuthUiEvent, UiEvent};
use crate::state::{AppState, Screen};
use crate::{auth, records};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute. Every collaborator call in the returned
/// effects is counted as pending until its result event arrives.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Navigated { route } => mount(app, route),
        result @ (UiEvent::Auth(_) | UiEvent::Records(_)) => handle_result(app, result),
    };
    app.pending += effects.iter().filter(|e| e.is_backend_call()).count();
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            match &mut app.screen {
                Screen::Auth(form) => auth::handle_paste(form, &text),
                Screen::Records(state) => records::handle_paste(state, &text),
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if matches!(key.kind, KeyEventKind::Release) {
        return vec![];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'q'))
    {
        return vec![UiEffect::Quit];
    }

    match &mut app.screen {
        Screen::Auth(form) => auth::handle_key(form, key),
        Screen::Records(state) => records::handle_key(state, key),
    }
}

/// Mounts a fresh screen for `route`, discarding the previous one.
fn mount(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    let (screen, effects) = Screen::mount(route);
    app.screen = screen;
    app.mount = app.mount.next();
    tracing::debug!(path = route.path(), mount = app.mount.0, "Mounted screen");
    effects
}

fn handle_result(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    app.pending = app.pending.saturating_sub(1);
    match event.failure() {
        Some(error) => app.last_error = Some(error.to_string()),
        None => app.last_error = None,
    }

    if event.origin() != Some(app.mount) {
        tracing::debug!(?event, mount = app.mount.0, "Discarding response for unmounted screen");
        return vec![];
    }

    match (event, &mut app.screen) {
        (UiEvent::Auth(auth_event), Screen::Auth(form)) => {
            if let AuthUiEvent::Registered {
                result: Ok(email), ..
            }
            | AuthUiEvent::SignedIn {
                result: Ok(email), ..
            } = &auth_event
            {
                app.signed_in_as = Some(email.clone());
            }
            auth::handle_result(form, auth_event)
        }
        (UiEvent::Records(records_event), Screen::Records(state)) => {
            records::handle_result(state, records_event)
        }
        (event, _) => {
            tracing::debug!(?event, "Result does not match the mounted screen");
            vec![]
        }
    }
}
