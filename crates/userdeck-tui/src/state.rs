//! Application state composition.
//!
//! ```text
//! AppState
//! ├── screen: Screen          (the mounted screen and its local state)
//! ├── mount: MountId          (bumped on every navigation)
//! ├── pending: usize          (collaborator calls in flight)
//! └── signed_in_as, last_error, ...
//! ```
//!
//! Screen state is discarded on navigation: mounting a screen always
//! starts from a fresh state.

use userdeck_core::Route;
use userdeck_core::config::Config;

use crate::auth::{AuthFormState, AuthMode};
use crate::effects::UiEffect;
use crate::events::MountId;
use crate::records::{self, RecordsState};

/// The mounted screen.
#[derive(Debug, Clone)]
pub enum Screen {
    Auth(AuthFormState),
    Records(RecordsState),
}

impl Screen {
    /// Builds a fresh screen for `route` plus its mount effects.
    pub fn mount(route: Route) -> (Self, Vec<UiEffect>) {
        match route {
            Route::Register => (Screen::Auth(AuthFormState::new(AuthMode::Register)), vec![]),
            Route::Login => (Screen::Auth(AuthFormState::new(AuthMode::Login)), vec![]),
            Route::Records => (Screen::Records(RecordsState::new()), records::list()),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Screen::Auth(form) => form.mode.route(),
            Screen::Records(_) => Route::Records,
        }
    }
}

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub screen: Screen,
    pub mount: MountId,
    /// Collaborator calls issued and not yet answered.
    pub pending: usize,
    /// Most recent collaborator failure (shown only with `ui.show_errors`).
    pub last_error: Option<String>,
    pub show_errors: bool,
    /// Email of the last successful sign-in.
    pub signed_in_as: Option<String>,
    /// Collection managed by the records screen.
    pub collection: String,
    pub spinner_frame: usize,
}

impl AppState {
    /// Creates the state before the first navigation. Nothing is mounted
    /// until a `Navigated` event arrives.
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Auth(AuthFormState::new(AuthMode::Register)),
            mount: MountId::default(),
            pending: 0,
            last_error: None,
            show_errors: config.ui.show_errors,
            signed_in_as: None,
            collection: config.collection.clone(),
            spinner_frame: 0,
        }
    }

    pub fn records(&self) -> Option<&RecordsState> {
        match &self.screen {
            Screen::Records(state) => Some(state),
            Screen::Auth(_) => None,
        }
    }

    pub fn records_mut(&mut self) -> Option<&mut RecordsState> {
        match &mut self.screen {
            Screen::Records(state) => Some(state),
            Screen::Auth(_) => None,
        }
    }

    pub fn auth_form_mut(&mut self) -> Option<&mut AuthFormState> {
        match &mut self.screen {
            Screen::Auth(form) => Some(form),
            Screen::Records(_) => None,
        }
    }
}
