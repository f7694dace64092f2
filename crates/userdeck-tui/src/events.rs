//! UI events consumed by the reducer.
//!
//! Terminal input, timer ticks, navigation completions, and collaborator
//! results all arrive as `UiEvent`s. Results carry the `MountId` of the
//! screen that asked for them, so a response that outlives its screen can
//! be recognized and dropped.

use crossterm::event::Event;
use userdeck_core::{Record, Route};

/// Identifies one mounting of a screen. Bumped on every navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MountId(pub u64);

impl MountId {
    pub fn next(self) -> Self {
        MountId(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Tick,
    Terminal(Event),
    /// The runtime completed a navigation request.
    Navigated {
        route: Route,
    },
    Auth(AuthUiEvent),
    Records(RecordsUiEvent),
}

/// Results of auth collaborator calls. `Ok` carries the signed-in email.
#[derive(Debug, Clone)]
pub enum AuthUiEvent {
    Registered {
        mount: MountId,
        result: Result<String, String>,
    },
    SignedIn {
        mount: MountId,
        result: Result<String, String>,
    },
}

/// Results of storage collaborator calls.
#[derive(Debug, Clone)]
pub enum RecordsUiEvent {
    Listed {
        mount: MountId,
        result: Result<Vec<Record>, String>,
    },
    Inserted {
        mount: MountId,
        result: Result<String, String>,
    },
    Updated {
        mount: MountId,
        id: String,
        result: Result<(), String>,
    },
    Removed {
        mount: MountId,
        id: String,
        result: Result<(), String>,
    },
}

impl UiEvent {
    /// Mount of the screen that issued the call, for collaborator results.
    pub fn origin(&self) -> Option<MountId> {
        match self {
            UiEvent::Auth(
                AuthUiEvent::Registered { mount, .. } | AuthUiEvent::SignedIn { mount, .. },
            )
            | UiEvent::Records(
                RecordsUiEvent::Listed { mount, .. }
                | RecordsUiEvent::Inserted { mount, .. }
                | RecordsUiEvent::Updated { mount, .. }
                | RecordsUiEvent::Removed { mount, .. },
            ) => Some(*mount),
            _ => None,
        }
    }

    /// The error message of a failed collaborator result.
    pub fn failure(&self) -> Option<&str> {
        let error = match self {
            UiEvent::Auth(
                AuthUiEvent::Registered { result, .. } | AuthUiEvent::SignedIn { result, .. },
            ) => result.as_ref().err(),
            UiEvent::Records(RecordsUiEvent::Listed { result, .. }) => result.as_ref().err(),
            UiEvent::Records(RecordsUiEvent::Inserted { result, .. }) => result.as_ref().err(),
            UiEvent::Records(
                RecordsUiEvent::Updated { result, .. } | RecordsUiEvent::Removed { result, .. },
            ) => result.as_ref().err(),
            _ => None,
        };
        error.map(String::as_str)
    }
}
