//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and navigation only (no direct UI mutations), which
//! keeps the reducer pure: it mutates state and returns effects, never
//! calls a collaborator itself.

use userdeck_core::Route;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Switch to another screen. Answered with `UiEvent::Navigated`.
    Navigate { route: Route },

    /// Create an account with the auth collaborator.
    CreateAccount { email: String, password: String },

    /// Verify credentials with the auth collaborator.
    VerifyCredentials { email: String, password: String },

    /// Fetch every record of the managed collection.
    ListRecords,

    /// Insert a record named `name`.
    InsertRecord { name: String },

    /// Rename record `id` to `name`.
    UpdateRecord { id: String, name: String },

    /// Remove record `id`.
    RemoveRecord { id: String },
}

impl UiEffect {
    /// True for effects that call a collaborator and answer with a result
    /// event (these are counted as pending).
    pub fn is_backend_call(&self) -> bool {
        !matches!(self, UiEffect::Quit | UiEffect::Navigate { .. })
    }
}
