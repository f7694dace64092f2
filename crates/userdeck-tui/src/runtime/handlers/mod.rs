//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that call a collaborator and return
//! the `UiEvent` describing the outcome. They never touch state; the
//! runtime spawns them and forwards the returned event to the inbox.
//!
//! ```ignore
//! // Handler: pure async, returns UiEvent
//! pub async fn list_records(store, collection, mount) -> UiEvent { ... }
//!
//! // Runtime: spawns and sends to inbox
//! self.spawn_effect(move || handlers::list_records(store, collection, mount));
//! ```

mod auth;
mod records;

pub use auth::*;
pub use records::*;
