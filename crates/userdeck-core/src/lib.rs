//! Core library for userdeck: configuration, logging, the record model,
//! and the auth/storage collaborators (Firebase REST and in-memory).

pub mod collaborators;
pub mod config;
pub mod firebase;
pub mod logging;
pub mod memory;
pub mod navigation;
pub mod record;
pub mod session;

pub use collaborators::{AuthError, AuthProvider, Collaborators, DocumentStore, StoreError};
pub use navigation::Route;
pub use record::{Document, FieldValue, Fields, Record};
pub use session::{Session, SessionHandle};
