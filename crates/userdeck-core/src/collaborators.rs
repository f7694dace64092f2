//! Contracts of the external collaborators.
//!
//! The screens never talk to a backend directly: they go through an
//! `AuthProvider` and a `DocumentStore`, bundled as `Collaborators` and
//! injected into the runtime. `firebase` and `memory` provide implementations.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::{Document, Fields};
use crate::session::Session;

/// Errors returned by the auth collaborator.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service rejected the request (e.g. `EMAIL_EXISTS`).
    #[error("{code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("auth request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected auth response: {0}")]
    Decode(String),
}

impl AuthError {
    /// Service error code, when the service returned one.
    pub fn code(&self) -> Option<&str> {
        match self {
            AuthError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Errors returned by the storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The service rejected the request (e.g. `PERMISSION_DENIED`).
    #[error("{code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected storage response: {0}")]
    Decode(String),
    #[error("no document '{id}' in collection '{collection}'")]
    NotFound { collection: String, id: String },
    #[error("storage backend unavailable")]
    Unavailable,
}

/// Account creation and credential verification.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Creates an account and signs it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Verifies credentials and signs the user in.
    async fn verify_credentials(&self, email: &str, password: &str)
    -> Result<Session, AuthError>;

    /// The session held by the provider, if signed in.
    fn current_session(&self) -> Option<Session>;
}

/// Operations on named collections of documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a document and returns its assigned identifier.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Lists every document of a collection, in the store's order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Overwrites the given fields of an existing document.
    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError>;

    /// Removes a document. Removing an absent document is not an error.
    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Capability bundle handed to the runtime.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn DocumentStore>,
}

impl Collaborators {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { auth, store }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
