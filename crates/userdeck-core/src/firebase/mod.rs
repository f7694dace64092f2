//! Firebase REST adapters for the auth and storage collaborators.
//!
//! - `auth.rs`: Identity Toolkit (`accounts:signUp`, `accounts:signInWithPassword`)
//! - `firestore.rs`: Cloud Firestore documents API
//!
//! Both adapters share one HTTP client and one `SessionHandle`: a successful
//! sign-in stores the session, and every Firestore request carries its token.

mod auth;
mod firestore;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
pub use auth::FirebaseAuth;
pub use firestore::FirestoreStore;
use serde::Deserialize;

use crate::collaborators::Collaborators;
use crate::config::Config;
use crate::session::SessionHandle;

/// Standard User-Agent header for userdeck API requests.
pub const USER_AGENT: &str = concat!("userdeck/", env!("CARGO_PKG_VERSION"));

/// Default Identity Toolkit endpoint.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
/// Default Firestore endpoint.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

const API_KEY_ENV: &str = "FIREBASE_API_KEY";
const PROJECT_ID_ENV: &str = "FIREBASE_PROJECT_ID";
const AUTH_BASE_URL_ENV: &str = "FIREBASE_AUTH_BASE_URL";
const FIRESTORE_BASE_URL_ENV: &str = "FIRESTORE_BASE_URL";
/// When set to `1`, refuse to talk to the production endpoints (test harnesses).
const BLOCK_REAL_API_ENV: &str = "USERDECK_BLOCK_REAL_API";

/// Resolved connection settings for a Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub project_id: String,
    pub database: String,
    pub auth_base_url: String,
    pub firestore_base_url: String,
    pub page_size: u32,
    pub timeout: Option<Duration>,
}

impl FirebaseSettings {
    /// Resolves settings from config and environment.
    ///
    /// API key and project id: config > env.
    /// Base URLs: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the API key or project id is missing, or a base
    /// URL is malformed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let firebase = &config.firebase;
        let api_key = resolve_setting(firebase.effective_api_key(), API_KEY_ENV, "api_key")?;
        let project_id =
            resolve_setting(firebase.effective_project_id(), PROJECT_ID_ENV, "project_id")?;
        let auth_base_url = resolve_base_url(
            firebase.effective_auth_base_url(),
            AUTH_BASE_URL_ENV,
            DEFAULT_AUTH_BASE_URL,
        )?;
        let firestore_base_url = resolve_base_url(
            firebase.effective_firestore_base_url(),
            FIRESTORE_BASE_URL_ENV,
            DEFAULT_FIRESTORE_BASE_URL,
        )?;

        Ok(Self {
            api_key,
            project_id,
            database: firebase.database.clone(),
            auth_base_url,
            firestore_base_url,
            page_size: firebase.page_size.max(1),
            timeout: config.request_timeout(),
        })
    }

    /// Builds the shared HTTP client.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to build HTTP client")
    }
}

/// Builds Firebase-backed collaborators sharing one session.
///
/// # Errors
/// Returns an error if settings cannot be resolved.
pub fn collaborators(config: &Config) -> Result<Collaborators> {
    let settings = FirebaseSettings::from_config(config)?;
    let http = settings.http_client()?;
    let session = SessionHandle::new();

    let auth = FirebaseAuth::new(&settings, http.clone(), session.clone());
    let store = FirestoreStore::new(&settings, http, session)?;
    Ok(Collaborators::new(Arc::new(auth), Arc::new(store)))
}

/// Resolves a required setting with precedence: config > env.
fn resolve_setting(config_value: Option<&str>, env_var: &str, key: &str) -> Result<String> {
    if let Some(value) = config_value {
        return Ok(value.to_string());
    }

    std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("No Firebase {key} available. Set {env_var} or {key} in [firebase]."))
}

/// Resolves a base URL with precedence: env > config > default.
fn resolve_base_url(config_base_url: Option<&str>, env_var: &str, default_url: &str) -> Result<String> {
    let env_url = std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let url = env_url
        .or_else(|| config_base_url.map(str::to_string))
        .unwrap_or_else(|| default_url.to_string());

    url::Url::parse(&url).with_context(|| format!("Invalid Firebase base URL: {url}"))?;

    if url == default_url && std::env::var(BLOCK_REAL_API_ENV).is_ok_and(|v| v == "1") {
        anyhow::bail!(
            "{BLOCK_REAL_API_ENV}=1 but trying to use production endpoint {url}.\n\
             Set {env_var} to a mock server."
        );
    }

    Ok(url.trim_end_matches('/').to_string())
}

/// Error envelope shared by the Firebase REST APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    /// Canonical status (`NOT_FOUND`, `PERMISSION_DENIED`, ...), Firestore only.
    #[serde(default)]
    pub status: Option<String>,
}

/// Parses an error body, falling back to the raw text.
pub(crate) fn parse_error_body(body: &str) -> ApiErrorBody {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| ApiErrorBody {
            message: body.trim().to_string(),
            status: None,
        },
        |envelope| envelope.error,
    )
}
