//! Identity Toolkit adapter (email/password accounts).

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{FirebaseSettings, parse_error_body};
use crate::collaborators::{AuthError, AuthProvider};
use crate::session::{Session, SessionHandle};

/// Lifetime assumed when the response omits `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

impl PasswordResponse {
    fn into_session(self, fallback_email: &str) -> Session {
        let lifetime = self
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        Session {
            user_id: self.local_id,
            email: self
                .email
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| fallback_email.to_string()),
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        }
    }
}

/// Auth collaborator backed by the Identity Toolkit REST API.
pub struct FirebaseAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    session: SessionHandle,
}

impl FirebaseAuth {
    pub fn new(settings: &FirebaseSettings, http: reqwest::Client, session: SessionHandle) -> Self {
        Self {
            http,
            base_url: settings.auth_base_url.clone(),
            api_key: settings.api_key.clone(),
            session,
        }
    }

    /// Posts an email/password request to `accounts:{endpoint}` and stores
    /// the resulting session.
    async fn password_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let url = format!("{}/v1/accounts:{endpoint}", self.base_url);
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let parsed: PasswordResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Decode(e.to_string()))?;
        let session = parsed.into_session(email);
        self.session.set(session.clone());
        Ok(session)
    }
}

/// Maps an Identity Toolkit error body to `AuthError::Api`.
///
/// Messages look like `EMAIL_EXISTS` or
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
fn api_error(status: StatusCode, body: &str) -> AuthError {
    let parsed = parse_error_body(body);
    let (code, message) = match parsed.message.split_once(" : ") {
        Some((code, detail)) => (code.trim().to_string(), detail.trim().to_string()),
        None => (parsed.message.clone(), parsed.message.clone()),
    };
    let code = if code.is_empty() {
        status.canonical_reason().unwrap_or("UNKNOWN").to_string()
    } else {
        code
    };
    AuthError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.password_request("signUp", email, password).await
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        self.password_request("signInWithPassword", email, password)
            .await
    }

    fn current_session(&self) -> Option<Session> {
        self.session.get()
    }
}
