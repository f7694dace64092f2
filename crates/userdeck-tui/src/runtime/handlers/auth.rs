use std::sync::Arc;

use userdeck_core::AuthProvider;

use crate::events::{AuthUiEvent, MountId, UiEvent};

/// Creates an account. `Ok` carries the email of the new session.
pub async fn create_account(
    auth: Arc<dyn AuthProvider>,
    mount: MountId,
    email: String,
    password: String,
) -> UiEvent {
    let result = auth
        .create_account(&email, &password)
        .await
        .map(|session| session.email)
        .map_err(|e| e.to_string());
    UiEvent::Auth(AuthUiEvent::Registered { mount, result })
}

/// Verifies credentials. `Ok` carries the email of the new session.
pub async fn verify_credentials(
    auth: Arc<dyn AuthProvider>,
    mount: MountId,
    email: String,
    password: String,
) -> UiEvent {
    let result = auth
        .verify_credentials(&email, &password)
        .await
        .map(|session| session.email)
        .map_err(|e| e.to_string());
    UiEvent::Auth(AuthUiEvent::SignedIn { mount, result })
}
