//! Auth feature reducer.
//!
//! Handles form editing, submission, and collaborator results for the
//! register and login screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use userdeck_core::Route;

use super::state::{AuthFocus, AuthFormState, AuthMode};
use crate::effects::UiEffect;
use crate::events::AuthUiEvent;

pub fn handle_key(form: &mut AuthFormState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            vec![]
        }
        KeyCode::Enter if form.focus == AuthFocus::LoginLink => follow_login_link(),
        KeyCode::Enter => submit(form),
        KeyCode::Char('l')
            if key.modifiers.contains(KeyModifiers::CONTROL) && form.mode == AuthMode::Register =>
        {
            follow_login_link()
        }
        _ => {
            if let Some(field) = form.focused_field_mut() {
                field.input(key);
            }
            vec![]
        }
    }
}

pub fn handle_paste(form: &mut AuthFormState, text: &str) {
    if let Some(field) = form.focused_field_mut() {
        field.insert_str(text);
    }
}

fn follow_login_link() -> Vec<UiEffect> {
    vec![UiEffect::Navigate {
        route: Route::Login,
    }]
}

/// Submits the form. Both fields are required.
pub fn submit(form: &AuthFormState) -> Vec<UiEffect> {
    if form.email.is_empty() || form.password.is_empty() {
        tracing::warn!("Email and password are required");
        return vec![];
    }

    let email = form.email.value().to_string();
    let password = form.password.value().to_string();
    match form.mode {
        AuthMode::Register => vec![UiEffect::CreateAccount { email, password }],
        AuthMode::Login => vec![UiEffect::VerifyCredentials { email, password }],
    }
}

/// Handles an auth collaborator result.
///
/// Success navigates on (register -> login, login -> records). Failure is
/// logged and the form stays as it was.
pub fn handle_result(form: &AuthFormState, event: AuthUiEvent) -> Vec<UiEffect> {
    match (form.mode, event) {
        (AuthMode::Register, AuthUiEvent::Registered { result, .. }) => match result {
            Ok(email) => {
                tracing::info!(%email, "User registered successfully");
                vec![UiEffect::Navigate {
                    route: Route::Login,
                }]
            }
            Err(error) => {
                tracing::error!(%error, "Registration error");
                vec![]
            }
        },
        (AuthMode::Login, AuthUiEvent::SignedIn { result, .. }) => match result {
            Ok(email) => {
                tracing::info!(%email, "User signed in successfully");
                vec![UiEffect::Navigate {
                    route: Route::Records,
                }]
            }
            Err(error) => {
                tracing::error!(%error, "Sign-in error");
                vec![]
            }
        },
        (mode, event) => {
            tracing::debug!(?mode, ?event, "Ignoring auth result for another form");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MountId;

    fn filled(mode: AuthMode, email: &str, password: &str) -> AuthFormState {
        let mut form = AuthFormState::new(mode);
        form.email.set(email);
        form.password.set(password);
        form
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let form = filled(AuthMode::Register, "a@example.com", "");
        assert!(submit(&form).is_empty());
        let form = filled(AuthMode::Login, "", "secret1");
        assert!(submit(&form).is_empty());
    }

    #[test]
    fn test_submit_register_creates_account() {
        let form = filled(AuthMode::Register, "a@example.com", "secret1");
        assert_eq!(
            submit(&form),
            [UiEffect::CreateAccount {
                email: "a@example.com".to_string(),
                password: "secret1".to_string(),
            }]
        );
    }

    #[test]
    fn test_enter_on_link_navigates_to_login() {
        let mut form = AuthFormState::new(AuthMode::Register);
        form.focus = AuthFocus::LoginLink;
        let effects = handle_key(&mut form, KeyEvent::from(KeyCode::Enter));
        assert_eq!(
            effects,
            [UiEffect::Navigate {
                route: Route::Login
            }]
        );
    }

    #[test]
    fn test_ctrl_l_only_on_register() {
        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        let mut form = AuthFormState::new(AuthMode::Login);
        assert!(handle_key(&mut form, key).is_empty());
        assert!(form.email.is_empty());
    }

    #[test]
    fn test_register_success_goes_to_login() {
        let form = AuthFormState::new(AuthMode::Register);
        let effects = handle_result(
            &form,
            AuthUiEvent::Registered {
                mount: MountId(1),
                result: Ok("a@example.com".to_string()),
            },
        );
        assert_eq!(
            effects,
            [UiEffect::Navigate {
                route: Route::Login
            }]
        );
    }

    #[test]
    fn test_login_failure_stays() {
        let form = filled(AuthMode::Login, "a@example.com", "wrong");
        let effects = handle_result(
            &form,
            AuthUiEvent::SignedIn {
                mount: MountId(1),
                result: Err("INVALID_LOGIN_CREDENTIALS".to_string()),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(form.email.value(), "a@example.com");
    }
}
