use userdeck_core::Route;

use crate::common::TextField;

/// Which credential form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Register,
    Login,
}

impl AuthMode {
    pub fn route(self) -> Route {
        match self {
            AuthMode::Register => Route::Register,
            AuthMode::Login => Route::Login,
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Register => "Register/SignUp",
            AuthMode::Login => "Sign In",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Email,
    Password,
    Submit,
    /// "Already registered? Login" (register form only).
    LoginLink,
}

/// Email/password form state.
#[derive(Debug, Clone)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub email: TextField,
    pub password: TextField,
    pub focus: AuthFocus,
}

impl AuthFormState {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: TextField::new(),
            password: TextField::masked(),
            focus: AuthFocus::Email,
        }
    }

    fn focus_order(&self) -> &'static [AuthFocus] {
        match self.mode {
            AuthMode::Register => &[
                AuthFocus::Email,
                AuthFocus::Password,
                AuthFocus::Submit,
                AuthFocus::LoginLink,
            ],
            AuthMode::Login => &[AuthFocus::Email, AuthFocus::Password, AuthFocus::Submit],
        }
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + order.len() - 1) % order.len()];
    }

    /// The text field under focus, if any.
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            AuthFocus::Email => Some(&mut self.email),
            AuthFocus::Password => Some(&mut self.password),
            AuthFocus::Submit | AuthFocus::LoginLink => None,
        }
    }
}
