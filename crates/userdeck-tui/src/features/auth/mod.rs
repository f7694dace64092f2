//! Auth feature slice: the register and login forms.

mod render;
mod state;
mod update;

pub use render::render_auth_form;
pub use state::{AuthFocus, AuthFormState, AuthMode};
pub use update::{handle_key, handle_paste, handle_result, submit};
