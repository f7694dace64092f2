//! Screen routes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The screens the application can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Register,
    Login,
    Records,
}

impl Route {
    /// Path used when navigating to this route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Register => "/register",
            Route::Login => "/login",
            Route::Records => "/addData",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Register => "Register",
            Route::Login => "Login",
            Route::Records => "User List",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/register" => Some(Route::Register),
            "/login" => Some(Route::Login),
            "/addData" => Some(Route::Records),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    /// Accepts either a route name (`records`) or its path (`/addData`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(route) = Self::from_path(trimmed) {
            return Ok(route);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "register" => Ok(Route::Register),
            "login" => Ok(Route::Login),
            "records" | "adddata" => Ok(Route::Records),
            other => Err(format!(
                "unknown screen '{other}' (expected register, login or records)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_back_to_routes() {
        for route in [Route::Register, Route::Login, Route::Records] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_names_and_paths() {
        assert_eq!("records".parse::<Route>(), Ok(Route::Records));
        assert_eq!("/addData".parse::<Route>(), Ok(Route::Records));
        assert_eq!("Login".parse::<Route>(), Ok(Route::Login));
        assert!("settings".parse::<Route>().is_err());
    }
}
