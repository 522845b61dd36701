//! Application routes

use std::fmt;
use std::str::FromStr;

use super::result::Error;

/// A navigable location in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    ResetPassword,
    Home,
    Country(String),
    Favorites,
}

impl Route {
    /// Routes that need an authenticated session
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Home | Route::Country(_) | Route::Favorites)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
            Route::Home => "/home".to_string(),
            Route::Country(code) => format!("/country/{}", code),
            Route::Favorites => "/favorites".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };

        match path {
            "/" | "" => Ok(Route::Landing),
            "/login" => Ok(Route::Login),
            "/signup" => Ok(Route::Signup),
            "/reset-password" => Ok(Route::ResetPassword),
            "/home" => Ok(Route::Home),
            "/favorites" => Ok(Route::Favorites),
            other => match other.strip_prefix("/country/") {
                Some(code) if !code.is_empty() && !code.contains('/') => {
                    Ok(Route::Country(code.to_string()))
                }
                _ => Err(Error::validation(format!("Unknown route: {}", s))),
            },
        }
    }
}
