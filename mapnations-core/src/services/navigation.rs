//! Navigation service - protected routes and the last visited route

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::Route;
use crate::ports::{read_json, write_json, KeyValueStore};

use super::session::SessionState;

/// Storage key for the last visited path
pub const LAST_ROUTE_KEY: &str = "lastRoute";

pub struct NavigationService {
    store: Arc<dyn KeyValueStore>,
    session: Arc<SessionState>,
}

impl NavigationService {
    pub fn new(store: Arc<dyn KeyValueStore>, session: Arc<SessionState>) -> Self {
        Self { store, session }
    }

    /// Enter `route`, recording it as the last visited path
    ///
    /// Protected routes fail with `NotAuthenticated` for an anonymous
    /// session and are not recorded.
    pub fn visit(&self, route: &Route) -> Result<()> {
        if route.requires_auth() && !self.session.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }
        write_json(self.store.as_ref(), LAST_ROUTE_KEY, &route.path())
    }

    /// The last recorded route; an unparseable value reads as none
    pub fn last_route(&self) -> Result<Option<Route>> {
        let path: Option<String> = read_json(self.store.as_ref(), LAST_ROUTE_KEY)?;
        Ok(path.and_then(|p| p.parse().ok()))
    }

    /// Where a returning user should land
    ///
    /// The last route when the session may enter it, otherwise the home page
    /// for a signed-in user and the login page for everyone else.
    pub fn resume_target(&self) -> Result<Route> {
        let authenticated = self.session.is_authenticated();
        let target = match self.last_route()? {
            Some(route) if authenticated || !route.requires_auth() => route,
            _ if authenticated => Route::Home,
            _ => Route::Login,
        };
        Ok(target)
    }
}
