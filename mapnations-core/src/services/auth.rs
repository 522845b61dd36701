//! Auth service - signup, login, logout and password reset

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::User;

use super::credentials::CredentialService;
use super::session::SessionState;

/// Ties the credential registry to the active session
pub struct AuthService {
    credentials: CredentialService,
    session: Arc<SessionState>,
}

impl AuthService {
    pub fn new(credentials: CredentialService, session: Arc<SessionState>) -> Self {
        Self {
            credentials,
            session,
        }
    }

    /// Register a new identity; does not sign it in
    pub fn sign_up(&self, email: &str, password: &str, username: &str) -> Result<User> {
        self.credentials.register(email, password, username)
    }

    /// Verify credentials and make the identity the active session
    pub fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let user = self.credentials.verify(email, password)?;
        self.session.login(user.clone())?;
        Ok(user)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.session.logout()
    }

    pub fn reset_password(&self, username: &str, new_password: &str) -> Result<()> {
        self.credentials.update_password(username, new_password)
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }
}
