//! Credential service - local account registry
//!
//! Identities live as one JSON list under the `users` key. Every operation
//! is a plain read-modify-write of that list.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::result::{Error, Result};
use crate::domain::{Argon2Params, Identity, PasswordHash, StoredSecret, User};
use crate::ports::{read_json, write_json, KeyValueStore};

/// Storage key for the identity list
pub const USERS_KEY: &str = "users";

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 3;

/// Registry of local identities
pub struct CredentialService {
    store: Arc<dyn KeyValueStore>,
    params: Argon2Params,
}

impl CredentialService {
    pub fn new(store: Arc<dyn KeyValueStore>, params: Argon2Params) -> Self {
        Self { store, params }
    }

    fn load(&self) -> Result<Vec<Identity>> {
        Ok(read_json(self.store.as_ref(), USERS_KEY)?.unwrap_or_default())
    }

    fn save(&self, identities: &[Identity]) -> Result<()> {
        write_json(self.store.as_ref(), USERS_KEY, identities)
    }

    /// Create a new identity
    ///
    /// Email uniqueness is checked before username uniqueness, and both
    /// before the new values are validated.
    pub fn register(&self, email: &str, password: &str, username: &str) -> Result<User> {
        let mut identities = self.load()?;

        if identities.iter().any(|i| i.email == email) {
            return Err(Error::DuplicateEmail);
        }
        if identities.iter().any(|i| i.username == username) {
            return Err(Error::DuplicateUsername);
        }

        validate_email(email)?;
        validate_password(password)?;
        validate_username(username)?;

        let identity = Identity {
            email: email.to_string(),
            username: username.to_string(),
            password: StoredSecret::Hashed(PasswordHash::create(password, self.params)?),
            created_at: Some(Utc::now()),
        };
        let user = identity.public();

        identities.push(identity);
        self.save(&identities)?;

        Ok(user)
    }

    /// Check an email/password pair
    ///
    /// Unknown email and wrong password fail the same way. A legacy
    /// clear-text record that matches is re-stored as a hash.
    pub fn verify(&self, email: &str, password: &str) -> Result<User> {
        let mut identities = self.load()?;

        let index = identities
            .iter()
            .position(|i| i.email == email)
            .ok_or(Error::InvalidCredentials)?;

        let identity = &mut identities[index];
        if !identity.password.verify(password)? {
            return Err(Error::InvalidCredentials);
        }

        let user = identity.public();
        if identity.password.is_legacy() {
            identity.password = StoredSecret::Hashed(PasswordHash::create(password, self.params)?);
            self.save(&identities)?;
        }

        Ok(user)
    }

    /// Replace the password of the identity named `username`
    pub fn update_password(&self, username: &str, new_password: &str) -> Result<()> {
        let mut identities = self.load()?;

        let identity = identities
            .iter_mut()
            .find(|i| i.username == username)
            .ok_or(Error::UserNotFound)?;

        validate_password(new_password)?;
        identity.password = StoredSecret::Hashed(PasswordHash::create(new_password, self.params)?);

        self.save(&identities)
    }

    /// Registered usernames, in registration order
    pub fn list_usernames(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_iter().map(|i| i.username).collect())
    }

    /// Number of identities still holding a clear-text password
    pub fn legacy_count(&self) -> Result<usize> {
        Ok(self.load()?.iter().filter(|i| i.password.is_legacy()).count())
    }
}

fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && trimmed == email => Ok(()),
        _ => Err(Error::validation("Please enter a valid email address")),
    }
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<()> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(Error::validation(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        )));
    }
    Ok(())
}
