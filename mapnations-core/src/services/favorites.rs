//! Favorites service - per-user saved countries
//!
//! Each user's favorites are a JSON list of country records under
//! `favorites_<username>`. The list behaves as a set keyed by the country
//! code, kept in insertion order. Without an active session every operation
//! is a no-op: reads come back empty and writes change nothing.

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::Country;
use crate::ports::{read_json, write_json, KeyValueStore};

use super::session::SessionState;

/// Storage key for `username`'s favorites
pub fn favorites_key(username: &str) -> String {
    format!("favorites_{}", username)
}

pub struct FavoritesService {
    store: Arc<dyn KeyValueStore>,
    session: Arc<SessionState>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn KeyValueStore>, session: Arc<SessionState>) -> Self {
        Self { store, session }
    }

    fn load(&self, username: &str) -> Result<Vec<Country>> {
        let stored: Vec<Country> =
            read_json(self.store.as_ref(), &favorites_key(username))?.unwrap_or_default();

        // Older lists were appended to without a membership check
        let mut unique: Vec<Country> = Vec::with_capacity(stored.len());
        for country in stored {
            if !unique.iter().any(|c| same_code(&c.cca3, &country.cca3)) {
                unique.push(country);
            }
        }
        Ok(unique)
    }

    fn save(&self, username: &str, favorites: &[Country]) -> Result<()> {
        write_json(self.store.as_ref(), &favorites_key(username), favorites)
    }

    /// The active user's favorites, in the order they were added
    pub fn list(&self) -> Result<Vec<Country>> {
        match self.session.username() {
            Some(username) => self.load(&username),
            None => Ok(Vec::new()),
        }
    }

    /// Add `country`; returns whether the set changed
    pub fn add(&self, country: &Country) -> Result<bool> {
        let Some(username) = self.session.username() else {
            return Ok(false);
        };

        let mut favorites = self.load(&username)?;
        if favorites.iter().any(|c| same_code(&c.cca3, &country.cca3)) {
            return Ok(false);
        }

        favorites.push(country.clone());
        self.save(&username, &favorites)?;
        Ok(true)
    }

    /// Remove the country with `code`; returns whether the set changed
    pub fn remove(&self, code: &str) -> Result<bool> {
        let Some(username) = self.session.username() else {
            return Ok(false);
        };

        let mut favorites = self.load(&username)?;
        let before = favorites.len();
        favorites.retain(|c| !same_code(&c.cca3, code));
        if favorites.len() == before {
            return Ok(false);
        }

        self.save(&username, &favorites)?;
        Ok(true)
    }

    /// Whether the country with `code` is a favorite of the active user
    pub fn contains(&self, code: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|c| same_code(&c.cca3, code)))
    }

    /// Favorites whose display name equals `name` (case-insensitive)
    ///
    /// Display names are not unique, so this can return several countries.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<Country>> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.display_name().to_lowercase() == needle)
            .collect())
    }

    /// Favorites matching `key` as a code, or else as a display name
    pub fn lookup(&self, key: &str) -> Result<Vec<Country>> {
        let by_code: Vec<Country> = self
            .list()?
            .into_iter()
            .filter(|c| same_code(&c.cca3, key))
            .collect();
        if !by_code.is_empty() {
            return Ok(by_code);
        }
        self.find_by_name(key)
    }
}

fn same_code(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
