//! MapNations Core - country catalog, local accounts and favorites
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Country, Identity, Route, etc.)
//! - **ports**: Trait definitions for external dependencies (KeyValueStore, CountrySource)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, REST Countries, demo catalog)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::demo::DemoCountrySource;
use adapters::duckdb::DuckDbStore;
use adapters::restcountries::RestCountriesClient;
use config::Config;
use ports::{CountrySource, KeyValueStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Country, Region, RegionFilter, Route, User};
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Local store file for regular use
pub const STORE_DB_FILE: &str = "mapnations.duckdb";
/// Local store file while demo mode is on
pub const DEMO_DB_FILE: &str = "demo.duckdb";

/// Main context for MapNations operations
///
/// Holds the configuration, the local store, the shared session and every
/// service built on them.
pub struct MapNationsContext {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub session: Arc<SessionState>,
    pub auth_service: AuthService,
    pub favorites_service: FavoritesService,
    pub catalog_service: CatalogService,
    pub navigation_service: NavigationService,
}

impl MapNationsContext {
    /// Open the context rooted at `data_dir`
    ///
    /// Demo mode switches both the local store file and the country source.
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let config = Config::load(data_dir)?;

        let db_filename = if config.demo_mode { DEMO_DB_FILE } else { STORE_DB_FILE };
        let store: Arc<dyn KeyValueStore> = Arc::new(DuckDbStore::open(&data_dir.join(db_filename))?);

        let source: Arc<dyn CountrySource> = if config.demo_mode {
            Arc::new(DemoCountrySource::new())
        } else {
            Arc::new(RestCountriesClient::new_with_base_url(
                &config.api_base_url,
                config.request_timeout(),
            )?)
        };

        Ok(Self::with_parts(config, store, source))
    }

    /// Wire services over an existing store and country source
    pub fn with_parts(config: Config, store: Arc<dyn KeyValueStore>, source: Arc<dyn CountrySource>) -> Self {
        let session = Arc::new(SessionState::hydrate(Arc::clone(&store)));

        let credentials = CredentialService::new(Arc::clone(&store), config.argon2);
        let auth_service = AuthService::new(credentials, Arc::clone(&session));
        let favorites_service = FavoritesService::new(Arc::clone(&store), Arc::clone(&session));
        let catalog_service = CatalogService::new(source);
        let navigation_service = NavigationService::new(Arc::clone(&store), Arc::clone(&session));

        Self {
            config,
            store,
            session,
            auth_service,
            favorites_service,
            catalog_service,
            navigation_service,
        }
    }

    /// Fetch a country and its neighbours, then record its route
    ///
    /// The route is only recorded once the fetch succeeds, so an unknown
    /// code never becomes the resume target.
    pub fn open_country(&self, code: &str) -> domain::result::Result<(Country, Vec<Country>)> {
        if !self.session.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }
        let country = self.catalog_service.country(code)?;
        let borders = self.catalog_service.borders(&country)?;
        self.navigation_service
            .visit(&Route::Country(country.cca3.clone()))?;
        Ok((country, borders))
    }
}
