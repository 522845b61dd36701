//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
pub mod catalog;
mod credentials;
mod favorites;
pub mod logging;
pub mod migration;
mod navigation;
mod session;

pub use auth::AuthService;
pub use catalog::{CatalogFilter, CatalogQuery, CatalogService};
pub use credentials::{CredentialService, MIN_PASSWORD_LEN, MIN_USERNAME_LEN, USERS_KEY};
pub use favorites::{favorites_key, FavoritesService};
pub use logging::{EntryPoint, EventCount, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use navigation::{NavigationService, LAST_ROUTE_KEY};
pub use session::{Session, SessionState, SESSION_KEY};
