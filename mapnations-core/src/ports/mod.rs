//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod country_source;
mod storage;

pub use country_source::CountrySource;
pub use storage::{read_json, write_json, KeyValueStore};
