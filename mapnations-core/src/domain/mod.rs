//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod country;
pub mod credential;
pub mod result;
mod route;
mod user;

pub use country::{
    Country, CountryName, Currency, ImageLinks, MapLinks, NativeName, Region, RegionFilter,
};
pub use credential::{Argon2Params, PasswordHash, StoredSecret};
pub use route::Route;
pub use user::{Identity, User};
