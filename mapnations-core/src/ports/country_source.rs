//! Country catalog port
//!
//! Defines the interface for fetching country records from an external
//! source (REST Countries, the offline demo catalog, test fakes).

use crate::domain::result::Result;
use crate::domain::{Country, Region};

/// Read-only country catalog
///
/// Every call is a fresh fetch; nothing is cached by the source.
pub trait CountrySource: Send + Sync {
    /// Source name (e.g., "restcountries", "demo")
    fn name(&self) -> &str;

    /// Fetch every country
    fn all(&self) -> Result<Vec<Country>>;

    /// Countries whose name matches `term`
    ///
    /// Fails with `EntityNotFound` when nothing matches.
    fn by_name(&self, term: &str) -> Result<Vec<Country>>;

    /// Countries in `region`
    fn by_region(&self, region: Region) -> Result<Vec<Country>>;

    /// The country with alpha code `code`
    ///
    /// Fails with `EntityNotFound` for unknown codes.
    fn by_code(&self, code: &str) -> Result<Country>;

    /// Countries where `language` is spoken (name or code)
    fn by_language(&self, language: &str) -> Result<Vec<Country>>;
}
