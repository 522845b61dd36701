//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB file and in-memory maps for the KeyValueStore port
//! - REST Countries HTTP client for the CountrySource port
//! - Embedded demo catalog for offline use

pub mod demo;
pub mod duckdb;
pub mod memory;
pub mod restcountries;

#[cfg(test)]
pub mod restcountries_mock;
