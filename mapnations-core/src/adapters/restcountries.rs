//! REST Countries API client
//!
//! Handles communication with the public REST Countries v3.1 API.
//! All endpoints are unauthenticated GETs returning JSON arrays.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{Country, Region};
use crate::ports::CountrySource;

/// Public API base URL
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `/all` rejects requests without a field list; these are what the list view shows
const LIST_FIELDS: &str = "name,cca3,capital,region,subregion,population,area,flags,languages";

/// REST Countries API client
#[derive(Debug)]
pub struct RestCountriesClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

/// `/alpha` historically answered with either a bare object or an array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Country>),
    One(Box<Country>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Country> {
        match self {
            OneOrMany::Many(countries) => countries,
            OneOrMany::One(country) => vec![*country],
        }
    }
}

impl RestCountriesClient {
    /// Create a client for the public API
    pub fn new() -> Result<Self> {
        Self::new_with_base_url(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client against a custom base URL (mirrors, tests)
    pub fn new_with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", base_url, e)))?;

        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(Error::Config(format!(
                "API URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.cannot_be_a_base() {
            return Err(Error::Config(format!("API URL cannot be a base: {}", base_url)));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: parsed,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/<segments...>` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the country list; `query` names what was asked for in 404s
    fn fetch(&self, url: Url, query: &str) -> Result<Vec<Country>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response, query)?;

        let body: OneOrMany = response
            .json()
            .map_err(|e| Error::remote(format!("Failed to parse REST Countries response: {}", e)))?;

        Ok(body.into_vec())
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::remote(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            Error::remote("Unable to connect to the REST Countries servers")
        } else {
            Error::remote(format!("REST Countries request failed: {}", error))
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, response: &Response, query: &str) -> Result<()> {
        match response.status().as_u16() {
            200 => Ok(()),
            404 => Err(Error::EntityNotFound(query.to_string())),
            429 => Err(Error::remote("REST Countries rate limit exceeded, try again later")),
            status => Err(Error::remote(format!("REST Countries API error: HTTP {}", status))),
        }
    }
}

impl CountrySource for RestCountriesClient {
    fn name(&self) -> &str {
        "restcountries"
    }

    fn all(&self) -> Result<Vec<Country>> {
        let mut url = self.endpoint(&["all"])?;
        url.query_pairs_mut().append_pair("fields", LIST_FIELDS);
        self.fetch(url, "all")
    }

    fn by_name(&self, term: &str) -> Result<Vec<Country>> {
        let url = self.endpoint(&["name", query_segment(term)?])?;
        self.fetch(url, term)
    }

    fn by_region(&self, region: Region) -> Result<Vec<Country>> {
        let url = self.endpoint(&["region", region.as_str()])?;
        self.fetch(url, region.as_str())
    }

    fn by_code(&self, code: &str) -> Result<Country> {
        let url = self.endpoint(&["alpha", query_segment(code)?])?;
        self.fetch(url, code)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::EntityNotFound(code.to_string()))
    }

    fn by_language(&self, language: &str) -> Result<Vec<Country>> {
        let url = self.endpoint(&["lang", query_segment(language)?])?;
        self.fetch(url, language)
    }
}

/// Trimmed user input for a path segment
///
/// Blank and dot-only values would be dropped or resolved by the URL parser
/// and hit a different endpoint, so they match nothing.
fn query_segment(value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        return Err(Error::EntityNotFound(value.to_string()));
    }
    Ok(trimmed)
}
