//! Country domain model
//!
//! Mirrors the REST Countries v3.1 record. Countries are never mutated
//! locally; the `cca3` alpha-3 code is the identity.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

/// A country record as returned by the remote catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: CountryName,
    /// ISO 3166-1 alpha-3 code, unique per country
    pub cca3: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub flags: ImageLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_of_arms: Option<ImageLinks>,
    /// Language code -> language name (e.g. "fra" -> "French")
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tld: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<String>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub native_name: BTreeMap<String, NativeName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

/// Flag / coat of arms image URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageLinks {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLinks {
    #[serde(default)]
    pub google_maps: String,
    #[serde(default)]
    pub open_street_maps: String,
}

impl Country {
    /// Create a minimal country record (tests, demo catalog)
    pub fn new(cca3: impl Into<String>, common_name: impl Into<String>, region: impl Into<String>) -> Self {
        let common = common_name.into();
        Self {
            name: CountryName {
                official: common.clone(),
                common,
                native_name: BTreeMap::new(),
            },
            cca3: cca3.into(),
            population: 0,
            area: 0.0,
            region: region.into(),
            subregion: None,
            capital: Vec::new(),
            flags: ImageLinks::default(),
            coat_of_arms: None,
            languages: BTreeMap::new(),
            tld: Vec::new(),
            currencies: BTreeMap::new(),
            borders: Vec::new(),
            timezones: Vec::new(),
            maps: None,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &str {
        &self.name.common
    }

    /// Preferred flag URL (svg first, like the card view)
    pub fn flag_url(&self) -> Option<&str> {
        [self.flags.svg.as_str(), self.flags.png.as_str()]
            .into_iter()
            .find(|url| !url.is_empty())
    }

    /// Language names, in code order
    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.values().map(String::as_str)
    }

    /// Whether the country speaks `language`, matched by name or code, case-insensitive
    pub fn speaks(&self, language: &str) -> bool {
        let needle = language.trim().to_lowercase();
        self.languages
            .iter()
            .any(|(code, name)| code.to_lowercase() == needle || name.to_lowercase() == needle)
    }

    /// Whether the country belongs to `region`
    pub fn in_region(&self, region: Region) -> bool {
        self.region.eq_ignore_ascii_case(region.as_str())
    }
}

/// The fixed set of regions the catalog can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown region '{}'. Expected one of: All, {}",
                    s,
                    Region::ALL.map(|r| r.as_str()).join(", ")
                ))
            })
    }
}

/// Region selection where `All` means no filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl FromStr for RegionFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(RegionFilter::All)
        } else {
            s.parse().map(RegionFilter::Only)
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("All"),
            RegionFilter::Only(region) => region.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRANCE_JSON: &str = r#"{
        "name": {
            "common": "France",
            "official": "French Republic",
            "nativeName": { "fra": { "official": "République française", "common": "France" } }
        },
        "tld": [".fr"],
        "cca3": "FRA",
        "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
        "capital": ["Paris"],
        "region": "Europe",
        "subregion": "Western Europe",
        "languages": { "fra": "French" },
        "borders": ["AND", "BEL", "DEU", "ITA", "LUX", "MCO", "ESP", "CHE"],
        "area": 551695.0,
        "maps": {
            "googleMaps": "https://goo.gl/maps/g7QxxSFsWyTPKuzd7",
            "openStreetMaps": "https://www.openstreetmap.org/relation/1403916"
        },
        "population": 67391582,
        "timezones": ["UTC-10:00", "UTC+01:00"],
        "flags": { "png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg" },
        "coatOfArms": { "png": "https://mainfacts.com/fr.png", "svg": "https://mainfacts.com/fr.svg" },
        "unMember": true
    }"#;

    #[test]
    fn test_parse_full_record() {
        let country: Country = serde_json::from_str(FRANCE_JSON).unwrap();
        assert_eq!(country.cca3, "FRA");
        assert_eq!(country.display_name(), "France");
        assert_eq!(country.name.official, "French Republic");
        assert_eq!(country.name.native_name["fra"].official, "République française");
        assert_eq!(country.capital, vec!["Paris"]);
        assert_eq!(country.currencies["EUR"].symbol, "€");
        assert_eq!(country.borders.len(), 8);
        assert_eq!(country.population, 67_391_582);
        assert_eq!(country.flag_url(), Some("https://flagcdn.com/fr.svg"));
    }

    #[test]
    fn test_parse_sparse_record() {
        // Antarctica-style records miss capital, languages and borders
        let json = r#"{"name": {"common": "Antarctica"}, "cca3": "ATA", "region": "Antarctic"}"#;
        let country: Country = serde_json::from_str(json).unwrap();
        assert!(country.capital.is_empty());
        assert!(country.languages.is_empty());
        assert!(country.flag_url().is_none());
    }

    #[test]
    fn test_speaks_matches_name_or_code() {
        let country: Country = serde_json::from_str(FRANCE_JSON).unwrap();
        assert!(country.speaks("French"));
        assert!(country.speaks("french"));
        assert!(country.speaks("fra"));
        assert!(!country.speaks("German"));
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("europe".parse::<Region>().unwrap(), Region::Europe);
        assert!("Antarctic".parse::<Region>().is_err());
        assert_eq!("All".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!(
            "Asia".parse::<RegionFilter>().unwrap(),
            RegionFilter::Only(Region::Asia)
        );
    }

    #[test]
    fn test_in_region() {
        let country = Country::new("JPN", "Japan", "Asia");
        assert!(country.in_region(Region::Asia));
        assert!(!country.in_region(Region::Europe));
    }
}
