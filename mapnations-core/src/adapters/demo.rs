//! Offline demo catalog
//!
//! A small embedded set of countries that answers the same queries as the
//! REST Countries API, so the app works without network access.

use std::collections::BTreeMap;

use crate::domain::result::{Error, Result};
use crate::domain::{Country, Currency, ImageLinks, Region};
use crate::ports::CountrySource;
use crate::services::catalog::{filter_by_language, filter_by_region, search_by_name};

/// Demo country source
pub struct DemoCountrySource {
    countries: Vec<Country>,
}

impl DemoCountrySource {
    pub fn new() -> Self {
        Self {
            countries: generate_demo_countries(),
        }
    }
}

impl Default for DemoCountrySource {
    fn default() -> Self {
        Self::new()
    }
}

impl CountrySource for DemoCountrySource {
    fn name(&self) -> &str {
        "demo"
    }

    fn all(&self) -> Result<Vec<Country>> {
        Ok(self.countries.clone())
    }

    fn by_name(&self, term: &str) -> Result<Vec<Country>> {
        non_empty(search_by_name(&self.countries, term), term)
    }

    fn by_region(&self, region: Region) -> Result<Vec<Country>> {
        non_empty(filter_by_region(&self.countries, region), region.as_str())
    }

    fn by_code(&self, code: &str) -> Result<Country> {
        self.countries
            .iter()
            .find(|c| c.cca3.eq_ignore_ascii_case(code.trim()))
            .cloned()
            .ok_or_else(|| Error::EntityNotFound(code.to_string()))
    }

    fn by_language(&self, language: &str) -> Result<Vec<Country>> {
        non_empty(filter_by_language(&self.countries, language), language)
    }
}

/// The remote API answers 404 for empty result sets; match that
fn non_empty(countries: Vec<Country>, query: &str) -> Result<Vec<Country>> {
    if countries.is_empty() {
        Err(Error::EntityNotFound(query.to_string()))
    } else {
        Ok(countries)
    }
}

struct DemoCountry {
    cca3: &'static str,
    common: &'static str,
    official: &'static str,
    region: &'static str,
    subregion: &'static str,
    capital: &'static str,
    population: u64,
    area: f64,
    languages: &'static [(&'static str, &'static str)],
    currency: (&'static str, &'static str, &'static str),
    borders: &'static [&'static str],
    flag: &'static str,
    tld: &'static str,
    timezone: &'static str,
}

const DEMO_COUNTRIES: &[DemoCountry] = &[
    DemoCountry {
        cca3: "FRA", common: "France", official: "French Republic",
        region: "Europe", subregion: "Western Europe", capital: "Paris",
        population: 67_391_582, area: 551_695.0,
        languages: &[("fra", "French")], currency: ("EUR", "Euro", "€"),
        borders: &["BEL", "DEU", "ESP", "ITA", "CHE"], flag: "fr", tld: ".fr", timezone: "UTC+01:00",
    },
    DemoCountry {
        cca3: "DEU", common: "Germany", official: "Federal Republic of Germany",
        region: "Europe", subregion: "Western Europe", capital: "Berlin",
        population: 83_240_525, area: 357_114.0,
        languages: &[("deu", "German")], currency: ("EUR", "Euro", "€"),
        borders: &["BEL", "CHE", "FRA"], flag: "de", tld: ".de", timezone: "UTC+01:00",
    },
    DemoCountry {
        cca3: "BEL", common: "Belgium", official: "Kingdom of Belgium",
        region: "Europe", subregion: "Western Europe", capital: "Brussels",
        population: 11_555_997, area: 30_528.0,
        languages: &[("deu", "German"), ("fra", "French"), ("nld", "Dutch")],
        currency: ("EUR", "Euro", "€"),
        borders: &["FRA", "DEU"], flag: "be", tld: ".be", timezone: "UTC+01:00",
    },
    DemoCountry {
        cca3: "CHE", common: "Switzerland", official: "Swiss Confederation",
        region: "Europe", subregion: "Western Europe", capital: "Bern",
        population: 8_654_622, area: 41_284.0,
        languages: &[("fra", "French"), ("gsw", "Swiss German"), ("ita", "Italian"), ("roh", "Romansh")],
        currency: ("CHF", "Swiss franc", "Fr."),
        borders: &["FRA", "DEU", "ITA"], flag: "ch", tld: ".ch", timezone: "UTC+01:00",
    },
    DemoCountry {
        cca3: "ITA", common: "Italy", official: "Italian Republic",
        region: "Europe", subregion: "Southern Europe", capital: "Rome",
        population: 59_554_023, area: 301_336.0,
        languages: &[("ita", "Italian")], currency: ("EUR", "Euro", "€"),
        borders: &["FRA", "CHE"], flag: "it", tld: ".it", timezone: "UTC+01:00",
    },
    DemoCountry {
        cca3: "ESP", common: "Spain", official: "Kingdom of Spain",
        region: "Europe", subregion: "Southern Europe", capital: "Madrid",
        population: 47_351_567, area: 505_992.0,
        languages: &[("spa", "Spanish")], currency: ("EUR", "Euro", "€"),
        borders: &["FRA"], flag: "es", tld: ".es", timezone: "UTC+01:00",
    },
    DemoCountry {
        cca3: "MEX", common: "Mexico", official: "United Mexican States",
        region: "Americas", subregion: "North America", capital: "Mexico City",
        population: 128_932_753, area: 1_964_375.0,
        languages: &[("spa", "Spanish")], currency: ("MXN", "Mexican peso", "$"),
        borders: &[], flag: "mx", tld: ".mx", timezone: "UTC-06:00",
    },
    DemoCountry {
        cca3: "BRA", common: "Brazil", official: "Federative Republic of Brazil",
        region: "Americas", subregion: "South America", capital: "Brasília",
        population: 212_559_409, area: 8_515_767.0,
        languages: &[("por", "Portuguese")], currency: ("BRL", "Brazilian real", "R$"),
        borders: &[], flag: "br", tld: ".br", timezone: "UTC-03:00",
    },
    DemoCountry {
        cca3: "JPN", common: "Japan", official: "Japan",
        region: "Asia", subregion: "Eastern Asia", capital: "Tokyo",
        population: 125_836_021, area: 377_930.0,
        languages: &[("jpn", "Japanese")], currency: ("JPY", "Japanese yen", "¥"),
        borders: &[], flag: "jp", tld: ".jp", timezone: "UTC+09:00",
    },
    DemoCountry {
        cca3: "IND", common: "India", official: "Republic of India",
        region: "Asia", subregion: "Southern Asia", capital: "New Delhi",
        population: 1_380_004_385, area: 3_287_590.0,
        languages: &[("eng", "English"), ("hin", "Hindi"), ("tam", "Tamil")],
        currency: ("INR", "Indian rupee", "₹"),
        borders: &[], flag: "in", tld: ".in", timezone: "UTC+05:30",
    },
    DemoCountry {
        cca3: "KEN", common: "Kenya", official: "Republic of Kenya",
        region: "Africa", subregion: "Eastern Africa", capital: "Nairobi",
        population: 53_771_300, area: 580_367.0,
        languages: &[("eng", "English"), ("swa", "Swahili")],
        currency: ("KES", "Kenyan shilling", "Sh"),
        borders: &[], flag: "ke", tld: ".ke", timezone: "UTC+03:00",
    },
    DemoCountry {
        cca3: "SEN", common: "Senegal", official: "Republic of Senegal",
        region: "Africa", subregion: "Western Africa", capital: "Dakar",
        population: 16_743_930, area: 196_722.0,
        languages: &[("fra", "French")], currency: ("XOF", "West African CFA franc", "Fr"),
        borders: &[], flag: "sn", tld: ".sn", timezone: "UTC",
    },
    DemoCountry {
        cca3: "AUS", common: "Australia", official: "Commonwealth of Australia",
        region: "Oceania", subregion: "Australia and New Zealand", capital: "Canberra",
        population: 25_687_041, area: 7_692_024.0,
        languages: &[("eng", "English")], currency: ("AUD", "Australian dollar", "$"),
        borders: &[], flag: "au", tld: ".au", timezone: "UTC+10:00",
    },
    DemoCountry {
        cca3: "NZL", common: "New Zealand", official: "New Zealand",
        region: "Oceania", subregion: "Australia and New Zealand", capital: "Wellington",
        population: 5_084_300, area: 270_467.0,
        languages: &[("eng", "English"), ("mri", "Māori"), ("nzs", "New Zealand Sign Language")],
        currency: ("NZD", "New Zealand dollar", "$"),
        borders: &[], flag: "nz", tld: ".nz", timezone: "UTC+12:00",
    },
];

/// Build the demo catalog
pub fn generate_demo_countries() -> Vec<Country> {
    DEMO_COUNTRIES.iter().map(to_country).collect()
}

fn to_country(demo: &DemoCountry) -> Country {
    let mut country = Country::new(demo.cca3, demo.common, demo.region);
    country.name.official = demo.official.to_string();
    country.subregion = Some(demo.subregion.to_string());
    country.capital = vec![demo.capital.to_string()];
    country.population = demo.population;
    country.area = demo.area;
    country.languages = demo
        .languages
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

    let (code, name, symbol) = demo.currency;
    let mut currencies = BTreeMap::new();
    currencies.insert(
        code.to_string(),
        Currency {
            name: name.to_string(),
            symbol: symbol.to_string(),
        },
    );
    country.currencies = currencies;

    country.borders = demo.borders.iter().map(|b| b.to_string()).collect();
    country.flags = ImageLinks {
        png: format!("https://flagcdn.com/w320/{}.png", demo.flag),
        svg: format!("https://flagcdn.com/{}.svg", demo.flag),
    };
    country.tld = vec![demo.tld.to_string()];
    country.timezones = vec![demo.timezone.to_string()];
    country
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let countries = generate_demo_countries();
        let mut codes: Vec<_> = countries.iter().map(|c| c.cca3.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), countries.len());
    }

    #[test]
    fn test_borders_resolve_within_catalog() {
        let source = DemoCountrySource::new();
        for country in source.all().unwrap() {
            for border in &country.borders {
                assert!(source.by_code(border).is_ok(), "{} -> {}", country.cca3, border);
            }
        }
    }

    #[test]
    fn test_queries() {
        let source = DemoCountrySource::new();
        assert_eq!(source.by_code("fra").unwrap().display_name(), "France");
        assert!(matches!(source.by_code("XXX"), Err(Error::EntityNotFound(_))));

        let oceania = source.by_region(Region::Oceania).unwrap();
        assert_eq!(oceania.len(), 2);

        let french = source.by_language("French").unwrap();
        let codes: Vec<_> = french.iter().map(|c| c.cca3.as_str()).collect();
        assert_eq!(codes, vec!["FRA", "BEL", "CHE", "SEN"]);

        assert!(matches!(source.by_name("atlantis"), Err(Error::EntityNotFound(_))));
        assert_eq!(source.by_name("zeal").unwrap()[0].cca3, "NZL");
    }
}
