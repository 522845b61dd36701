//! Catalog service - search and filters over the country source
//!
//! Queries go to the configured [`CountrySource`]. The free functions at the
//! bottom narrow lists already in memory and back the offline catalog.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Country, Region, RegionFilter};
use crate::ports::CountrySource;

/// Which slice of the catalog to show
///
/// Region and language narrow the catalog exclusively: choosing one replaces
/// the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    Region(Region),
    Language(String),
}

impl From<RegionFilter> for CatalogFilter {
    fn from(filter: RegionFilter) -> Self {
        match filter {
            RegionFilter::All => CatalogFilter::All,
            RegionFilter::Only(region) => CatalogFilter::Region(region),
        }
    }
}

/// A catalog browse request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    /// Name search; when non-blank it takes precedence over `filter`
    pub search: Option<String>,
    pub filter: CatalogFilter,
}

impl CatalogQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn region(mut self, region: RegionFilter) -> Self {
        self.filter = region.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.filter = if language.trim().is_empty() {
            CatalogFilter::All
        } else {
            CatalogFilter::Language(language)
        };
        self
    }

    /// The search term, if one is set and not blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

pub struct CatalogService {
    source: Arc<dyn CountrySource>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CountrySource>) -> Self {
        Self { source }
    }

    /// Name of the backing source, for status output
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Run a browse query
    ///
    /// A name or language with no matches is an empty list, not an error.
    pub fn browse(&self, query: &CatalogQuery) -> Result<Vec<Country>> {
        let result = match (query.search_term(), &query.filter) {
            (Some(term), _) => self.source.by_name(term),
            (None, CatalogFilter::All) => self.source.all(),
            (None, CatalogFilter::Region(region)) => self.source.by_region(*region),
            (None, CatalogFilter::Language(language)) => self.source.by_language(language.trim()),
        };

        match result {
            Ok(countries) => Ok(countries),
            Err(Error::EntityNotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Full record for one country
    pub fn country(&self, code: &str) -> Result<Country> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::validation("Country code is required"));
        }
        self.source.by_code(code)
    }

    /// Neighbouring countries; codes the source does not know are skipped
    pub fn borders(&self, country: &Country) -> Result<Vec<Country>> {
        let mut neighbours = Vec::with_capacity(country.borders.len());
        for code in &country.borders {
            match self.source.by_code(code) {
                Ok(neighbour) => neighbours.push(neighbour),
                Err(Error::EntityNotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(neighbours)
    }
}

/// Countries whose common or official name contains `term`, case-insensitive
///
/// A blank term matches everything.
pub fn search_by_name(countries: &[Country], term: &str) -> Vec<Country> {
    let needle = term.trim().to_lowercase();
    countries
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.common.to_lowercase().contains(&needle)
                || c.name.official.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn filter_by_region(countries: &[Country], region: Region) -> Vec<Country> {
    countries.iter().filter(|c| c.in_region(region)).cloned().collect()
}

/// Countries listing `language` by name or code
pub fn filter_by_language(countries: &[Country], language: &str) -> Vec<Country> {
    countries.iter().filter(|c| c.speaks(language)).cloned().collect()
}

/// Sorted, de-duplicated language names across `countries`
pub fn available_languages(countries: &[Country]) -> Vec<String> {
    countries
        .iter()
        .flat_map(|c| c.language_names())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn sort_by_name(countries: &mut [Country]) {
    countries.sort_by(|a, b| {
        a.display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::demo::DemoCountrySource;

    fn codes(countries: &[Country]) -> Vec<&str> {
        countries.iter().map(|c| c.cca3.as_str()).collect()
    }

    fn with_language(code: &str, name: &str, region: &str, languages: &[(&str, &str)]) -> Country {
        let mut country = Country::new(code, name, region);
        for (code, language) in languages {
            country.languages.insert(code.to_string(), language.to_string());
        }
        country
    }

    fn sample() -> Vec<Country> {
        let mut guinea = with_language("GNQ", "Equatorial Guinea", "Africa", &[("fra", "French"), ("spa", "Spanish")]);
        guinea.name.official = "Republic of Equatorial Guinea".to_string();
        vec![
            with_language("FRA", "France", "Europe", &[("fra", "French")]),
            with_language("ESP", "Spain", "Europe", &[("spa", "Spanish")]),
            guinea,
            with_language("JPN", "Japan", "Asia", &[("jpn", "Japanese")]),
        ]
    }

    /// Records which source method was called
    #[derive(Default)]
    struct RecordingSource {
        calls: Mutex<Vec<String>>,
        fail_with: Option<Error>,
    }

    impl RecordingSource {
        fn answer(&self, call: String) -> Result<Vec<Country>> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(Error::EntityNotFound(m)) => Err(Error::EntityNotFound(m.clone())),
                Some(Error::RemoteFetch(m)) => Err(Error::RemoteFetch(m.clone())),
                _ => Ok(vec![Country::new("FRA", "France", "Europe")]),
            }
        }
    }

    impl CountrySource for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }
        fn all(&self) -> Result<Vec<Country>> {
            self.answer("all".to_string())
        }
        fn by_name(&self, term: &str) -> Result<Vec<Country>> {
            self.answer(format!("name:{}", term))
        }
        fn by_region(&self, region: Region) -> Result<Vec<Country>> {
            self.answer(format!("region:{}", region))
        }
        fn by_code(&self, code: &str) -> Result<Country> {
            self.answer(format!("code:{}", code))?;
            match code {
                "FRA" => Ok(Country::new("FRA", "France", "Europe")),
                _ => Err(Error::EntityNotFound(code.to_string())),
            }
        }
        fn by_language(&self, language: &str) -> Result<Vec<Country>> {
            self.answer(format!("lang:{}", language))
        }
    }

    #[test]
    fn test_search_by_name_is_case_insensitive_substring() {
        let countries = sample();
        assert_eq!(codes(&search_by_name(&countries, "FRAN")), vec!["FRA"]);
        assert_eq!(codes(&search_by_name(&countries, "pa")), vec!["ESP", "JPN"]);
        // Official name also matches
        assert_eq!(codes(&search_by_name(&countries, "republic")), vec!["GNQ"]);
        assert_eq!(search_by_name(&countries, "  ").len(), countries.len());
    }

    #[test]
    fn test_filter_by_region() {
        let countries = sample();
        assert_eq!(codes(&filter_by_region(&countries, Region::Europe)), vec!["FRA", "ESP"]);
        assert!(filter_by_region(&countries, Region::Oceania).is_empty());
    }

    #[test]
    fn test_filter_by_language_matches_name_or_code() {
        let countries = sample();
        assert_eq!(codes(&filter_by_language(&countries, "french")), vec!["FRA", "GNQ"]);
        assert_eq!(codes(&filter_by_language(&countries, "spa")), vec!["ESP", "GNQ"]);
        assert!(filter_by_language(&countries, "Klingon").is_empty());
    }

    #[test]
    fn test_available_languages_sorted_unique() {
        assert_eq!(
            available_languages(&sample()),
            vec!["French", "Japanese", "Spanish"]
        );
    }

    #[test]
    fn test_sort_by_name() {
        let mut countries = sample();
        sort_by_name(&mut countries);
        assert_eq!(codes(&countries), vec!["GNQ", "FRA", "JPN", "ESP"]);
    }

    #[test]
    fn test_selecting_language_replaces_region() {
        let query = CatalogQuery::all()
            .region(RegionFilter::Only(Region::Asia))
            .language("French");
        assert_eq!(query.filter, CatalogFilter::Language("French".to_string()));

        let query = query.region(RegionFilter::Only(Region::Africa));
        assert_eq!(query.filter, CatalogFilter::Region(Region::Africa));

        let query = query.region(RegionFilter::All);
        assert_eq!(query.filter, CatalogFilter::All);
    }

    #[test]
    fn test_blank_language_clears_filter() {
        let query = CatalogQuery::all()
            .region(RegionFilter::Only(Region::Asia))
            .language("  ");
        assert_eq!(query.filter, CatalogFilter::All);

        let source = Arc::new(RecordingSource::default());
        let catalog = CatalogService::new(source.clone());
        catalog.browse(&query).unwrap();
        assert_eq!(*source.calls.lock().unwrap(), vec!["all"]);
    }

    #[test]
    fn test_browse_routes_to_source() {
        let source = Arc::new(RecordingSource::default());
        let catalog = CatalogService::new(source.clone());

        catalog.browse(&CatalogQuery::all()).unwrap();
        catalog
            .browse(&CatalogQuery::all().region(RegionFilter::Only(Region::Europe)))
            .unwrap();
        catalog.browse(&CatalogQuery::all().language("Spanish")).unwrap();
        // Search wins over the filter
        catalog
            .browse(&CatalogQuery::all().language("Spanish").search(" fra "))
            .unwrap();
        // Blank search falls back to the filter
        catalog
            .browse(&CatalogQuery::all().region(RegionFilter::Only(Region::Asia)).search("  "))
            .unwrap();

        assert_eq!(
            *source.calls.lock().unwrap(),
            vec!["all", "region:Europe", "lang:Spanish", "name:fra", "region:Asia"]
        );
    }

    #[test]
    fn test_browse_not_found_is_empty() {
        let source = Arc::new(RecordingSource {
            fail_with: Some(Error::EntityNotFound("none".to_string())),
            ..Default::default()
        });
        let catalog = CatalogService::new(source);

        let found = catalog.browse(&CatalogQuery::all().search("zzz")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_browse_propagates_remote_failure() {
        let source = Arc::new(RecordingSource {
            fail_with: Some(Error::RemoteFetch("HTTP 500".to_string())),
            ..Default::default()
        });
        let catalog = CatalogService::new(source);

        assert!(matches!(
            catalog.browse(&CatalogQuery::all()),
            Err(Error::RemoteFetch(_))
        ));
    }

    #[test]
    fn test_country_requires_code() {
        let catalog = CatalogService::new(Arc::new(DemoCountrySource::new()));
        assert!(matches!(catalog.country(" "), Err(Error::Validation(_))));
        assert_eq!(catalog.country("jpn").unwrap().cca3, "JPN");
    }

    #[test]
    fn test_borders_skip_unknown_codes() {
        let source = Arc::new(RecordingSource::default());
        let catalog = CatalogService::new(source);

        let mut belgium = Country::new("BEL", "Belgium", "Europe");
        belgium.borders = vec!["FRA".to_string(), "XXX".to_string()];

        assert_eq!(codes(&catalog.borders(&belgium).unwrap()), vec!["FRA"]);
    }
}
