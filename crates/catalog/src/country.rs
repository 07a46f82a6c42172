//! Country rows and in-memory listing helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use simroam_core::CountryId;

/// A country the reseller covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    /// ISO 3166-1 alpha-2 code, uppercase (e.g. "KE").
    pub code: String,
    pub name: String,
    pub flag_url: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Country {
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }
}

/// In-memory view over the fetched country rows.
#[derive(Debug, Clone, Default)]
pub struct CountryDirectory {
    countries: Vec<Country>,
}

impl CountryDirectory {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// Active countries, name-sorted for display.
    pub fn active(&self) -> Vec<&Country> {
        let mut active: Vec<&Country> = self
            .countries
            .iter()
            .filter(|c| c.is_active())
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        active
    }

    pub fn by_code(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Case-insensitive substring search over name and code.
    pub fn search(&self, query: &str) -> Vec<&Country> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.active();
        }
        self.countries
            .iter()
            .filter(|c| c.is_active())
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.code.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(code: &str, name: &str, active: bool) -> Country {
        Country {
            id: CountryId::new(),
            code: code.to_string(),
            name: name.to_string(),
            flag_url: None,
            is_active: Some(active),
            created_at: None,
        }
    }

    fn directory() -> CountryDirectory {
        CountryDirectory::new(vec![
            country("KE", "Kenya", true),
            country("UG", "Uganda", true),
            country("TZ", "Tanzania", true),
            country("SO", "Somalia", false),
        ])
    }

    #[test]
    fn active_listing_excludes_inactive_and_sorts_by_name() {
        let dir = directory();
        let names: Vec<&str> = dir.active().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Kenya", "Tanzania", "Uganda"]);
    }

    #[test]
    fn search_matches_name_or_code_case_insensitively() {
        let dir = directory();
        assert_eq!(dir.search("ken").len(), 1);
        assert_eq!(dir.search("ug")[0].name, "Uganda");
        assert!(dir.search("somalia").is_empty()); // inactive
    }

    #[test]
    fn lookup_by_code_ignores_case() {
        let dir = directory();
        assert_eq!(dir.by_code("ke").unwrap().name, "Kenya");
        assert!(dir.by_code("ZZ").is_none());
    }

    #[test]
    fn blank_query_falls_back_to_active_listing() {
        let dir = directory();
        assert_eq!(dir.search("  ").len(), 3);
    }
}
