use serde::Deserialize;

use super::domain::{University, UniversityId};

/// Storage abstraction for the university catalog.
pub trait UniversityCatalog: Send + Sync {
    fn list(&self) -> Result<Vec<University>, CatalogError>;
    fn fetch(&self, id: &UniversityId) -> Result<Option<University>, CatalogError>;
    /// Inserts or replaces by id, returning `true` when the entry is new.
    fn upsert(&self, university: University) -> Result<bool, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("university not found: {0}")]
    NotFound(UniversityId),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Listing filters. Every supplied filter must match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub country: Option<String>,
    /// Maximum annual cost.
    #[serde(default)]
    pub budget: Option<f64>,
    /// Worst acceptable ranking position.
    #[serde(default)]
    pub ranking: Option<u32>,
    #[serde(default, alias = "acceptanceRate")]
    pub acceptance_rate: Option<f64>,
    /// Case-insensitive match against name, country, or city.
    #[serde(default)]
    pub search: Option<String>,
}

impl CatalogQuery {
    pub fn is_empty(&self) -> bool {
        self == &CatalogQuery::default()
    }

    /// Numeric filters exclude universities that do not publish the value.
    pub fn matches(&self, university: &University) -> bool {
        if let Some(country) = non_blank(self.country.as_deref()) {
            if university.country != country {
                return false;
            }
        }

        if let Some(budget) = self.budget {
            if !university.annual_cost().is_some_and(|cost| cost <= budget) {
                return false;
            }
        }

        if let Some(ranking) = self.ranking {
            if !university.ranking.is_some_and(|rank| rank <= ranking) {
                return false;
            }
        }

        if let Some(rate) = self.acceptance_rate {
            if !university
                .acceptance_rate
                .is_some_and(|acceptance| acceptance <= rate)
            {
                return false;
            }
        }

        if let Some(search) = non_blank(self.search.as_deref()) {
            let needle = search.to_lowercase();
            let found = [&university.name, &university.country, &university.city]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, universities: Vec<University>) -> Vec<University> {
        universities
            .into_iter()
            .filter(|university| self.matches(university))
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
