use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{University, UniversityId, UniversityRequirements};
use super::repository::{CatalogError, UniversityCatalog};
use crate::scoring::NumericField;

/// Error raised while importing a catalog CSV.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row}: field '{field}' has invalid value '{value}'")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("duplicate university id '{0}'")]
    DuplicateId(String),
}

/// Parses a catalog export.
///
/// Expected headers: `id,name,country,city,ranking,cost,gpa,ielts,toefl,gre,gmat,
/// acceptance_rate,is_public,is_featured,website,description`. Only `name`,
/// `country`, and `city` are required; blank cells are absent values and a
/// blank `id` is derived from the name.
pub fn load_catalog_csv<R: Read>(reader: R) -> Result<Vec<University>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut universities = Vec::new();
    let mut seen = HashSet::new();

    let headers = csv_reader.headers()?.clone();
    for record in csv_reader.records() {
        let record = record?;
        // Physical line, so quoted multi-line cells do not shift later rows.
        let row_number = record
            .position()
            .map_or(0, |position| position.line() as usize);
        let university = record
            .deserialize::<CatalogRow>(Some(&headers))?
            .into_university(row_number)?;
        if !seen.insert(university.id.clone()) {
            return Err(CatalogImportError::DuplicateId(university.id.0));
        }
        universities.push(university);
    }

    Ok(universities)
}

/// Counts from writing a batch of universities into a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub replaced: usize,
}

/// Upserts each university into `catalog`. Later entries with an id already
/// present replace the stored one.
pub fn import_universities<C>(
    catalog: &C,
    universities: impl IntoIterator<Item = University>,
) -> Result<ImportSummary, CatalogError>
where
    C: UniversityCatalog + ?Sized,
{
    let mut summary = ImportSummary::default();
    for university in universities {
        if catalog.upsert(university)? {
            summary.inserted += 1;
        } else {
            summary.replaced += 1;
        }
    }
    Ok(summary)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ranking: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cost: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gpa: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ielts: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    toefl: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gre: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gmat: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    acceptance_rate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_public: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_featured: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
}

impl CatalogRow {
    fn into_university(self, row: usize) -> Result<University, CatalogImportError> {
        let name = self.name.ok_or(CatalogImportError::MissingField { row, field: "name" })?;
        let country = self
            .country
            .ok_or(CatalogImportError::MissingField { row, field: "country" })?;
        let city = self.city.ok_or(CatalogImportError::MissingField { row, field: "city" })?;

        let ranking = self
            .ranking
            .map(|raw| parse_field::<u32>(row, "ranking", raw))
            .transpose()?;
        let acceptance_rate = self
            .acceptance_rate
            .map(|raw| parse_field::<f64>(row, "acceptance_rate", raw))
            .transpose()?;
        let is_public = self
            .is_public
            .map(|raw| parse_flag(row, "is_public", raw))
            .transpose()?
            .unwrap_or(true);
        let is_featured = self
            .is_featured
            .map(|raw| parse_flag(row, "is_featured", raw))
            .transpose()?
            .unwrap_or(false);

        let requirements = UniversityRequirements {
            gpa: self.gpa.map(NumericField::Text),
            ielts: self.ielts.map(NumericField::Text),
            toefl: self.toefl.map(NumericField::Text),
            gre: self.gre.map(NumericField::Text),
            gmat: self.gmat.map(NumericField::Text),
        };

        Ok(University {
            id: UniversityId(self.id.unwrap_or_else(|| slugify(&name))),
            name,
            country,
            city,
            description: self.description,
            website: self.website,
            ranking,
            cost: self.cost.map(NumericField::Text),
            requirements: Some(requirements),
            acceptance_rate,
            is_public,
            is_featured,
        })
    }
}

fn parse_field<T: std::str::FromStr>(
    row: usize,
    field: &'static str,
    raw: String,
) -> Result<T, CatalogImportError> {
    raw.parse::<T>()
        .map_err(|_| CatalogImportError::InvalidField { row, field, value: raw })
}

fn parse_flag(row: usize, field: &'static str, raw: String) -> Result<bool, CatalogImportError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(CatalogImportError::InvalidField { row, field, value: raw }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Lowercase ASCII slug: `"ETH Zurich"` becomes `"eth-zurich"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

struct SeedEntry {
    name: &'static str,
    country: &'static str,
    city: &'static str,
    description: &'static str,
    website: &'static str,
    ranking: u32,
    cost: f64,
    gpa: f64,
    ielts: f64,
    toefl: f64,
    gre: Option<f64>,
    acceptance_rate: f64,
    is_public: bool,
    is_featured: bool,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        name: "Massachusetts Institute of Technology (MIT)",
        country: "United States",
        city: "Cambridge",
        description: "A world-leading research university known for its excellence in science, engineering, and technology.",
        website: "https://www.mit.edu",
        ranking: 1,
        cost: 55000.0,
        gpa: 3.8,
        ielts: 7.5,
        toefl: 100.0,
        gre: Some(325.0),
        acceptance_rate: 7.3,
        is_public: false,
        is_featured: true,
    },
    SeedEntry {
        name: "Stanford University",
        country: "United States",
        city: "Stanford",
        description: "Located in the heart of Silicon Valley, Stanford is famous for its entrepreneurial spirit and academic excellence.",
        website: "https://www.stanford.edu",
        ranking: 2,
        cost: 56000.0,
        gpa: 3.9,
        ielts: 7.5,
        toefl: 100.0,
        gre: Some(330.0),
        acceptance_rate: 4.4,
        is_public: false,
        is_featured: true,
    },
    SeedEntry {
        name: "University of Oxford",
        country: "United Kingdom",
        city: "Oxford",
        description: "The oldest university in the English-speaking world, offering world-class education and research.",
        website: "https://www.ox.ac.uk",
        ranking: 3,
        cost: 35000.0,
        gpa: 3.7,
        ielts: 7.5,
        toefl: 110.0,
        gre: None,
        acceptance_rate: 17.5,
        is_public: true,
        is_featured: true,
    },
    SeedEntry {
        name: "University of Cambridge",
        country: "United Kingdom",
        city: "Cambridge",
        description: "A global top-tier university with a rich history of scientific discovery and academic tradition.",
        website: "https://www.cam.ac.uk",
        ranking: 4,
        cost: 38000.0,
        gpa: 3.8,
        ielts: 7.5,
        toefl: 110.0,
        gre: None,
        acceptance_rate: 21.0,
        is_public: true,
        is_featured: true,
    },
    SeedEntry {
        name: "ETH Zurich",
        country: "Switzerland",
        city: "Zurich",
        description: "One of the world's leading universities for technology and natural sciences.",
        website: "https://ethz.ch",
        ranking: 7,
        cost: 1500.0,
        gpa: 3.5,
        ielts: 7.0,
        toefl: 100.0,
        gre: None,
        acceptance_rate: 27.0,
        is_public: true,
        is_featured: false,
    },
    SeedEntry {
        name: "National University of Singapore (NUS)",
        country: "Singapore",
        city: "Singapore",
        description: "A leading global university centered in Asia, offering a global approach to education and research.",
        website: "https://www.nus.edu.sg",
        ranking: 11,
        cost: 25000.0,
        gpa: 3.6,
        ielts: 7.0,
        toefl: 95.0,
        gre: None,
        acceptance_rate: 5.0,
        is_public: true,
        is_featured: false,
    },
];

/// Built-in catalog used when no CSV export is configured.
pub fn default_catalog() -> Vec<University> {
    SEED.iter()
        .map(|entry| University {
            id: UniversityId(slugify(entry.name)),
            name: entry.name.to_string(),
            country: entry.country.to_string(),
            city: entry.city.to_string(),
            description: Some(entry.description.to_string()),
            website: Some(entry.website.to_string()),
            ranking: Some(entry.ranking),
            cost: Some(NumericField::Number(entry.cost)),
            requirements: Some(UniversityRequirements {
                gpa: Some(NumericField::Number(entry.gpa)),
                ielts: Some(NumericField::Number(entry.ielts)),
                toefl: Some(NumericField::Number(entry.toefl)),
                gre: entry.gre.map(NumericField::Number),
                gmat: None,
            }),
            acceptance_rate: Some(entry.acceptance_rate),
            is_public: entry.is_public,
            is_featured: entry.is_featured,
        })
        .collect()
}
