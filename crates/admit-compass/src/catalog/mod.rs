//! University catalog: read models, listing filters, and seed data.

pub mod domain;
pub mod repository;
pub mod seed;

pub use domain::{University, UniversityId, UniversityRequirements};
pub use repository::{CatalogError, CatalogQuery, UniversityCatalog};
pub use seed::{
    default_catalog, import_universities, load_catalog_csv, CatalogImportError, ImportSummary,
};
