use thiserror::Error;

pub mod app_config;
pub mod categories;
pub mod compare;
pub mod config;
pub mod import;
pub mod offers;
pub mod options;
pub mod query;
pub mod store;
pub mod vendors;

#[cfg(test)]
mod test_support;

pub use app_config::{AppConfig, Environment};
pub use categories::{finish_label, format_label, is_folders, resolve_category, Category, CATEGORIES};
pub use compare::{compare, rank_offers};
pub use config::{load_app_config, load_app_config_from_env};
pub use import::{parse_offers_csv, ImportError, ParsedOffers};
pub use offers::{ComparisonResult, Offer, Vendor};
pub use options::{collect_options, list_options, OptionRow, ProductOptions};
pub use query::{CompareQuery, CompareRequest, QuantityInput};
pub use store::{CatalogStore, OfferFilter, StoreError};
pub use vendors::{load_vendors, VendorConfig, VendorsFile};

/// Errors surfaced by the comparison engine.
///
/// Integrity gaps and empty results never show up here; they are absorbed
/// inside the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("catalog store unavailable")]
    StoreUnavailable(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read vendors file {path}: {source}")]
    VendorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse vendors file: {0}")]
    VendorsFileParse(#[source] serde_yaml::Error),
    #[error("vendors validation failed: {0}")]
    Validation(String),
}
