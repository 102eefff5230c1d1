//! Domain types and pure storefront logic: catalog records, variant
//! resolution, the comparison set, the address cascade, admin news drafts,
//! reviews, and configuration loading.

pub mod address;
pub mod app_config;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod news;
pub mod notice;
pub mod product;
pub mod review;
pub mod session;
pub mod slug;
pub mod variant;

use thiserror::Error;

pub use address::{AddressSelection, LocationOption};
pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog_rules, CatalogRules};
pub use comparison::{CompareField, ComparisonSet, ComparisonState, MAX_COMPARED, PATH_SEPARATOR};
pub use config::{load_app_config, load_app_config_from_env};
pub use news::{NewsDraft, NewsItem, SaveAction};
pub use notice::{Notice, Severity};
pub use product::{Product, ProductSpecs, Rating, VariantSpec};
pub use review::{ProductReviews, Review, ReviewDraft, ReviewStats};
pub use session::Session;
pub use slug::slugify;
pub use variant::{Resolution, VariantGroup, VariantKey};

/// Validation and state errors raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("comparison is full: at most {max} products can be compared")]
    ComparisonFull { max: usize },

    #[error("product {id} is already in the comparison")]
    AlreadyInComparison { id: String },

    #[error("storage tier {storage} is not offered for {base_product_name}")]
    UnknownStorageTier {
        base_product_name: String,
        storage: String,
    },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("discount {0} is outside 0..=100")]
    InvalidDiscount(String),

    #[error("rating {0} is outside 1..=5")]
    InvalidRating(u8),

    #[error("too many images: {count} selected, at most {max} allowed")]
    TooManyImages { count: usize, max: usize },

    #[error("please log in to {action}")]
    NotLoggedIn { action: &'static str },

    #[error("{child} cannot be selected before a {parent}")]
    ParentNotSelected {
        child: &'static str,
        parent: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog rules file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog rules file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog rules validation failed: {0}")]
    Validation(String),
}
