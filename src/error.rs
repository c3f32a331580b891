//! Error taxonomy for query validation, catalog integrity and catalog access

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Caller supplied an invalid parameter combination or value
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A tiered base rate has no tier covering the resolved term
    #[error("product {product_id} has no base rate tier covering {term_months} months")]
    NoTierMatch { product_id: Uuid, term_months: u32 },

    /// Failure reported by the catalog store, passed through unchanged
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SearchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SearchError::InvalidQuery(msg.into())
    }

    /// True for errors caused by the caller's input
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, SearchError::InvalidQuery(_))
    }
}

/// Errors raised while reading product data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while reading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
