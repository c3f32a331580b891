//! Catalog access
//!
//! The engine only needs a superset of the eligible products for one query. A store
//! may use the resolved deposit and term in `CandidateFilter` to push simple
//! predicates down, but must never drop a product the eligibility filter would keep.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::product::{self, SavingsProduct};
use crate::query::ResolvedTerms;

/// Predicates a store may push down when fetching candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFilter {
    pub monthly_deposit: u64,
    pub total_term_months: u32,
}

impl From<&ResolvedTerms> for CandidateFilter {
    fn from(terms: &ResolvedTerms) -> Self {
        Self {
            monthly_deposit: terms.monthly_deposit,
            total_term_months: terms.total_term_months,
        }
    }
}

/// Read-only source of candidate products
pub trait Catalog: Send + Sync {
    /// Fetch every product that may match the filter
    fn fetch_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Arc<SavingsProduct>>, CatalogError>;
}

/// Catalog snapshot held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Arc<SavingsProduct>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<SavingsProduct>) -> Self {
        Self {
            products: products.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build from a JSON array file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        product::load_catalog(path).map(Self::new)
    }

    /// Build from a reader producing a JSON array
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        product::load_catalog_from_reader(reader).map(Self::new)
    }

    pub fn products(&self) -> &[Arc<SavingsProduct>] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn fetch_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Arc<SavingsProduct>>, CatalogError> {
        let annual_deposit = filter.monthly_deposit.saturating_mul(12);
        // Only the deposit floor is pushed down; everything else is left to eligibility
        Ok(self
            .products
            .iter()
            .filter(|p| p.amount.annual_floor().map_or(true, |floor| floor <= annual_deposit))
            .cloned()
            .collect())
    }
}
