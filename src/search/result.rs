//! Search output types

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::projector::BandProjections;
use super::scoring::{NormalizedRates, RateBreakdown};
use crate::product::SavingsProduct;
use crate::query::{RateWeights, ResolvedTerms};

/// One ranked product
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub product: Arc<SavingsProduct>,

    /// Composite score in [0, 1]
    pub score: f64,

    pub rates: RateBreakdown,
    pub normalized: NormalizedRates,

    /// Total deposited over the term
    pub principal: Option<u64>,
    /// Interest at the maximum rate
    pub interest: Option<f64>,
    pub maturity_amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_projections: Option<BandProjections>,

    /// Competition ranks over all eligible products, 1 = highest rate
    pub base_rate_rank: u32,
    pub max_rate_rank: u32,
    pub intermediate_rate_rank: u32,
}

impl SearchResult {
    pub fn product_id(&self) -> Uuid {
        self.product.id
    }
}

fn opt_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.0}", v))
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) score={:.4} base={:.2}% [#{}] max={:.2}% [#{}] mid={:.2}% [#{}] principal={} interest={} maturity={}",
            self.product.name,
            self.product.institution,
            self.score,
            self.rates.base,
            self.base_rate_rank,
            self.rates.max,
            self.max_rate_rank,
            self.rates.intermediate,
            self.intermediate_rate_rank,
            self.principal.map_or_else(|| "-".to_string(), |p| p.to_string()),
            opt_amount(self.interest),
            opt_amount(self.maturity_amount),
        )
    }
}

/// A product dropped from ranking because of a catalog defect
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exclusion {
    pub product_id: Uuid,
    pub product_name: String,
    pub reason: String,
}

/// One page of ranked results
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,

    /// Eligible products before pagination
    pub total: usize,
    pub offset: usize,
    pub top_k: usize,

    pub resolved: ResolvedTerms,

    /// Weights after normalization
    pub weights: RateWeights,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<Exclusion>,
}

impl SearchPage {
    /// More ranked results follow this page; never true for an empty page
    pub fn has_more(&self) -> bool {
        !self.results.is_empty() && self.offset.saturating_add(self.results.len()) < self.total
    }

    pub fn next_offset(&self) -> Option<usize> {
        self.has_more().then(|| self.offset + self.results.len())
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
