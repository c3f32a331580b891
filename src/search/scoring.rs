//! Rate bands, min-max normalization and composite scoring

use serde::Serialize;

use super::config::ScoringMode;
use crate::error::SearchError;
use crate::product::SavingsProduct;
use crate::query::RateWeights;

/// Effective annual rates (%) of a product for one term
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBreakdown {
    /// Base rate for the term
    pub base: f64,
    /// Base plus the best tier of every preferential group
    pub max: f64,
    /// Base plus the best tier of every user-choice group
    pub intermediate: f64,
}

impl RateBreakdown {
    /// Compute the bands for `term_months`
    ///
    /// A tiered base rate without a tier for the term is a catalog defect and is
    /// reported as `NoTierMatch` rather than scored as zero.
    pub fn for_term(product: &SavingsProduct, term_months: u32) -> Result<Self, SearchError> {
        let base = product
            .base_interest_rate
            .rate_for_term(term_months)
            .ok_or(SearchError::NoTierMatch {
                product_id: product.id,
                term_months,
            })?;

        Ok(Self {
            base,
            max: base + product.max_preferential_sum(),
            intermediate: base + product.user_choice_preferential_sum(),
        })
    }
}

/// Observed min and max of one band over the candidate set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(r) => Some(Self { min: r.min.min(v), max: r.max.max(v) }),
        })
    }

    /// Position of `value` in the range, 0 when every candidate shares one value
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Per-band ranges over the eligible candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateStats {
    pub base: RateRange,
    pub max: RateRange,
    pub intermediate: RateRange,
}

impl RateStats {
    /// `None` for an empty candidate set
    pub fn from_breakdowns(rates: &[RateBreakdown]) -> Option<Self> {
        Some(Self {
            base: RateRange::from_values(rates.iter().map(|r| r.base))?,
            max: RateRange::from_values(rates.iter().map(|r| r.max))?,
            intermediate: RateRange::from_values(rates.iter().map(|r| r.intermediate))?,
        })
    }

    pub fn normalize(&self, rates: &RateBreakdown) -> NormalizedRates {
        NormalizedRates {
            base: self.base.normalize(rates.base),
            max: self.max.normalize(rates.max),
            intermediate: self.intermediate.normalize(rates.intermediate),
        }
    }
}

/// Bands scaled to [0, 1] across the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NormalizedRates {
    pub base: f64,
    pub max: f64,
    pub intermediate: f64,
}

/// Weighted sum of normalized bands using already-normalized weights
pub fn composite_score(rates: &NormalizedRates, weights: &RateWeights, mode: ScoringMode) -> f64 {
    let two_band = rates.base * weights.base + rates.max * weights.max;
    match mode {
        ScoringMode::ThreeBand => two_band + rates.intermediate * weights.intermediate,
        ScoringMode::TwoBand => two_band,
    }
}
