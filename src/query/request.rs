//! Caller-supplied search criteria

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Tolerance within which weights are considered to already sum to 1
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Default page size
pub const DEFAULT_TOP_K: usize = 5;

/// Relative importance of each rate band in the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateWeights {
    /// Guaranteed base rate
    #[serde(default)]
    pub base: f64,
    /// Base plus every preferential group
    #[serde(default)]
    pub max: f64,
    /// Base plus user-choice preferential groups
    #[serde(default)]
    pub intermediate: f64,
}

impl Default for RateWeights {
    fn default() -> Self {
        Self {
            base: 0.3,
            max: 0.3,
            intermediate: 0.4,
        }
    }
}

impl RateWeights {
    pub fn new(base: f64, max: f64, intermediate: f64) -> Self {
        Self { base, max, intermediate }
    }

    pub fn sum(&self) -> f64 {
        self.base + self.max + self.intermediate
    }

    /// Validate and scale the weights to sum to 1
    ///
    /// Weights already summing to 1 (within tolerance) are returned unchanged.
    pub fn normalized(&self) -> Result<Self, SearchError> {
        for (name, value) in [("base", self.base), ("max", self.max), ("intermediate", self.intermediate)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::invalid(format!(
                    "weight '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let total = self.sum();
        if total <= 0.0 {
            return Err(SearchError::invalid("weights must sum to a positive number"));
        }

        if (total - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            return Ok(*self);
        }

        Ok(Self {
            base: self.base / total,
            max: self.max / total,
            intermediate: self.intermediate / total,
        })
    }

    /// Same weights with the intermediate band zeroed
    pub fn without_intermediate(&self) -> Self {
        Self { intermediate: 0.0, ..*self }
    }
}

fn default_top_k() -> usize { DEFAULT_TOP_K }

/// A search over the product catalog
///
/// Exactly two of `target_amount`, `monthly_deposit` and `total_term_months`
/// must be supplied; the third is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub weights: RateWeights,

    /// Amount to reach at maturity
    #[serde(default)]
    pub target_amount: Option<u64>,

    /// Deposit per month
    #[serde(default)]
    pub monthly_deposit: Option<u64>,

    /// Contract length in months
    #[serde(default)]
    pub total_term_months: Option<u32>,

    /// Page size
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Number of ranked results to skip
    #[serde(default)]
    pub offset: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            weights: RateWeights::default(),
            target_amount: None,
            monthly_deposit: None,
            total_term_months: None,
            top_k: DEFAULT_TOP_K,
            offset: 0,
        }
    }
}

impl SearchRequest {
    /// Goal amount over a fixed term; the monthly deposit is derived
    pub fn by_target_and_term(target_amount: u64, total_term_months: u32) -> Self {
        Self {
            target_amount: Some(target_amount),
            total_term_months: Some(total_term_months),
            ..Default::default()
        }
    }

    /// Known deposit over a fixed term; the target amount is derived
    pub fn by_monthly_and_term(monthly_deposit: u64, total_term_months: u32) -> Self {
        Self {
            monthly_deposit: Some(monthly_deposit),
            total_term_months: Some(total_term_months),
            ..Default::default()
        }
    }

    /// Goal amount at a known deposit; the term is derived
    pub fn by_target_and_monthly(target_amount: u64, monthly_deposit: u64) -> Self {
        Self {
            target_amount: Some(target_amount),
            monthly_deposit: Some(monthly_deposit),
            ..Default::default()
        }
    }

    pub fn with_weights(mut self, weights: RateWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_page(mut self, top_k: usize, offset: usize) -> Self {
        self.top_k = top_k;
        self.offset = offset;
        self
    }

    /// Number of amount/term parameters supplied
    pub fn supplied_count(&self) -> usize {
        [
            self.target_amount.is_some(),
            self.monthly_deposit.is_some(),
            self.total_term_months.is_some(),
        ]
        .iter()
        .filter(|s| **s)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_already_normalized_unchanged() {
        let w = RateWeights::new(0.3, 0.3, 0.4).normalized().unwrap();
        assert_eq!(w, RateWeights::new(0.3, 0.3, 0.4));
    }

    #[test]
    fn test_weights_scaled_to_unit_sum() {
        let w = RateWeights::new(1.0, 1.0, 0.0).normalized().unwrap();
        assert_relative_eq!(w.base, 0.5);
        assert_relative_eq!(w.max, 0.5);
        assert_relative_eq!(w.intermediate, 0.0);
    }

    #[test]
    fn test_weight_normalization_idempotent() {
        let inputs = [
            RateWeights::new(2.0, 3.0, 5.0),
            RateWeights::new(0.1, 0.0, 0.0),
            RateWeights::new(7.5, 1.25, 0.33),
            RateWeights::default(),
        ];
        for w in inputs {
            let once = w.normalized().unwrap();
            let twice = once.normalized().unwrap();
            assert_eq!(once, twice);
            assert_relative_eq!(once.sum(), 1.0, epsilon = WEIGHT_SUM_TOLERANCE);
        }
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(RateWeights::new(0.0, 0.0, 0.0).normalized().unwrap_err().is_invalid_query());
        assert!(RateWeights::new(-1.0, 2.0, 0.0).normalized().is_err());
        assert!(RateWeights::new(f64::NAN, 1.0, 0.0).normalized().is_err());
    }

    #[test]
    fn test_request_document_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"monthly_deposit": 500000, "total_term_months": 12}"#).unwrap();
        assert_eq!(req, SearchRequest::by_monthly_and_term(500_000, 12));
        assert_eq!(req.top_k, 5);
        assert_eq!(req.offset, 0);
        assert_eq!(req.supplied_count(), 2);
    }

    #[test]
    fn test_negative_page_value_fails_to_parse() {
        let parsed = serde_json::from_str::<SearchRequest>(r#"{"offset": -5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_two_band_weights_renormalized() {
        let w = RateWeights::new(1.0, 1.0, 2.0).without_intermediate().normalized().unwrap();
        assert_relative_eq!(w.base, 0.5);
        assert_relative_eq!(w.max, 0.5);
        assert_eq!(w.intermediate, 0.0);

        let only_mid = RateWeights::new(0.0, 0.0, 1.0).without_intermediate().normalized();
        assert!(only_mid.unwrap_err().is_invalid_query());
    }
}
