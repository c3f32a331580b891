//! Base and preferential interest rate structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base rate band for a range of terms, in months
///
/// A tier applies when `min_term <= term < max_term`; `max_term = None` is the
/// open-ended top tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermTier {
    pub min_term: u32,
    #[serde(default)]
    pub max_term: Option<u32>,
    /// Annual rate (%)
    pub interest_rate: f64,
}

impl TermTier {
    pub fn covers(&self, term_months: u32) -> bool {
        self.min_term <= term_months && self.max_term.map_or(true, |max| term_months < max)
    }
}

/// Guaranteed annual rate of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseInterestRate {
    /// Same rate for every term
    Flat(f64),
    /// Rate depends on the contract term
    Tiered(Vec<TermTier>),
}

impl BaseInterestRate {
    /// Rate applicable to `term_months`, `None` if no tier covers it
    pub fn rate_for_term(&self, term_months: u32) -> Option<f64> {
        match self {
            BaseInterestRate::Flat(rate) => Some(*rate),
            BaseInterestRate::Tiered(tiers) => tiers
                .iter()
                .find(|t| t.covers(term_months))
                .map(|t| t.interest_rate),
        }
    }

    /// Highest base rate over all terms
    pub fn highest_rate(&self) -> f64 {
        match self {
            BaseInterestRate::Flat(rate) => *rate,
            BaseInterestRate::Tiered(tiers) => tiers
                .iter()
                .map(|t| t.interest_rate)
                .fold(0.0, f64::max),
        }
    }

    /// All rates the product can pay as a base rate
    pub fn rates(&self) -> Vec<f64> {
        match self {
            BaseInterestRate::Flat(rate) => vec![*rate],
            BaseInterestRate::Tiered(tiers) => tiers.iter().map(|t| t.interest_rate).collect(),
        }
    }
}

impl fmt::Display for BaseInterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseInterestRate::Flat(rate) => write!(f, "{:.2}%", rate),
            BaseInterestRate::Tiered(tiers) => {
                let parts: Vec<String> = tiers
                    .iter()
                    .map(|t| match t.max_term {
                        Some(max) => format!("{}-{}m {:.2}%", t.min_term, max, t.interest_rate),
                        None => format!("{}m+ {:.2}%", t.min_term, t.interest_rate),
                    })
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

/// Category of a preferential rate group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferentialRateType {
    /// Earned by the customer's own actions during the term
    UserChoice,
    /// Decided by the customer's status before opening
    PreCondition,
    /// Event or lottery driven, outside the customer's control
    EventBased,
}

/// One condition inside a preferential group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferentialTier {
    pub condition: String,
    /// Bonus rate (%p)
    pub interest_rate: f64,
}

/// A preferential rate condition with its tiers
///
/// At most one tier of a group can apply to a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferentialRateGroup {
    #[serde(default)]
    pub description: String,
    pub rate_type: PreferentialRateType,
    #[serde(default)]
    pub tiers: Vec<PreferentialTier>,
}

impl PreferentialRateGroup {
    /// Highest tier rate, 0 for a group without tiers
    pub fn best_rate(&self) -> f64 {
        self.tiers.iter().map(|t| t.interest_rate).fold(0.0, f64::max)
    }
}
