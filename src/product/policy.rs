//! Term and deposit-amount eligibility policies
//!
//! Each policy is a tagged union keyed by `policy_type` in the catalog documents,
//! so a variant only ever carries the fields that belong to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::data::PeriodUnit;

/// Allowed contract duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TermPolicy {
    /// Any term between `min_term` and `max_term` (inclusive, open-ended when absent)
    Range {
        min_term: u32,
        #[serde(default)]
        max_term: Option<u32>,
        #[serde(default)]
        term_unit: PeriodUnit,
    },

    /// Exactly one term
    FixedDuration {
        #[serde(alias = "min_term")]
        term: u32,
        #[serde(default)]
        term_unit: PeriodUnit,
    },

    /// One of a discrete set of terms
    Choices {
        choices: Vec<u32>,
        #[serde(default)]
        term_unit: PeriodUnit,
    },

    /// Matures on a calendar date regardless of the opening date
    FixedDate { maturity_date: NaiveDate },
}

impl TermPolicy {
    /// Unit of the term values, `None` for date-based maturity
    pub fn unit(&self) -> Option<PeriodUnit> {
        match self {
            TermPolicy::Range { term_unit, .. }
            | TermPolicy::FixedDuration { term_unit, .. }
            | TermPolicy::Choices { term_unit, .. } => Some(*term_unit),
            TermPolicy::FixedDate { .. } => None,
        }
    }

    /// Eligible term span in days: `(min, max)` with `None` for an open upper bound.
    /// Returns `None` for date-based maturity and empty choice lists.
    pub fn day_bounds(&self) -> Option<(u64, Option<u64>)> {
        match self {
            TermPolicy::Range { min_term, max_term, term_unit } => Some((
                term_unit.to_days(*min_term),
                max_term.map(|m| term_unit.to_days(m)),
            )),
            TermPolicy::FixedDuration { term, term_unit } => {
                let days = term_unit.to_days(*term);
                Some((days, Some(days)))
            }
            TermPolicy::Choices { choices, term_unit } => {
                let min = choices.iter().min()?;
                let max = choices.iter().max()?;
                Some((term_unit.to_days(*min), Some(term_unit.to_days(*max))))
            }
            TermPolicy::FixedDate { .. } => None,
        }
    }
}

impl fmt::Display for TermPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermPolicy::Range { min_term, max_term: Some(max), term_unit } => {
                write!(f, "{}-{} {}", min_term, max, term_unit.label())
            }
            TermPolicy::Range { min_term, max_term: None, term_unit } => {
                write!(f, "{}+ {}", min_term, term_unit.label())
            }
            TermPolicy::FixedDuration { term, term_unit } => write!(f, "{} {}", term, term_unit.label()),
            TermPolicy::Choices { choices, term_unit } => {
                let list: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
                write!(f, "{} {}", list.join("/"), term_unit.label())
            }
            TermPolicy::FixedDate { maturity_date } => write!(f, "until {}", maturity_date),
        }
    }
}

/// Allowed deposit per payment period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountPolicy {
    /// Any amount between the bounds (inclusive, open-ended when `max_amount` is absent)
    Range {
        #[serde(default)]
        min_amount: u64,
        #[serde(default)]
        max_amount: Option<u64>,
        #[serde(default)]
        amount_unit: PeriodUnit,
    },

    /// One of a discrete set of amounts
    Choices {
        choices: Vec<u64>,
        #[serde(default)]
        amount_unit: PeriodUnit,
    },

    /// Exactly one amount
    FixedAmount {
        fixed_amount: u64,
        #[serde(default)]
        amount_unit: PeriodUnit,
    },
}

impl AmountPolicy {
    /// Payment period of the amounts
    pub fn unit(&self) -> PeriodUnit {
        match self {
            AmountPolicy::Range { amount_unit, .. }
            | AmountPolicy::Choices { amount_unit, .. }
            | AmountPolicy::FixedAmount { amount_unit, .. } => *amount_unit,
        }
    }

    /// Smallest annualized deposit the policy accepts, if bounded below
    pub fn annual_floor(&self) -> Option<u64> {
        match self {
            AmountPolicy::Range { min_amount, amount_unit, .. } => Some(amount_unit.annualize(*min_amount)),
            AmountPolicy::Choices { choices, amount_unit } => {
                choices.iter().min().map(|c| amount_unit.annualize(*c))
            }
            AmountPolicy::FixedAmount { fixed_amount, amount_unit } => Some(amount_unit.annualize(*fixed_amount)),
        }
    }
}

impl fmt::Display for AmountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per = match self.unit() {
            PeriodUnit::Day => "day",
            PeriodUnit::Month => "month",
            PeriodUnit::Year => "year",
        };
        match self {
            AmountPolicy::Range { min_amount, max_amount: Some(max), .. } => {
                write!(f, "{}-{} per {}", min_amount, max, per)
            }
            AmountPolicy::Range { min_amount, max_amount: None, .. } => {
                write!(f, "{}+ per {}", min_amount, per)
            }
            AmountPolicy::Choices { choices, .. } => {
                let list: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
                write!(f, "{} per {}", list.join("/"), per)
            }
            AmountPolicy::FixedAmount { fixed_amount, .. } => write!(f, "{} per {}", fixed_amount, per),
        }
    }
}
