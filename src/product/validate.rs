//! Catalog integrity checks
//!
//! Ingestion is expected to produce contiguous term tiers that cover the eligible
//! term range and a published maximum at or above every base rate. These checks
//! report where a record breaks those rules; they never modify the record.

use std::fmt;

use super::data::SavingsProduct;
use super::policy::{AmountPolicy, TermPolicy};
use super::rates::{BaseInterestRate, TermTier};

const DAYS_PER_MONTH: u64 = 30;

/// A single integrity problem found in a product record
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    /// Consecutive tiers leave months uncovered
    TierGap { from: u32, to: u32 },
    /// Consecutive tiers both claim the same months
    TierOverlap { at: u32 },
    /// An open-ended tier is followed by another tier
    OpenTierNotLast { min_term: u32 },
    /// Some eligible term has no base rate tier
    TermNotCovered { term_days: u64 },
    /// Published maximum is lower than a base rate
    MaxRateBelowBase { base: f64, published: f64 },
    /// Range policy with min above max
    InvertedRange { min: u64, max: u64 },
    /// Choices policy with no choices
    EmptyChoices,
    /// Negative base or preferential rate
    NegativeRate { rate: f64 },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::TierGap { from, to } => write!(f, "no base rate tier for months {}..{}", from, to),
            CatalogIssue::TierOverlap { at } => write!(f, "base rate tiers overlap at month {}", at),
            CatalogIssue::OpenTierNotLast { min_term } => {
                write!(f, "open-ended tier starting at month {} is not the last tier", min_term)
            }
            CatalogIssue::TermNotCovered { term_days } => {
                write!(f, "eligible term of {} days has no base rate tier", term_days)
            }
            CatalogIssue::MaxRateBelowBase { base, published } => {
                write!(f, "published maximum {:.2}% is below base rate {:.2}%", published, base)
            }
            CatalogIssue::InvertedRange { min, max } => write!(f, "range minimum {} exceeds maximum {}", min, max),
            CatalogIssue::EmptyChoices => write!(f, "choice list is empty"),
            CatalogIssue::NegativeRate { rate } => write!(f, "negative rate {:.2}%", rate),
        }
    }
}

impl SavingsProduct {
    /// Check the record against the catalog invariants
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        check_term_policy(&self.term, &mut issues);
        check_amount_policy(&self.amount, &mut issues);

        if let BaseInterestRate::Tiered(tiers) = &self.base_interest_rate {
            check_tier_layout(tiers, &mut issues);
            check_tier_coverage(tiers, &self.term, &mut issues);
        }

        for rate in self.base_interest_rate.rates() {
            if rate < 0.0 {
                issues.push(CatalogIssue::NegativeRate { rate });
            }
            if self.max_interest_rate < rate {
                issues.push(CatalogIssue::MaxRateBelowBase { base: rate, published: self.max_interest_rate });
            }
        }

        for tier in self.preferential_rates.iter().flat_map(|g| g.tiers.iter()) {
            if tier.interest_rate < 0.0 {
                issues.push(CatalogIssue::NegativeRate { rate: tier.interest_rate });
            }
        }

        issues
    }
}

fn check_term_policy(policy: &TermPolicy, issues: &mut Vec<CatalogIssue>) {
    match policy {
        TermPolicy::Range { min_term, max_term: Some(max), .. } if min_term > max => {
            issues.push(CatalogIssue::InvertedRange { min: *min_term as u64, max: *max as u64 });
        }
        TermPolicy::Choices { choices, .. } if choices.is_empty() => issues.push(CatalogIssue::EmptyChoices),
        _ => {}
    }
}

fn check_amount_policy(policy: &AmountPolicy, issues: &mut Vec<CatalogIssue>) {
    match policy {
        AmountPolicy::Range { min_amount, max_amount: Some(max), .. } if min_amount > max => {
            issues.push(CatalogIssue::InvertedRange { min: *min_amount, max: *max });
        }
        AmountPolicy::Choices { choices, .. } if choices.is_empty() => issues.push(CatalogIssue::EmptyChoices),
        _ => {}
    }
}

fn check_tier_layout(tiers: &[TermTier], issues: &mut Vec<CatalogIssue>) {
    let mut sorted: Vec<&TermTier> = tiers.iter().collect();
    sorted.sort_by_key(|t| t.min_term);

    for pair in sorted.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        match current.max_term {
            None => issues.push(CatalogIssue::OpenTierNotLast { min_term: current.min_term }),
            Some(max) if max < next.min_term => issues.push(CatalogIssue::TierGap { from: max, to: next.min_term }),
            Some(max) if max > next.min_term => issues.push(CatalogIssue::TierOverlap { at: next.min_term }),
            Some(_) => {}
        }
    }
}

/// Whole-month term equal to `days`, if any
fn whole_months(days: u64) -> Option<u32> {
    if days % DAYS_PER_MONTH != 0 {
        return None;
    }
    u32::try_from(days / DAYS_PER_MONTH).ok()
}

/// Tiers must cover the shortest and longest month terms the policy accepts
fn check_tier_coverage(tiers: &[TermTier], policy: &TermPolicy, issues: &mut Vec<CatalogIssue>) {
    let terms: Vec<u32> = match policy {
        TermPolicy::Choices { choices, term_unit } => {
            choices.iter().filter_map(|c| whole_months(term_unit.to_days(*c))).collect()
        }
        _ => match policy.day_bounds() {
            Some((min, max)) => {
                let first = min.div_ceil(DAYS_PER_MONTH);
                let last = max.map(|days| days / DAYS_PER_MONTH);
                if last.is_some_and(|last| last < first) {
                    // No whole-month term fits inside the range
                    return;
                }
                if last.is_none() && !tiers.iter().any(|t| t.max_term.is_none()) {
                    // Open-ended eligibility needs an open-ended top tier
                    let top = tiers.iter().filter_map(|t| t.max_term).max().unwrap_or(0);
                    issues.push(CatalogIssue::TermNotCovered { term_days: top as u64 * DAYS_PER_MONTH });
                }
                [Some(first), last]
                    .into_iter()
                    .flatten()
                    .filter_map(|months| u32::try_from(months).ok())
                    .collect()
            }
            None => Vec::new(),
        },
    };

    for months in terms {
        if !tiers.iter().any(|t| t.covers(months)) {
            issues.push(CatalogIssue::TermNotCovered { term_days: months as u64 * DAYS_PER_MONTH });
        }
    }
}
