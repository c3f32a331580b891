//! Derive the missing amount/term parameter of a request
//!
//! - term missing:    term = ceil(target / monthly)
//! - monthly missing: monthly = ceil(target / term)
//! - target missing:  target = monthly * term

use serde::Serialize;

use super::request::SearchRequest;
use crate::error::SearchError;

/// Which parameter the resolver computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedField {
    TotalTermMonths,
    MonthlyDeposit,
    TargetAmount,
}

/// Fully resolved deposit, term and target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedTerms {
    pub monthly_deposit: u64,
    pub total_term_months: u32,
    pub target_amount: u64,
    pub derived: DerivedField,
}

impl ResolvedTerms {
    /// Total deposited over the term
    pub fn principal(&self) -> u64 {
        self.monthly_deposit.saturating_mul(self.total_term_months as u64)
    }
}

fn positive<T: PartialOrd + Default + Copy>(name: &str, value: T) -> Result<T, SearchError> {
    if value > T::default() {
        Ok(value)
    } else {
        Err(SearchError::invalid(format!("{} must be positive", name)))
    }
}

/// Resolve the request's amount/term triple
pub fn resolve(request: &SearchRequest) -> Result<ResolvedTerms, SearchError> {
    match (request.target_amount, request.monthly_deposit, request.total_term_months) {
        (Some(target), Some(monthly), None) => {
            let target = positive("target_amount", target)?;
            let monthly = positive("monthly_deposit", monthly)?;
            let term = u32::try_from(target.div_ceil(monthly))
                .map_err(|_| SearchError::invalid("derived term does not fit in a month count"))?;
            Ok(ResolvedTerms {
                monthly_deposit: monthly,
                total_term_months: term,
                target_amount: target,
                derived: DerivedField::TotalTermMonths,
            })
        }
        (Some(target), None, Some(term)) => {
            let target = positive("target_amount", target)?;
            let term = positive("total_term_months", term)?;
            Ok(ResolvedTerms {
                monthly_deposit: target.div_ceil(term as u64),
                total_term_months: term,
                target_amount: target,
                derived: DerivedField::MonthlyDeposit,
            })
        }
        (None, Some(monthly), Some(term)) => {
            let monthly = positive("monthly_deposit", monthly)?;
            let term = positive("total_term_months", term)?;
            let target = monthly
                .checked_mul(term as u64)
                .ok_or_else(|| SearchError::invalid("target amount overflows"))?;
            Ok(ResolvedTerms {
                monthly_deposit: monthly,
                total_term_months: term,
                target_amount: target,
                derived: DerivedField::TargetAmount,
            })
        }
        _ => Err(SearchError::invalid(format!(
            "exactly two of target_amount, monthly_deposit and total_term_months are required, got {}",
            request.supplied_count()
        ))),
    }
}
