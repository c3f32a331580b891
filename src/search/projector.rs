//! Maturity projections for installment savings
//!
//! Interest uses the simple-interest disclosure convention for fixed monthly
//! installments: the deposit made in month k earns interest for the remaining
//! n - k + 1 months, so the total is
//!
//!   interest = monthly * n(n+1)/2 * (annual_rate / 100) / 12
//!
//! This is linear, not monthly-compounded.

use serde::Serialize;

use super::scoring::RateBreakdown;
use super::MONTHS_PER_YEAR;

/// Principal, interest and maturity amount at one annual rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    /// Annual rate used (%)
    pub annual_rate: f64,
    pub principal: u64,
    pub interest: f64,
    pub maturity_amount: f64,
}

/// Project a fixed monthly deposit over `term_months` at `annual_rate` percent
pub fn project(monthly_deposit: u64, term_months: u32, annual_rate: f64) -> Projection {
    let n = term_months as u64;
    let principal = monthly_deposit.saturating_mul(n);
    let deposit_months = (n * (n + 1) / 2) as f64;
    let interest = monthly_deposit as f64 * deposit_months * (annual_rate / 100.0) / MONTHS_PER_YEAR;

    Projection {
        annual_rate,
        principal,
        interest,
        maturity_amount: principal as f64 + interest,
    }
}

/// Projections for every rate band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandProjections {
    pub base: Projection,
    pub max: Projection,
    pub intermediate: Projection,
}

pub fn project_bands(monthly_deposit: u64, term_months: u32, rates: &RateBreakdown) -> BandProjections {
    BandProjections {
        base: project(monthly_deposit, term_months, rates.base),
        max: project(monthly_deposit, term_months, rates.max),
        intermediate: project(monthly_deposit, term_months, rates.intermediate),
    }
}
