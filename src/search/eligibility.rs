//! Hard eligibility filter on term and deposit amount
//!
//! Terms are compared in days (30-day months, 360-day years) and deposits per
//! year, so policies in any unit are checked with exact integer arithmetic.

use chrono::{Datelike, NaiveDate};

use super::config::FixedDateRule;
use crate::product::{AmountPolicy, SavingsProduct, TermPolicy};
use crate::query::ResolvedTerms;

const DAYS_PER_MONTH: u64 = 30;

/// Settings that affect term eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityContext {
    pub fixed_date: FixedDateRule,
    pub as_of: NaiveDate,
}

/// Whole months from `as_of` until `maturity`, counting a partial month as one.
/// `None` once the maturity date has passed.
pub fn implied_term_months(as_of: NaiveDate, maturity: NaiveDate) -> Option<u32> {
    if maturity <= as_of {
        return None;
    }
    let mut months = (maturity.year() - as_of.year()) * 12 + maturity.month() as i32 - as_of.month() as i32;
    if maturity.day() > as_of.day() {
        months += 1;
    }
    u32::try_from(months).ok()
}

/// Whether a term of `term_months` satisfies the policy
pub fn term_matches(policy: &TermPolicy, term_months: u32, ctx: &EligibilityContext) -> bool {
    let term_days = term_months as u64 * DAYS_PER_MONTH;
    match policy {
        TermPolicy::Range { min_term, max_term, term_unit } => {
            term_days >= term_unit.to_days(*min_term)
                && max_term.map_or(true, |max| term_days <= term_unit.to_days(max))
        }
        TermPolicy::FixedDuration { term, term_unit } => term_days == term_unit.to_days(*term),
        TermPolicy::Choices { choices, term_unit } => choices.iter().any(|c| term_unit.to_days(*c) == term_days),
        TermPolicy::FixedDate { maturity_date } => match ctx.fixed_date {
            FixedDateRule::AlwaysEligible => true,
            FixedDateRule::ImpliedTerm => implied_term_months(ctx.as_of, *maturity_date) == Some(term_months),
        },
    }
}

/// Whether a monthly deposit satisfies the policy
pub fn amount_matches(policy: &AmountPolicy, monthly_deposit: u64) -> bool {
    let annual = monthly_deposit.saturating_mul(12);
    match policy {
        AmountPolicy::Range { min_amount, max_amount, amount_unit } => {
            annual >= amount_unit.annualize(*min_amount)
                && max_amount.map_or(true, |max| annual <= amount_unit.annualize(max))
        }
        AmountPolicy::Choices { choices, amount_unit } => choices.iter().any(|c| amount_unit.annualize(*c) == annual),
        AmountPolicy::FixedAmount { fixed_amount, amount_unit } => amount_unit.annualize(*fixed_amount) == annual,
    }
}

/// A product is eligible iff both its term and amount policies match
pub fn is_eligible(product: &SavingsProduct, terms: &ResolvedTerms, ctx: &EligibilityContext) -> bool {
    term_matches(&product.term, terms.total_term_months, ctx) && amount_matches(&product.amount, terms.monthly_deposit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::PeriodUnit;

    fn ctx() -> EligibilityContext {
        EligibilityContext {
            fixed_date: FixedDateRule::AlwaysEligible,
            as_of: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_bounds_inclusive_and_open() {
        let closed = TermPolicy::Range { min_term: 6, max_term: Some(24), term_unit: PeriodUnit::Month };
        assert!(!term_matches(&closed, 5, &ctx()));
        assert!(term_matches(&closed, 6, &ctx()));
        assert!(term_matches(&closed, 24, &ctx()));
        assert!(!term_matches(&closed, 25, &ctx()));

        let open = TermPolicy::Range { min_term: 12, max_term: None, term_unit: PeriodUnit::Month };
        assert!(term_matches(&open, 600, &ctx()));
        assert!(!term_matches(&open, 11, &ctx()));
    }

    #[test]
    fn test_year_and_day_units() {
        let years = TermPolicy::Range { min_term: 1, max_term: Some(3), term_unit: PeriodUnit::Year };
        assert!(term_matches(&years, 12, &ctx()));
        assert!(term_matches(&years, 36, &ctx()));
        assert!(!term_matches(&years, 37, &ctx()));
        assert!(!term_matches(&years, 11, &ctx()));

        let days = TermPolicy::FixedDuration { term: 180, term_unit: PeriodUnit::Day };
        assert!(term_matches(&days, 6, &ctx()));
        assert!(!term_matches(&days, 7, &ctx()));

        // 100 days is not a whole number of months
        let odd = TermPolicy::Choices { choices: vec![100], term_unit: PeriodUnit::Day };
        assert!(!term_matches(&odd, 3, &ctx()));
        assert!(!term_matches(&odd, 4, &ctx()));
    }

    #[test]
    fn test_choices_exact_membership() {
        let choices = TermPolicy::Choices { choices: vec![6, 12, 24], term_unit: PeriodUnit::Month };
        assert!(term_matches(&choices, 12, &ctx()));
        assert!(!term_matches(&choices, 13, &ctx()));
        assert!(!term_matches(&choices, 18, &ctx()));
    }

    #[test]
    fn test_fixed_date_rules() {
        let policy = TermPolicy::FixedDate { maturity_date: date(2026, 3, 10) };
        assert!(term_matches(&policy, 1, &ctx()));
        assert!(term_matches(&policy, 99, &ctx()));

        let implied = EligibilityContext { fixed_date: FixedDateRule::ImpliedTerm, ..ctx() };
        assert!(term_matches(&policy, 12, &implied));
        assert!(!term_matches(&policy, 11, &implied));

        let expired = TermPolicy::FixedDate { maturity_date: date(2025, 1, 1) };
        assert!(!term_matches(&expired, 1, &implied));
    }

    #[test]
    fn test_implied_term_rounds_partial_month_up() {
        let as_of = date(2025, 3, 10);
        assert_eq!(implied_term_months(as_of, date(2025, 4, 10)), Some(1));
        assert_eq!(implied_term_months(as_of, date(2025, 4, 11)), Some(2));
        assert_eq!(implied_term_months(as_of, date(2025, 3, 31)), Some(1));
        assert_eq!(implied_term_months(as_of, date(2026, 2, 28)), Some(12));
        assert_eq!(implied_term_months(as_of, as_of), None);
    }

    #[test]
    fn test_amount_policies() {
        let range = AmountPolicy::Range { min_amount: 10_000, max_amount: Some(500_000), amount_unit: PeriodUnit::Month };
        assert!(amount_matches(&range, 10_000));
        assert!(amount_matches(&range, 500_000));
        assert!(!amount_matches(&range, 9_999));
        assert!(!amount_matches(&range, 500_001));

        let open = AmountPolicy::Range { min_amount: 0, max_amount: None, amount_unit: PeriodUnit::Month };
        assert!(amount_matches(&open, u64::MAX));

        let choices = AmountPolicy::Choices { choices: vec![100_000, 200_000], amount_unit: PeriodUnit::Month };
        assert!(amount_matches(&choices, 200_000));
        assert!(!amount_matches(&choices, 150_000));

        let fixed = AmountPolicy::FixedAmount { fixed_amount: 300_000, amount_unit: PeriodUnit::Month };
        assert!(amount_matches(&fixed, 300_000));
        assert!(!amount_matches(&fixed, 300_001));
    }

    #[test]
    fn test_daily_and_yearly_amounts() {
        let daily = AmountPolicy::Range { min_amount: 1_000, max_amount: Some(30_000), amount_unit: PeriodUnit::Day };
        assert!(amount_matches(&daily, 30_000));
        assert!(amount_matches(&daily, 900_000));
        assert!(!amount_matches(&daily, 900_001));

        let yearly = AmountPolicy::FixedAmount { fixed_amount: 1_200_000, amount_unit: PeriodUnit::Year };
        assert!(amount_matches(&yearly, 100_000));
    }
}
