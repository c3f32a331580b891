//! Product fixtures shared by the unit tests

use uuid::Uuid;

use crate::product::{
    AmountPolicy, BaseInterestRate, EarnMethod, Institution, InterestType, PeriodUnit, PreferentialRateGroup,
    PreferentialRateType, PreferentialTier, SavingsProduct, TermPolicy, TermTier,
};

/// Product with a flat base rate, 1-36 month terms and 10k-3M monthly deposits
pub fn flat_product(id: u128, rate: f64) -> SavingsProduct {
    SavingsProduct {
        id: Uuid::from_u128(id),
        name: format!("Savings {}", id),
        institution: Institution::KbKookmin,
        term: TermPolicy::Range { min_term: 1, max_term: Some(36), term_unit: PeriodUnit::Month },
        amount: AmountPolicy::Range { min_amount: 10_000, max_amount: Some(3_000_000), amount_unit: PeriodUnit::Month },
        interest_type: InterestType::Fixed,
        earn_method: EarnMethod::Fixed,
        base_interest_rate: BaseInterestRate::Flat(rate),
        preferential_rates: Vec::new(),
        max_interest_rate: rate,
    }
}

/// Product with a tiered base rate built from `(min_term, max_term, rate)` triples
pub fn tiered_product(id: u128, tiers: &[(u32, Option<u32>, f64)]) -> SavingsProduct {
    let tiers: Vec<TermTier> = tiers
        .iter()
        .map(|&(min_term, max_term, interest_rate)| TermTier { min_term, max_term, interest_rate })
        .collect();
    let mut product = flat_product(id, 0.0);
    product.base_interest_rate = BaseInterestRate::Tiered(tiers);
    product.max_interest_rate = product.computed_max_interest_rate();
    product
}

pub fn group(rate_type: PreferentialRateType, rates: &[f64]) -> PreferentialRateGroup {
    PreferentialRateGroup {
        description: format!("{:?} bonus", rate_type),
        rate_type,
        tiers: rates
            .iter()
            .enumerate()
            .map(|(i, &interest_rate)| PreferentialTier { condition: format!("condition {}", i + 1), interest_rate })
            .collect(),
    }
}

pub fn with_groups(mut product: SavingsProduct, groups: Vec<PreferentialRateGroup>) -> SavingsProduct {
    product.preferential_rates = groups;
    product.max_interest_rate = product.computed_max_interest_rate();
    product
}

pub fn with_term(mut product: SavingsProduct, term: TermPolicy) -> SavingsProduct {
    product.term = term;
    product
}

pub fn with_amount(mut product: SavingsProduct, amount: AmountPolicy) -> SavingsProduct {
    product.amount = amount;
    product
}
