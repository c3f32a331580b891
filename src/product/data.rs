//! Savings product records matching the catalog document format

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::policy::{AmountPolicy, TermPolicy};
use super::rates::{BaseInterestRate, PreferentialRateGroup, PreferentialRateType};

/// Financial institution offering a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Institution {
    #[serde(rename = "KB국민은행")]
    KbKookmin,
    #[serde(rename = "신한은행")]
    Shinhan,
    #[serde(rename = "하나은행")]
    Hana,
    #[serde(rename = "우리은행")]
    Woori,
    #[serde(rename = "NH농협은행")]
    NhNonghyup,
    #[serde(rename = "IBK기업은행")]
    Ibk,
    #[serde(rename = "KDB산업은행")]
    Kdb,
    #[serde(rename = "전북은행")]
    Jeonbuk,
    #[serde(rename = "케이뱅크")]
    KBank,
    #[serde(rename = "경남은행")]
    Kyongnam,
    #[serde(rename = "부산은행")]
    Busan,
    #[serde(rename = "카카오뱅크")]
    KakaoBank,
    #[serde(rename = "광주은행")]
    Kwangju,
    #[serde(rename = "SH수협은행")]
    ShSuhyup,
    #[serde(rename = "iM뱅크")]
    IMBank,
    #[serde(rename = "제주은행")]
    Jeju,
    #[serde(rename = "토스뱅크")]
    TossBank,
    #[serde(rename = "SC제일은행")]
    ScFirst,
}

impl Institution {
    /// Published name of the institution
    pub fn as_str(&self) -> &'static str {
        match self {
            Institution::KbKookmin => "KB국민은행",
            Institution::Shinhan => "신한은행",
            Institution::Hana => "하나은행",
            Institution::Woori => "우리은행",
            Institution::NhNonghyup => "NH농협은행",
            Institution::Ibk => "IBK기업은행",
            Institution::Kdb => "KDB산업은행",
            Institution::Jeonbuk => "전북은행",
            Institution::KBank => "케이뱅크",
            Institution::Kyongnam => "경남은행",
            Institution::Busan => "부산은행",
            Institution::KakaoBank => "카카오뱅크",
            Institution::Kwangju => "광주은행",
            Institution::ShSuhyup => "SH수협은행",
            Institution::IMBank => "iM뱅크",
            Institution::Jeju => "제주은행",
            Institution::TossBank => "토스뱅크",
            Institution::ScFirst => "SC제일은행",
        }
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Period unit used by term and payment policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Day,
    #[default]
    Month,
    Year,
}

impl PeriodUnit {
    /// Length of one unit in days (30-day months, 12-month years)
    pub fn days(&self) -> u64 {
        match self {
            PeriodUnit::Day => 1,
            PeriodUnit::Month => 30,
            PeriodUnit::Year => 360,
        }
    }

    /// Number of payment periods in one year under the same convention
    pub fn periods_per_year(&self) -> u64 {
        match self {
            PeriodUnit::Day => 360,
            PeriodUnit::Month => 12,
            PeriodUnit::Year => 1,
        }
    }

    /// Convert a count of this unit to days
    pub fn to_days(&self, value: u32) -> u64 {
        value as u64 * self.days()
    }

    /// Annualize a per-period amount
    pub fn annualize(&self, amount: u64) -> u64 {
        amount.saturating_mul(self.periods_per_year())
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeriodUnit::Day => "days",
            PeriodUnit::Month => "months",
            PeriodUnit::Year => "years",
        }
    }
}

/// Whether the rate is fixed for the contract or floats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    #[default]
    Fixed,
    Variable,
}

/// Deposit schedule of the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarnMethod {
    /// Same amount every period
    #[default]
    Fixed,
    /// Free deposits within the amount policy
    Flexible,
}

/// A single installment-savings product from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsProduct {
    /// Stable unique identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,

    /// Product name
    pub name: String,

    /// Offering institution
    pub institution: Institution,

    /// Term eligibility rule
    pub term: TermPolicy,

    /// Deposit amount eligibility rule
    pub amount: AmountPolicy,

    #[serde(default)]
    pub interest_type: InterestType,

    #[serde(default)]
    pub earn_method: EarnMethod,

    /// Guaranteed annual rate (%), flat or tiered by term
    pub base_interest_rate: BaseInterestRate,

    /// Bonus rate groups (%p)
    #[serde(default)]
    pub preferential_rates: Vec<PreferentialRateGroup>,

    /// Published maximum annual rate (%)
    pub max_interest_rate: f64,
}

impl SavingsProduct {
    /// Sum of the best tier of every preferential group
    pub fn max_preferential_sum(&self) -> f64 {
        self.preferential_rates.iter().map(|g| g.best_rate()).sum()
    }

    /// Sum of the best tier of every user-choice preferential group
    pub fn user_choice_preferential_sum(&self) -> f64 {
        self.preferential_rates
            .iter()
            .filter(|g| g.rate_type == PreferentialRateType::UserChoice)
            .map(|g| g.best_rate())
            .sum()
    }

    /// Recompute the published maximum from the highest base rate and all groups
    pub fn computed_max_interest_rate(&self) -> f64 {
        self.base_interest_rate.highest_rate() + self.max_preferential_sum()
    }
}

impl fmt::Display for SavingsProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | term: {} | amount: {} | base: {} | max: {:.2}%",
            self.name,
            self.institution,
            self.term,
            self.amount,
            self.base_interest_rate,
            self.max_interest_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_unit_conversions() {
        assert_eq!(PeriodUnit::Month.to_days(12), 360);
        assert_eq!(PeriodUnit::Year.to_days(1), 360);
        assert_eq!(PeriodUnit::Day.to_days(100), 100);

        assert_eq!(PeriodUnit::Month.annualize(500_000), 6_000_000);
        assert_eq!(PeriodUnit::Day.annualize(1_000), 360_000);
        assert_eq!(PeriodUnit::Year.annualize(1_200_000), 1_200_000);
    }

    #[test]
    fn test_institution_names_roundtrip_through_serde() {
        let json = serde_json::to_string(&Institution::KakaoBank).unwrap();
        assert_eq!(json, "\"카카오뱅크\"");
        let back: Institution = serde_json::from_str("\"SC제일은행\"").unwrap();
        assert_eq!(back, Institution::ScFirst);
        assert_eq!(Institution::Ibk.to_string(), "IBK기업은행");
    }

    #[test]
    fn test_product_defaults_from_document() {
        let doc = r#"{
            "_id": "7d3f3d5e-8a43-4f0e-9a55-1f9c6e2f6a01",
            "name": "Daily Habit Savings",
            "institution": "토스뱅크",
            "term": { "policy_type": "FIXED_DURATION", "min_term": 6 },
            "amount": { "policy_type": "RANGE", "min_amount": 1000, "max_amount": 30000, "amount_unit": "day" },
            "base_interest_rate": 2.0,
            "max_interest_rate": 2.0
        }"#;
        let product: SavingsProduct = serde_json::from_str(doc).unwrap();
        assert_eq!(product.interest_type, InterestType::Fixed);
        assert_eq!(product.earn_method, EarnMethod::Fixed);
        assert!(product.preferential_rates.is_empty());
        assert_eq!(product.term, TermPolicy::FixedDuration { term: 6, term_unit: PeriodUnit::Month });
    }
}
