//! Savings product data structures and catalog loading

mod data;
mod policy;
mod rates;
mod validate;
pub mod loader;

pub use data::{SavingsProduct, Institution, PeriodUnit, InterestType, EarnMethod};
pub use policy::{TermPolicy, AmountPolicy};
pub use rates::{BaseInterestRate, TermTier, PreferentialRateGroup, PreferentialRateType, PreferentialTier};
pub use validate::CatalogIssue;
pub use loader::{load_catalog, load_catalog_from_reader, load_default_catalog, DEFAULT_CATALOG_PATH};
