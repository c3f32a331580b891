//! Savings Ranker - matching and ranking engine for installment-savings products
//!
//! This library provides:
//! - A typed product model (term/amount eligibility policies, flat or tiered base rates,
//!   preferential rate groups)
//! - Constraint resolution between target amount, monthly deposit and term
//! - Eligibility filtering, min-max normalized composite scoring and competition ranking
//! - Principal/interest/maturity projections for matched products

pub mod error;
pub mod product;
pub mod query;
pub mod catalog;
pub mod search;

// Re-export commonly used types
pub use error::{CatalogError, ConfigError, SearchError};
pub use product::{SavingsProduct, TermPolicy, AmountPolicy, BaseInterestRate};
pub use query::{SearchRequest, RateWeights, ResolvedTerms};
pub use catalog::{Catalog, CandidateFilter, InMemoryCatalog};
pub use search::{SearchEngine, EngineConfig, SearchPage, SearchResult};
