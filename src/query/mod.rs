//! Search requests and constraint resolution

mod request;
mod resolver;

pub use request::{SearchRequest, RateWeights, DEFAULT_TOP_K, WEIGHT_SUM_TOLERANCE};
pub use resolver::{resolve, ResolvedTerms, DerivedField};
