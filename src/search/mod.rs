//! Eligibility filtering, scoring, ranking and projection

mod config;
mod eligibility;
mod engine;
mod projector;
mod ranking;
mod result;
mod scoring;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{EngineConfig, ScoringMode, FixedDateRule, ProjectionMode};
pub use eligibility::{is_eligible, term_matches, amount_matches, implied_term_months, EligibilityContext};
pub use engine::SearchEngine;
pub use projector::{project, project_bands, Projection, BandProjections};
pub use ranking::{competition_ranks, paginate, RANK_TOLERANCE};
pub use result::{SearchResult, SearchPage, Exclusion};
pub use scoring::{composite_score, RateBreakdown, RateRange, RateStats, NormalizedRates};

// ============================================================================
// Interest Conventions
// ============================================================================
// Published rates are annual percentages. Installment interest accrues monthly
// on a simple (non-compounding) basis.

/// Months per year used to convert an annual rate to a monthly one
pub const MONTHS_PER_YEAR: f64 = 12.0;
