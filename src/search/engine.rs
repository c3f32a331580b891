//! Search engine: resolve, filter, score, project, rank and paginate

use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::Arc;

use super::config::{EngineConfig, ProjectionMode, ScoringMode};
use super::eligibility::{is_eligible, EligibilityContext};
use super::projector::{project, project_bands};
use super::ranking::{compare_ranked, competition_ranks, paginate};
use super::result::{Exclusion, SearchPage, SearchResult};
use super::scoring::{composite_score, RateBreakdown, RateStats};
use crate::catalog::{CandidateFilter, Catalog};
use crate::error::SearchError;
use crate::product::SavingsProduct;
use crate::query::{resolve, RateWeights, ResolvedTerms, SearchRequest};

/// Outcome of checking one candidate
enum Evaluation {
    Ineligible,
    Scored(Arc<SavingsProduct>, RateBreakdown),
    Excluded(Exclusion),
}

/// Ranks catalog products against a search request
pub struct SearchEngine<C: Catalog> {
    catalog: C,
    config: EngineConfig,
}

impl<C: Catalog> SearchEngine<C> {
    /// Engine with the default configuration
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: C, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Run one search
    ///
    /// Invalid input and catalog failures are errors. No eligible product is
    /// an empty page. Products whose tiered rates do not cover the resolved
    /// term are dropped, logged and listed in `SearchPage::excluded`.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let weights = request.weights.normalized()?;
        let weights = match self.config.scoring {
            ScoringMode::ThreeBand => weights,
            // Intermediate weight is unused here
            ScoringMode::TwoBand => weights.without_intermediate().normalized()?,
        };
        let resolved = resolve(request)?;
        debug!(
            "Resolved terms: monthly={} term={} target={} (derived {:?})",
            resolved.monthly_deposit, resolved.total_term_months, resolved.target_amount, resolved.derived
        );

        let candidates = self.catalog.fetch_candidates(&CandidateFilter::from(&resolved))?;
        let ctx = EligibilityContext {
            fixed_date: self.config.fixed_date,
            as_of: self.config.reference_date(),
        };

        let evaluations: Vec<Evaluation> = if self.config.parallel {
            candidates.par_iter().map(|p| evaluate(p, &resolved, &ctx)).collect()
        } else {
            candidates.iter().map(|p| evaluate(p, &resolved, &ctx)).collect()
        };

        let mut scored = Vec::new();
        let mut excluded = Vec::new();
        for evaluation in evaluations {
            match evaluation {
                Evaluation::Scored(product, rates) => scored.push((product, rates)),
                Evaluation::Excluded(exclusion) => {
                    warn!(
                        "Excluding product {} ({}): {}",
                        exclusion.product_id, exclusion.product_name, exclusion.reason
                    );
                    excluded.push(exclusion);
                }
                Evaluation::Ineligible => {}
            }
        }
        debug!("{} of {} candidates eligible", scored.len() + excluded.len(), candidates.len());

        let mut results = self.score(scored, &resolved, &weights);
        results.sort_by(|a, b| compare_ranked((a.score, &a.product.id), (b.score, &b.product.id)));
        let total = results.len();

        info!(
            "Search matched {} of {} candidates ({} excluded), returning offset {} top_k {}",
            total,
            candidates.len(),
            excluded.len(),
            request.offset,
            request.top_k
        );

        Ok(SearchPage {
            results: paginate(results, request.offset, request.top_k),
            total,
            offset: request.offset,
            top_k: request.top_k,
            resolved,
            weights,
            excluded,
        })
    }

    /// Normalize, score, project and rank the eligible set
    fn score(
        &self,
        scored: Vec<(Arc<SavingsProduct>, RateBreakdown)>,
        resolved: &ResolvedTerms,
        weights: &RateWeights,
    ) -> Vec<SearchResult> {
        let rates: Vec<RateBreakdown> = scored.iter().map(|(_, r)| *r).collect();
        let Some(stats) = RateStats::from_breakdowns(&rates) else {
            return Vec::new();
        };

        let base_ranks = competition_ranks(&rates.iter().map(|r| r.base).collect::<Vec<_>>());
        let max_ranks = competition_ranks(&rates.iter().map(|r| r.max).collect::<Vec<_>>());
        let mid_ranks = competition_ranks(&rates.iter().map(|r| r.intermediate).collect::<Vec<_>>());

        let monthly = resolved.monthly_deposit;
        let term = resolved.total_term_months;

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (product, rates))| {
                let normalized = stats.normalize(&rates);
                let score = composite_score(&normalized, weights, self.config.scoring);

                let at_max = match self.config.projection {
                    ProjectionMode::Off => None,
                    ProjectionMode::MaxRate | ProjectionMode::AllBands => Some(project(monthly, term, rates.max)),
                };
                let band_projections = match self.config.projection {
                    ProjectionMode::AllBands => Some(project_bands(monthly, term, &rates)),
                    _ => None,
                };

                SearchResult {
                    product,
                    score,
                    rates,
                    normalized,
                    principal: at_max.map(|p| p.principal),
                    interest: at_max.map(|p| p.interest),
                    maturity_amount: at_max.map(|p| p.maturity_amount),
                    band_projections,
                    base_rate_rank: base_ranks[i],
                    max_rate_rank: max_ranks[i],
                    intermediate_rate_rank: mid_ranks[i],
                }
            })
            .collect()
    }
}

fn evaluate(product: &Arc<SavingsProduct>, resolved: &ResolvedTerms, ctx: &EligibilityContext) -> Evaluation {
    if !is_eligible(product, resolved, ctx) {
        return Evaluation::Ineligible;
    }
    match RateBreakdown::for_term(product, resolved.total_term_months) {
        Ok(rates) => Evaluation::Scored(Arc::clone(product), rates),
        Err(e) => Evaluation::Excluded(Exclusion {
            product_id: product.id,
            product_name: product.name.clone(),
            reason: e.to_string(),
        }),
    }
}
