use rayon::prelude::*;

use crate::aggregate::RoutePriority;
use crate::error::PrioritizationError;
use crate::prioritizer::{AdditivePrioritizer, VariantSet};
use crate::route_data::RouteDataService;

/// Outcome of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<(String, Result<RoutePriority, PrioritizationError>)>,
    pub n_failed: usize,
    /// Evaluations that succeeded with warnings or skipped windows.
    pub n_warned: usize,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn n_succeeded(&self) -> usize {
        self.results.len() - self.n_failed
    }

    /// Successful evaluations, highest priority first.
    pub fn ranked(&self) -> Vec<(&str, &RoutePriority)> {
        let mut ranked: Vec<(&str, &RoutePriority)> = self
            .results
            .iter()
            .filter_map(|(id, result)| result.as_ref().ok().map(|p| (id.as_str(), p)))
            .collect();
        ranked.sort_by(|a, b| b.1.priority.total_cmp(&a.1.priority));
        ranked
    }
}

///
/// Evaluate independent variant sets in parallel. A failing set is logged and reported
/// in the batch; it never stops the others.
///
pub fn evaluate_batch<S: RouteDataService>(
    prioritizer: &AdditivePrioritizer<S>,
    variant_sets: &[VariantSet],
) -> BatchReport {
    let results: Vec<(String, Result<RoutePriority, PrioritizationError>)> = variant_sets
        .par_iter()
        .map(|set| (set.id.clone(), prioritizer.evaluate(set)))
        .collect();

    let mut n_failed = 0;
    let mut n_warned = 0;
    for (id, result) in &results {
        match result {
            Err(e) => {
                log::warn!("Unable to evaluate {}: {}", id, e);
                n_failed += 1;
            }
            Ok(priority) if !priority.is_confident() || priority.skipped_windows > 0 => {
                n_warned += 1;
            }
            Ok(_) => {}
        }
    }
    log::info!(
        "Evaluated {} variant set(s): {} failed, {} with warnings",
        results.len(),
        n_failed,
        n_warned
    );

    BatchReport {
        results,
        n_failed,
        n_warned,
    }
}
