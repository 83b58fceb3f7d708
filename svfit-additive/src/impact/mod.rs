//! Per-feature-kind impact calculators.
//!
//! A calculator turns a [`Projection`] into a fitness in `[0, noImpact]`, where
//! `noImpact` is the value of an unaffected feature. Lower means a worse consequence.
//! The one exception is a whole-gene duplication of a triplosensitive gene, which
//! scores `2 × noImpact`.

use svfit_core::models::Located;

use crate::diagnostic::Impact;
use crate::projection::Projection;

pub mod enhancer;
pub mod gene;
pub mod tad;

pub use enhancer::EnhancerImpactCalculator;
pub use gene::GeneImpactCalculator;
pub use tad::TadBoundaryImpactCalculator;

pub trait SequenceImpactCalculator<T: Located> {
    /// Score the projection. Deterministic and free of side effects besides logging.
    fn project_impact(&self, projection: &Projection<'_, T>) -> Impact;

    /// Fitness of a feature the route leaves intact.
    fn no_impact(&self) -> f64;
}
