use svfit_core::models::TadBoundary;

use super::SequenceImpactCalculator;
use crate::diagnostic::Impact;
use crate::projection::Projection;

/// A boundary hit by any causal segment loses its insulation in proportion to its stability.
#[derive(Debug, Clone, Copy)]
pub struct TadBoundaryImpactCalculator {
    no_impact: f64,
}

impl TadBoundaryImpactCalculator {
    pub fn new(no_impact: f64) -> Self {
        TadBoundaryImpactCalculator { no_impact }
    }
}

impl Default for TadBoundaryImpactCalculator {
    fn default() -> Self {
        TadBoundaryImpactCalculator::new(1.)
    }
}

impl SequenceImpactCalculator<TadBoundary> for TadBoundaryImpactCalculator {
    fn project_impact(&self, projection: &Projection<'_, TadBoundary>) -> Impact {
        let disrupted = projection
            .spanned_events()
            .iter()
            .any(|event| event.is_causal());
        if disrupted {
            Impact::of(self.no_impact * (1. - projection.source().stability))
        } else {
            Impact::of(self.no_impact)
        }
    }

    fn no_impact(&self) -> f64 {
        self.no_impact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble;
    use crate::route::Route;
    use svfit_core::models::{Contig, GenomicRegion, SimpleVariant, Strand, Variant, VariantType};

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn region(start: u32, end: u32) -> GenomicRegion {
        GenomicRegion::new(Contig::new("chr5", 80_000), Strand::Positive, start, end).unwrap()
    }

    #[rstest]
    #[case(19_000, 25_000, 0.25)]
    #[case(20_500, 25_000, 0.25)]
    #[case(22_000, 25_000, 1.)]
    fn test_boundary_disruption(#[case] start: u32, #[case] end: u32, #[case] expected: f64) {
        let boundary = TadBoundary::new("tad-1", region(20_000, 21_000), 0.75);
        let variant: Variant = SimpleVariant::new("del", region(start, end), VariantType::Deletion)
            .unwrap()
            .into();
        let route = Route::materialize(&assemble(&[variant]).unwrap(), 2_000).unwrap();

        let calculator = TadBoundaryImpactCalculator::default();
        let projection = Projection::project(&route, &boundary).unwrap();
        assert_eq!(calculator.project_impact(&projection).fitness, expected);
    }
}
