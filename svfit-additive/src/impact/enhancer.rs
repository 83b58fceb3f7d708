use svfit_core::models::{Enhancer, Gene};
use svfit_core::service::{DEFAULT_ENHANCER_RELEVANCE, EnhancerRelevance};

use super::SequenceImpactCalculator;
use crate::config::ValidatedConfig;
use crate::diagnostic::{Impact, ImpactWarning};
use crate::event::Event;
use crate::projection::Projection;

///
/// Scores enhancers. There is no exon or frame logic: any causal segment touching the
/// enhancer costs the event fitness, weighted by how relevant the enhancer is for the
/// phenotype.
///
/// An unaffected enhancer scores `1`. With relevance `r` and event fitness `f` the
/// affected enhancer scores `1 - (1 - f) * r`, so an irrelevant enhancer never
/// contributes. The relevance is taken for every gene on the route and the most
/// relevant gene wins, which gives the worst fitness.
///
pub struct EnhancerImpactCalculator<'a, R: EnhancerRelevance + ?Sized> {
    config: &'a ValidatedConfig,
    relevance: &'a R,
    genes: &'a [Gene],
}

impl<'a, R: EnhancerRelevance + ?Sized> EnhancerImpactCalculator<'a, R> {
    pub fn new(config: &'a ValidatedConfig, relevance: &'a R, genes: &'a [Gene]) -> Self {
        EnhancerImpactCalculator {
            config,
            relevance,
            genes,
        }
    }

    /// Highest relevance of `enhancer` across the route genes.
    fn relevance_of(&self, enhancer: &Enhancer) -> f64 {
        self.genes
            .iter()
            .map(|gene| self.relevance.relevance(gene, enhancer).clamp(0., 1.))
            .reduce(f64::max)
            .unwrap_or(DEFAULT_ENHANCER_RELEVANCE)
    }

    fn scaled_fitness(&self, relevance: f64, event: Event) -> f64 {
        let no_impact = self.no_impact();
        let event_fitness = self.config.enhancer_event_fitness.get(event) * no_impact;
        (no_impact - (no_impact - event_fitness) * relevance).clamp(0., no_impact)
    }
}

impl<R: EnhancerRelevance + ?Sized> SequenceImpactCalculator<Enhancer>
    for EnhancerImpactCalculator<'_, R>
{
    fn project_impact(&self, projection: &Projection<'_, Enhancer>) -> Impact {
        let enhancer = projection.source();

        if projection.is_intra_segment() {
            return match projection.start_event() {
                Event::Deletion => {
                    let relevance = self.relevance_of(enhancer);
                    Impact::of(self.scaled_fitness(relevance, Event::Deletion))
                }
                // the enhancer sequence is still there
                Event::Duplication | Event::Inversion | Event::Gap => {
                    Impact::of(self.no_impact())
                }
                event @ (Event::Snv | Event::Insertion | Event::Breakend) => Impact {
                    fitness: self.no_impact(),
                    warnings: vec![
                        ImpactWarning::UnexpectedEnclosingEvent {
                            feature: enhancer.id.clone(),
                            event,
                        }
                        .raise(),
                    ],
                },
            };
        }

        let relevance = self.relevance_of(enhancer);
        let fitness = projection
            .spanned_segments()
            .iter()
            .filter(|s| s.event.is_causal())
            .map(|s| self.scaled_fitness(relevance, s.event))
            .fold(self.no_impact(), f64::min);
        Impact::of(fitness)
    }

    fn no_impact(&self) -> f64 {
        1.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble;
    use crate::route::Route;
    use svfit_core::models::{
        Contig, GeneIdentifier, GenomicRegion, SimpleVariant, Strand, Variant, VariantType,
    };
    use svfit_core::service::ConstantEnhancerRelevance;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn region(start: u32, end: u32) -> GenomicRegion {
        GenomicRegion::new(Contig::new("chr3", 50_000), Strand::Positive, start, end).unwrap()
    }

    #[fixture]
    fn enhancer() -> Enhancer {
        Enhancer::new("VISTA:hs1", region(10_000, 11_000))
    }

    fn gene(symbol: &str, start: u32, end: u32) -> Gene {
        Gene::new(
            GeneIdentifier::new(&format!("ENSG_{symbol}"), symbol, None),
            region(start, end),
            vec![],
        )
    }

    /// Only the interaction with `HEART` matters.
    struct HeartSpecific;

    impl EnhancerRelevance for HeartSpecific {
        fn relevance(&self, gene: &Gene, _enhancer: &Enhancer) -> f64 {
            if gene.id.symbol == "HEART" { 0.8 } else { 0.1 }
        }
    }

    fn route_with_flank(start: u32, end: u32, variant_type: VariantType, flank: u32) -> Route {
        let variant: Variant = SimpleVariant::new("sv", region(start, end), variant_type)
            .unwrap()
            .into();
        Route::materialize(&assemble(&[variant]).unwrap(), flank).unwrap()
    }

    fn route_of(start: u32, end: u32, variant_type: VariantType) -> Route {
        route_with_flank(start, end, variant_type, 1_000)
    }

    fn score_with<R: EnhancerRelevance>(
        route: &Route,
        enhancer: &Enhancer,
        relevance: &R,
        genes: &[Gene],
    ) -> Impact {
        let config = ValidatedConfig::default();
        let calculator = EnhancerImpactCalculator::new(&config, relevance, genes);
        let projection = Projection::project(route, enhancer).unwrap();
        calculator.project_impact(&projection)
    }

    fn score(route: &Route, enhancer: &Enhancer, relevance: f64) -> Impact {
        let genes = vec![gene("NEAR", 13_000, 14_000)];
        score_with(route, enhancer, &ConstantEnhancerRelevance(relevance), &genes)
    }

    #[rstest]
    #[case(VariantType::Deletion, 0.)]
    #[case(VariantType::Duplication, 1.)]
    #[case(VariantType::Inversion, 1.)]
    fn test_enhancer_within_event(
        enhancer: Enhancer,
        #[case] variant_type: VariantType,
        #[case] expected: f64,
    ) {
        let route = route_of(9_000, 12_000, variant_type);
        assert_eq!(score(&route, &enhancer, 1.).fitness, expected);
    }

    #[rstest]
    #[case(1., 0.)]
    #[case(0.5, 0.5)]
    #[case(0., 1.)]
    fn test_relevance_scales_partial_deletion(
        enhancer: Enhancer,
        #[case] relevance: f64,
        #[case] expected: f64,
    ) {
        let route = route_of(10_500, 12_000, VariantType::Deletion);
        assert_eq!(score(&route, &enhancer, relevance).fitness, expected);
    }

    #[rstest]
    fn test_insertion_inside_enhancer(enhancer: Enhancer) {
        let ins: Variant = SimpleVariant::insertion(
            "ins",
            Contig::new("chr3", 50_000),
            Strand::Positive,
            10_500,
            30,
        )
        .unwrap()
        .into();
        let route = Route::materialize(&assemble(&[ins]).unwrap(), 1_000).unwrap();
        let impact = score(&route, &enhancer, 1.);
        assert_eq!((impact.fitness - 0.1).abs() < 1e-9, true);
        assert_eq!(impact.is_confident(), true);
    }

    #[rstest]
    fn test_untouched_enhancer(enhancer: Enhancer) {
        // window [10_000, 14_500) holds the enhancer in the leading gap
        let route = route_with_flank(12_000, 12_500, VariantType::Deletion, 2_000);
        let projection = Projection::project(&route, &enhancer).unwrap();
        assert_eq!(projection.describe_spanned(), "GAP[0]");
        assert_eq!(score(&route, &enhancer, 1.).fitness, 1.);
    }

    #[rstest]
    fn test_most_relevant_gene_wins(enhancer: Enhancer) {
        let route = route_of(9_000, 12_000, VariantType::Deletion);
        let genes = vec![gene("LIVER", 20_000, 21_000), gene("HEART", 5_000, 6_000)];
        let impact = score_with(&route, &enhancer, &HeartSpecific, &genes);
        assert_eq!((impact.fitness - 0.2).abs() < 1e-9, true);

        let liver_only = vec![gene("LIVER", 20_000, 21_000)];
        let impact = score_with(&route, &enhancer, &HeartSpecific, &liver_only);
        assert_eq!((impact.fitness - 0.9).abs() < 1e-9, true);
    }

    #[rstest]
    fn test_enhancer_without_genes_is_fully_relevant(enhancer: Enhancer) {
        let route = route_of(9_000, 12_000, VariantType::Deletion);
        let impact = score_with(&route, &enhancer, &ConstantEnhancerRelevance(0.5), &[]);
        assert_eq!(impact.fitness, 0.);
    }
}
