use svfit_core::models::{Located, Variant};
use svfit_core::service::{
    ConstantEnhancerRelevance, ConstantGeneWeight, EnhancerRelevance, GeneDosageService,
    GeneWeightCalculator, NoDosageData, NoPhenotypeData, PhenotypeDataService,
};

use crate::aggregate::{FeatureImpact, FeatureKind, RoutePriority, Zygosity, route_priority};
use crate::assembly::assemble;
use crate::config::ValidatedConfig;
use crate::diagnostic::Impact;
use crate::error::PrioritizationResult;
use crate::impact::{
    EnhancerImpactCalculator, GeneImpactCalculator, SequenceImpactCalculator,
    TadBoundaryImpactCalculator,
};
use crate::projection::Projection;
use crate::route::Route;
use crate::route_data::RouteDataService;

/// Variants observed together on one haplotype, e.g. the calls of one VCF record.
#[derive(PartialEq, Debug, Clone)]
pub struct VariantSet {
    pub id: String,
    pub variants: Vec<Variant>,
    pub zygosity: Zygosity,
}

impl VariantSet {
    pub fn new(id: &str, variants: Vec<Variant>, zygosity: Zygosity) -> VariantSet {
        VariantSet {
            id: id.to_string(),
            variants,
            zygosity,
        }
    }
}

fn feature_impact<T: Located>(
    projection: &Projection<'_, T>,
    kind: FeatureKind,
    impact: Impact,
    no_impact: f64,
) -> FeatureImpact {
    FeatureImpact {
        feature_id: projection.source().feature_id().to_string(),
        kind,
        start_event: projection.start_event(),
        end_event: projection.end_event(),
        spanned: projection.describe_spanned(),
        fitness: impact.fitness,
        no_impact,
        warnings: impact.warnings,
    }
}

///
/// Project every feature onto `route` and score it with the calculator `calculator`
/// builds for it. Features that cannot be projected are skipped.
///
fn score_features<'r, T, C, B>(
    route: &'r Route,
    features: &'r [T],
    kind: FeatureKind,
    calculator: B,
) -> Vec<FeatureImpact>
where
    T: Located,
    C: SequenceImpactCalculator<T>,
    B: Fn(&T) -> C,
{
    features
        .iter()
        .filter_map(|feature| match Projection::project(route, feature) {
            Some(projection) => Some(projection),
            None => {
                log::debug!("{} {} is off the route", kind, feature.feature_id());
                None
            }
        })
        .map(|projection| {
            let calculator = calculator(projection.source());
            let impact = calculator.project_impact(&projection);
            feature_impact(&projection, kind, impact, calculator.no_impact())
        })
        .collect()
}

///
/// Evaluates variant sets with the additive model: the set is assembled into a
/// derivative route, the features along the route are projected on it and scored, and
/// the feature impacts are summed into the route priority.
///
/// All collaborators default to neutral implementations: no dosage data, every gene and
/// enhancer fully relevant, and no known diseases.
///
pub struct AdditivePrioritizer<S: RouteDataService> {
    config: ValidatedConfig,
    route_data: S,
    dosage: Box<dyn GeneDosageService>,
    gene_weight: Box<dyn GeneWeightCalculator>,
    enhancer_relevance: Box<dyn EnhancerRelevance>,
    phenotype: Box<dyn PhenotypeDataService>,
}

impl<S: RouteDataService> AdditivePrioritizer<S> {
    pub fn new(config: ValidatedConfig, route_data: S) -> Self {
        AdditivePrioritizer {
            config,
            route_data,
            dosage: Box::new(NoDosageData),
            gene_weight: Box::new(ConstantGeneWeight::default()),
            enhancer_relevance: Box::new(ConstantEnhancerRelevance::default()),
            phenotype: Box::new(NoPhenotypeData),
        }
    }

    pub fn with_dosage(mut self, dosage: impl GeneDosageService + 'static) -> Self {
        self.dosage = Box::new(dosage);
        self
    }

    pub fn with_gene_weight(mut self, gene_weight: impl GeneWeightCalculator + 'static) -> Self {
        self.gene_weight = Box::new(gene_weight);
        self
    }

    pub fn with_enhancer_relevance(
        mut self,
        enhancer_relevance: impl EnhancerRelevance + 'static,
    ) -> Self {
        self.enhancer_relevance = Box::new(enhancer_relevance);
        self
    }

    pub fn with_phenotype(mut self, phenotype: impl PhenotypeDataService + 'static) -> Self {
        self.phenotype = Box::new(phenotype);
        self
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Assemble and materialize the route of a variant set.
    pub fn route(&self, variant_set: &VariantSet) -> PrioritizationResult<Route> {
        let arrangement = assemble(&variant_set.variants)?;
        let route = Route::materialize(&arrangement, self.config.flank_length)?;
        Ok(route)
    }

    pub fn evaluate(&self, variant_set: &VariantSet) -> PrioritizationResult<RoutePriority> {
        let route = self.route(variant_set)?;
        let data = self.route_data.route_data(&route);
        let config = &self.config;

        let mut features = score_features(&route, &data.genes, FeatureKind::Gene, |gene| {
            let gene_factor = self.gene_weight.calculate_relevance(gene);
            GeneImpactCalculator::new(config, self.dosage.as_ref(), gene_factor)
        });
        features.extend(score_features(
            &route,
            &data.enhancers,
            FeatureKind::Enhancer,
            |_| {
                EnhancerImpactCalculator::new(
                    config,
                    self.enhancer_relevance.as_ref(),
                    &data.genes,
                )
            },
        ));
        features.extend(score_features(
            &route,
            &data.tad_boundaries,
            FeatureKind::TadBoundary,
            |_| TadBoundaryImpactCalculator::default(),
        ));

        let mut priority = route_priority(
            features,
            variant_set.zygosity,
            self.phenotype.as_ref(),
            config.mode_of_inheritance_factor,
        );
        priority.skipped_windows = data.skipped_windows;

        log::debug!(
            "{}: priority {:.4} over {} feature(s)",
            variant_set.id,
            priority.priority,
            priority.features.len()
        );
        Ok(priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssemblyError, PrioritizationError};
    use crate::event::Event;
    use crate::route_data::RouteData;
    use svfit_core::models::{
        Contig, Enhancer, Exon, Gene, GeneIdentifier, GenomicRegion, SimpleVariant, Strand,
        Transcript, VariantType,
    };

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn chr9() -> Contig {
        Contig::new("chr9", 200_000)
    }

    fn region(start: u32, end: u32) -> GenomicRegion {
        GenomicRegion::new(chr9(), Strand::Positive, start, end).unwrap()
    }

    /// The same features for every route.
    struct Fixed(RouteData);

    impl RouteDataService for Fixed {
        fn route_data(&self, _route: &Route) -> RouteData {
            self.0.clone()
        }
    }

    struct HalfWeight;

    impl GeneWeightCalculator for HalfWeight {
        fn calculate_relevance(&self, _gene: &Gene) -> f64 {
            0.5
        }
    }

    /// Enhancers matter through GENE9 only, and only by half.
    struct HalfThroughGene9;

    impl EnhancerRelevance for HalfThroughGene9 {
        fn relevance(&self, gene: &Gene, _enhancer: &Enhancer) -> f64 {
            if gene.id.symbol == "GENE9" { 0.5 } else { 0. }
        }
    }

    #[fixture]
    fn prioritizer() -> AdditivePrioritizer<Fixed> {
        let tx = Transcript::new(
            "NR_9.1",
            region(50_000, 60_000),
            vec![Exon::new(50_000, 60_000)],
            None,
        )
        .unwrap();
        let gene = Gene::new(
            GeneIdentifier::new("ENSG9", "GENE9", None),
            region(50_000, 60_000),
            vec![tx],
        );
        let data = RouteData {
            genes: vec![gene],
            enhancers: vec![Enhancer::new("enh", region(70_000, 70_500))],
            tad_boundaries: vec![],
            skipped_windows: 0,
        };
        AdditivePrioritizer::new(ValidatedConfig::default(), Fixed(data))
    }

    fn deletion(start: u32, end: u32) -> Variant {
        SimpleVariant::new("del", region(start, end), VariantType::Deletion)
            .unwrap()
            .into()
    }

    #[rstest]
    fn test_enhancer_deletion(prioritizer: AdditivePrioritizer<Fixed>) {
        let set = VariantSet::new("sv1", vec![deletion(69_000, 71_000)], Zygosity::Unknown);
        let priority = prioritizer.evaluate(&set).unwrap();

        assert_eq!(priority.priority, 1.);
        let affected: Vec<&str> = priority.affected().map(|f| f.feature_id.as_str()).collect();
        assert_eq!(affected, vec!["enh"]);
        let enhancer = &priority.features[1];
        assert_eq!(enhancer.start_event, Event::Deletion);
        assert_eq!(enhancer.spanned, "DEL[1]");
    }

    #[rstest]
    fn test_gene_weight_is_no_impact(prioritizer: AdditivePrioritizer<Fixed>) {
        let prioritizer = prioritizer.with_gene_weight(HalfWeight);
        let set = VariantSet::new("sv2", vec![deletion(48_500, 49_500)], Zygosity::Unknown);
        let priority = prioritizer.evaluate(&set).unwrap();

        // only the promoter is deleted: 0.5 * 0.6 is left
        let gene = &priority.features[0];
        assert_eq!(gene.no_impact, 0.5);
        assert_eq!((gene.fitness - 0.3).abs() < 1e-9, true);
        assert_eq!((priority.priority - 0.2).abs() < 1e-9, true);
    }

    #[rstest]
    fn test_enhancer_relevance_through_route_genes(prioritizer: AdditivePrioritizer<Fixed>) {
        let prioritizer = prioritizer.with_enhancer_relevance(HalfThroughGene9);
        let set = VariantSet::new("sv3", vec![deletion(69_000, 71_000)], Zygosity::Unknown);
        let priority = prioritizer.evaluate(&set).unwrap();

        let enhancer = &priority.features[1];
        assert_eq!(enhancer.feature_id, "enh");
        assert_eq!(enhancer.fitness, 0.5);
        assert_eq!(priority.priority, 0.5);
    }

    #[rstest]
    fn test_assembly_failure_is_reported(prioritizer: AdditivePrioritizer<Fixed>) {
        let set = VariantSet::new("empty", vec![], Zygosity::Unknown);
        assert_eq!(
            prioritizer.evaluate(&set),
            Err(PrioritizationError::Assembly(AssemblyError::Empty))
        );
    }
}
