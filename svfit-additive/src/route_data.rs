use fxhash::FxHashSet;

use svfit_core::models::{Enhancer, Gene, GenomicRegion, Located, TadBoundary};
use svfit_core::service::FeatureSource;

use crate::route::Route;

///
/// Features found in the reference windows of one route. Each feature appears once,
/// in the order it was first reported.
///
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RouteData {
    pub genes: Vec<Gene>,
    pub enhancers: Vec<Enhancer>,
    pub tad_boundaries: Vec<TadBoundary>,
    /// Windows that could not be queried, e.g. on a contig the feature store does not know.
    pub skipped_windows: usize,
}

impl RouteData {
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty() && self.enhancers.is_empty() && self.tad_boundaries.is_empty()
    }
}

pub trait RouteDataService: Send + Sync {
    fn route_data(&self, route: &Route) -> RouteData;
}

/// Ids already collected, one set per feature kind.
#[derive(Default)]
struct Seen {
    genes: FxHashSet<String>,
    enhancers: FxHashSet<String>,
    tad_boundaries: FxHashSet<String>,
}

/// Keeps the first feature seen for every id.
fn extend_unique<F: Located>(target: &mut Vec<F>, seen: &mut FxHashSet<String>, found: Vec<F>) {
    for feature in found {
        if seen.insert(feature.feature_id().to_string()) {
            target.push(feature);
        }
    }
}

///
/// Collects route data from a [`FeatureSource`].
///
/// TAD boundaries overlapping any gene of the route are dropped: the gene impact already
/// accounts for what happens there.
///
pub struct FeatureRouteDataService<S: FeatureSource> {
    source: S,
}

impl<S: FeatureSource> FeatureRouteDataService<S> {
    pub fn new(source: S) -> Self {
        FeatureRouteDataService { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn query_window(&self, window: &GenomicRegion, data: &mut RouteData, seen: &mut Seen) {
        let genes = self.source.overlapping_genes(window);
        let enhancers = self.source.overlapping_enhancers(window);
        let tads = self.source.overlapping_tad_boundaries(window);

        match (genes, enhancers, tads) {
            (Ok(genes), Ok(enhancers), Ok(tads)) => {
                extend_unique(&mut data.genes, &mut seen.genes, genes.overlapping);
                extend_unique(&mut data.enhancers, &mut seen.enhancers, enhancers);
                extend_unique(&mut data.tad_boundaries, &mut seen.tad_boundaries, tads);
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                log::warn!("Skipping window {}: {}", window, e);
                data.skipped_windows += 1;
            }
        }
    }
}

impl<S: FeatureSource> RouteDataService for FeatureRouteDataService<S> {
    fn route_data(&self, route: &Route) -> RouteData {
        let mut data = RouteData::default();
        let mut seen = Seen::default();
        for window in route.references() {
            self.query_window(window, &mut data, &mut seen);
        }

        let genes = &data.genes;
        data.tad_boundaries
            .retain(|tad| !genes.iter().any(|g| g.location.overlaps_with(&tad.location)));

        log::debug!(
            "Route over {} window(s): {} gene(s), {} enhancer(s), {} TAD boundary(ies)",
            route.references().len(),
            data.genes.len(),
            data.enhancers.len(),
            data.tad_boundaries.len()
        );
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble;
    use svfit_core::errors::LookupError;
    use svfit_core::models::{
        Contig, GeneIdentifier, SimpleVariant, Strand, Variant, VariantType,
    };
    use svfit_core::service::QueryResult;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn chr7() -> Contig {
        Contig::new("chr7", 100_000)
    }

    fn region(start: u32, end: u32) -> GenomicRegion {
        GenomicRegion::new(chr7(), Strand::Positive, start, end).unwrap()
    }

    /// Reports the same features for every window on chr7, fails elsewhere.
    struct StaticSource {
        genes: Vec<Gene>,
        enhancers: Vec<Enhancer>,
        tads: Vec<TadBoundary>,
    }

    impl StaticSource {
        fn check(&self, query: &GenomicRegion) -> Result<(), LookupError> {
            if query.contig.name == "chr7" {
                Ok(())
            } else {
                Err(LookupError::UnknownContig(query.contig.name.clone()))
            }
        }
    }

    impl FeatureSource for StaticSource {
        fn overlapping_genes(
            &self,
            query: &GenomicRegion,
        ) -> Result<QueryResult<Gene>, LookupError> {
            self.check(query)?;
            Ok(QueryResult {
                overlapping: self.genes.clone(),
                upstream: None,
                downstream: None,
            })
        }

        fn overlapping_enhancers(
            &self,
            query: &GenomicRegion,
        ) -> Result<Vec<Enhancer>, LookupError> {
            self.check(query)?;
            Ok(self.enhancers.clone())
        }

        fn overlapping_tad_boundaries(
            &self,
            query: &GenomicRegion,
        ) -> Result<Vec<TadBoundary>, LookupError> {
            self.check(query)?;
            Ok(self.tads.clone())
        }
    }

    #[fixture]
    fn service() -> FeatureRouteDataService<StaticSource> {
        let gene = Gene::new(
            GeneIdentifier::new("ENSG7", "GENE7", None),
            region(10_000, 20_000),
            vec![],
        );
        FeatureRouteDataService::new(StaticSource {
            genes: vec![gene.clone(), gene],
            enhancers: vec![Enhancer::new("enh", region(30_000, 30_500))],
            tads: vec![
                TadBoundary::new("tad-in-gene", region(15_000, 16_000), 0.5),
                TadBoundary::new("tad-free", region(40_000, 41_000), 0.5),
            ],
        })
    }

    fn route(contig: Contig) -> Route {
        let region = GenomicRegion::new(contig, Strand::Positive, 12_000, 13_000).unwrap();
        let del: Variant = SimpleVariant::new("del", region, VariantType::Deletion)
            .unwrap()
            .into();
        Route::materialize(&assemble(&[del]).unwrap(), 50_000).unwrap()
    }

    #[rstest]
    fn test_route_data_is_deduplicated(service: FeatureRouteDataService<StaticSource>) {
        let data = service.route_data(&route(chr7()));
        assert_eq!(data.genes.len(), 1);
        assert_eq!(data.enhancers.len(), 1);
        assert_eq!(data.skipped_windows, 0);
    }

    #[rstest]
    fn test_tad_boundaries_inside_genes_are_dropped(
        service: FeatureRouteDataService<StaticSource>,
    ) {
        let data = service.route_data(&route(chr7()));
        let ids: Vec<&str> = data.tad_boundaries.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["tad-free"]);
    }

    #[rstest]
    fn test_unknown_contig_is_skipped(service: FeatureRouteDataService<StaticSource>) {
        let data = service.route_data(&route(Contig::new("chrUn", 100_000)));
        assert_eq!(data.is_empty(), true);
        assert_eq!(data.skipped_windows, 1);
    }
}
