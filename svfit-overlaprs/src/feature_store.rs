use fxhash::FxHashMap;

use svfit_core::errors::LookupError;
use svfit_core::models::{Contig, Enhancer, Gene, GenomicRegion, Interval, Located, Strand, TadBoundary};
use svfit_core::service::{FeatureSource, QueryResult};

use crate::augmented_list::AugmentedList;
use crate::errors::{FeatureStoreError, FeatureStoreResult};
use crate::traits::Overlapper;

///
/// Features of one kind on one contig, indexed by their positive-strand extent.
/// The index stores positions into `features`.
///
#[derive(Debug, Clone)]
struct IndexedFeatures<F> {
    features: Vec<F>,
    index: AugmentedList<u32, usize>,
}

impl<F: Located + Clone> IndexedFeatures<F> {
    fn build(features: Vec<F>) -> Self {
        let intervals = features
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let loc = f.location().to_positive_strand();
                Interval {
                    start: loc.start,
                    end: loc.end,
                    val: i,
                }
            })
            .collect();
        IndexedFeatures {
            features,
            index: AugmentedList::build(intervals),
        }
    }

    fn overlapping(&self, start: u32, end: u32) -> Vec<F> {
        let mut hits: Vec<&Interval<u32, usize>> = self.index.find_iter(start, end).collect();
        hits.sort();
        hits.iter().map(|iv| self.features[iv.val].clone()).collect()
    }

    fn before(&self, position: u32) -> Option<F> {
        self.index
            .nearest_before(position)
            .map(|iv| self.features[iv.val].clone())
    }

    fn after(&self, position: u32) -> Option<F> {
        self.index
            .nearest_after(position)
            .map(|iv| self.features[iv.val].clone())
    }
}

#[derive(Debug, Clone)]
struct ContigFeatures {
    genes: IndexedFeatures<Gene>,
    enhancers: IndexedFeatures<Enhancer>,
    tad_boundaries: IndexedFeatures<TadBoundary>,
}

///
/// An in-memory, read-only feature store. Genes, enhancers and TAD boundaries are
/// grouped per contig and indexed with an [`AugmentedList`].
///
/// The store is populated once and then shared between threads; queries never mutate it.
///
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    contigs: FxHashMap<String, ContigFeatures>,
}

impl FeatureStore {
    ///
    /// Build the store. Every feature must sit on one of `contigs`.
    ///
    /// # Arguments
    /// - contigs: the contigs of the genome assembly
    /// - genes, enhancers, tad_boundaries: the features, on any strand
    ///
    pub fn new(
        contigs: Vec<Contig>,
        genes: Vec<Gene>,
        enhancers: Vec<Enhancer>,
        tad_boundaries: Vec<TadBoundary>,
    ) -> FeatureStoreResult<FeatureStore> {
        let mut known: FxHashMap<String, Contig> = FxHashMap::default();
        for contig in contigs {
            if known.contains_key(&contig.name) {
                return Err(FeatureStoreError::DuplicateContig(contig.name));
            }
            known.insert(contig.name.clone(), contig);
        }

        let mut genes = group_by_contig(&known, genes)?;
        let mut enhancers = group_by_contig(&known, enhancers)?;
        let mut tad_boundaries = group_by_contig(&known, tad_boundaries)?;

        let mut indexed = FxHashMap::default();
        for name in known.keys() {
            indexed.insert(
                name.clone(),
                ContigFeatures {
                    genes: IndexedFeatures::build(genes.remove(name).unwrap_or_default()),
                    enhancers: IndexedFeatures::build(enhancers.remove(name).unwrap_or_default()),
                    tad_boundaries: IndexedFeatures::build(
                        tad_boundaries.remove(name).unwrap_or_default(),
                    ),
                },
            );
        }

        Ok(FeatureStore { contigs: indexed })
    }

    pub fn contig_count(&self) -> usize {
        self.contigs.len()
    }

    pub fn gene_count(&self) -> usize {
        self.contigs.values().map(|c| c.genes.features.len()).sum()
    }

    fn lookup(&self, query: &GenomicRegion) -> Result<&ContigFeatures, LookupError> {
        self.contigs
            .get(&query.contig.name)
            .ok_or_else(|| LookupError::UnknownContig(query.contig.name.clone()))
    }
}

fn group_by_contig<F: Located>(
    known: &FxHashMap<String, Contig>,
    features: Vec<F>,
) -> FeatureStoreResult<FxHashMap<String, Vec<F>>> {
    let mut grouped: FxHashMap<String, Vec<F>> = FxHashMap::default();
    for feature in features {
        let location = feature.location();
        let contig = known.get(&location.contig.name).ok_or_else(|| {
            FeatureStoreError::UnknownContig {
                feature: feature.feature_id().to_string(),
                contig: location.contig.name.clone(),
            }
        })?;
        if contig.length != location.contig.length {
            return Err(FeatureStoreError::ContigLengthMismatch {
                feature: feature.feature_id().to_string(),
                contig: contig.name.clone(),
                declared: contig.length,
                found: location.contig.length,
            });
        }
        grouped
            .entry(contig.name.clone())
            .or_default()
            .push(feature);
    }
    Ok(grouped)
}

impl FeatureSource for FeatureStore {
    fn overlapping_genes(&self, query: &GenomicRegion) -> Result<QueryResult<Gene>, LookupError> {
        let features = self.lookup(query)?;
        let q = query.to_positive_strand();

        let overlapping = features.genes.overlapping(q.start, q.end);
        if !overlapping.is_empty() {
            return Ok(QueryResult {
                overlapping,
                upstream: None,
                downstream: None,
            });
        }

        let before = features.genes.before(q.start);
        let after = features.genes.after(q.end);
        let (upstream, downstream) = match query.strand {
            Strand::Positive => (before, after),
            Strand::Negative => (after, before),
        };
        Ok(QueryResult {
            overlapping,
            upstream,
            downstream,
        })
    }

    fn overlapping_enhancers(&self, query: &GenomicRegion) -> Result<Vec<Enhancer>, LookupError> {
        let q = query.to_positive_strand();
        Ok(self.lookup(query)?.enhancers.overlapping(q.start, q.end))
    }

    fn overlapping_tad_boundaries(
        &self,
        query: &GenomicRegion,
    ) -> Result<Vec<TadBoundary>, LookupError> {
        let q = query.to_positive_strand();
        Ok(self.lookup(query)?.tad_boundaries.overlapping(q.start, q.end))
    }
}
