//! Contracts of the external collaborators the impact engine consumes.
//!
//! Implementations are long-lived and shared read-only across worker threads,
//! so every trait requires `Send + Sync`.

use crate::errors::LookupError;
use crate::models::{Enhancer, Gene, GeneDosageData, GenomicRegion, TadBoundary};

/// Result of a feature query against one reference window.
///
/// `upstream` and `downstream` are only filled in when nothing overlaps the query.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub overlapping: Vec<T>,
    pub upstream: Option<T>,
    pub downstream: Option<T>,
}

impl<T> QueryResult<T> {
    pub fn empty() -> QueryResult<T> {
        QueryResult {
            overlapping: vec![],
            upstream: None,
            downstream: None,
        }
    }

    pub fn has_overlapping(&self) -> bool {
        !self.overlapping.is_empty()
    }
}

pub trait FeatureSource: Send + Sync {
    fn overlapping_genes(&self, query: &GenomicRegion) -> Result<QueryResult<Gene>, LookupError>;

    fn overlapping_enhancers(&self, query: &GenomicRegion) -> Result<Vec<Enhancer>, LookupError>;

    fn overlapping_tad_boundaries(
        &self,
        query: &GenomicRegion,
    ) -> Result<Vec<TadBoundary>, LookupError>;
}

pub trait GeneDosageService: Send + Sync {
    /// Dosage assertions for the gene with `hgnc_id`, restricted to records touching `region`.
    fn gene_dosage_data(&self, hgnc_id: &str, region: &GenomicRegion) -> GeneDosageData;
}

/// A dosage service that knows nothing; every gene is dosage-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDosageData;

impl GeneDosageService for NoDosageData {
    fn gene_dosage_data(&self, _hgnc_id: &str, _region: &GenomicRegion) -> GeneDosageData {
        GeneDosageData::default()
    }
}

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum ModeOfInheritance {
    AutosomalDominant,
    AutosomalRecessive,
    XDominant,
    XRecessive,
    Mitochondrial,
    Unknown,
}

impl ModeOfInheritance {
    pub fn is_dominant(&self) -> bool {
        matches!(
            self,
            ModeOfInheritance::AutosomalDominant | ModeOfInheritance::XDominant
        )
    }
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct DiseaseSummary {
    pub disease_id: String,
    pub name: String,
    pub modes_of_inheritance: Vec<ModeOfInheritance>,
}

impl DiseaseSummary {
    pub fn is_compatible_with_dominant_inheritance(&self) -> bool {
        self.modes_of_inheritance.iter().any(|m| m.is_dominant())
    }
}

pub trait PhenotypeDataService: Send + Sync {
    /// Diseases associated with the gene, keyed by gene accession.
    fn diseases_for_gene(&self, gene_id: &str) -> Vec<DiseaseSummary>;
}

///
/// Phenotype relevance of a gene for the proband, usually a term-similarity score.
/// The value becomes the `noImpact` baseline of the gene impact calculator.
///
pub trait GeneWeightCalculator: Send + Sync {
    fn calculate_relevance(&self, gene: &Gene) -> f64;
}

/// Every gene is equally relevant.
#[derive(Debug, Clone, Copy)]
pub struct ConstantGeneWeight(pub f64);

impl Default for ConstantGeneWeight {
    fn default() -> Self {
        ConstantGeneWeight(1.)
    }
}

impl GeneWeightCalculator for ConstantGeneWeight {
    fn calculate_relevance(&self, _gene: &Gene) -> f64 {
        self.0
    }
}

/// Relevance assumed for an enhancer with no gene in reach.
pub const DEFAULT_ENHANCER_RELEVANCE: f64 = 1.;

///
/// Relevance of a change to the interaction of `enhancer` with `gene` for the phenotype.
///
/// Disrupting a liver-specific enhancer is unlikely to explain a neurodevelopmental
/// phenotype, even when the gene it regulates is a good candidate.
///
pub trait EnhancerRelevance: Send + Sync {
    fn relevance(&self, gene: &Gene, enhancer: &Enhancer) -> f64;
}

#[derive(Debug, Clone, Copy)]
pub struct ConstantEnhancerRelevance(pub f64);

impl Default for ConstantEnhancerRelevance {
    fn default() -> Self {
        ConstantEnhancerRelevance(DEFAULT_ENHANCER_RELEVANCE)
    }
}

impl EnhancerRelevance for ConstantEnhancerRelevance {
    fn relevance(&self, _gene: &Gene, _enhancer: &Enhancer) -> f64 {
        self.0
    }
}

/// No disease knowledge at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhenotypeData;

impl PhenotypeDataService for NoPhenotypeData {
    fn diseases_for_gene(&self, _gene_id: &str) -> Vec<DiseaseSummary> {
        vec![]
    }
}
