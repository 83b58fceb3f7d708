//! Reduction of per-feature impacts to one priority per route.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use svfit_core::service::PhenotypeDataService;

use crate::diagnostic::ImpactWarning;
use crate::event::Event;

/// Contributions below this are treated as no contribution at all.
const MIN_CONTRIBUTION: f64 = 1e-8;

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zygosity {
    Heterozygous,
    Homozygous,
    Hemizygous,
    #[default]
    Unknown,
}

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Gene,
    Enhancer,
    TadBoundary,
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Gene => write!(f, "gene"),
            FeatureKind::Enhancer => write!(f, "enhancer"),
            FeatureKind::TadBoundary => write!(f, "TAD boundary"),
        }
    }
}

///
/// Impact of a route on one feature.
///
/// `spanned` describes the segments the feature overlaps, e.g. `GAP[0],DEL[1]`.
///
#[derive(PartialEq, Debug, Clone)]
pub struct FeatureImpact {
    pub feature_id: String,
    pub kind: FeatureKind,
    pub start_event: Event,
    pub end_event: Event,
    pub spanned: String,
    pub fitness: f64,
    pub no_impact: f64,
    pub warnings: Vec<ImpactWarning>,
}

impl FeatureImpact {
    /// How far the feature is from being unaffected. A triplosensitive gene duplicated
    /// as a whole scores `2 × noImpact` and contributes `noImpact`.
    pub fn contribution(&self) -> f64 {
        (self.no_impact - self.fitness).abs()
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct RoutePriority {
    pub priority: f64,
    pub features: Vec<FeatureImpact>,
    /// Reference windows whose features could not be looked up.
    pub skipped_windows: usize,
}

impl RoutePriority {
    /// True when no feature raised a warning.
    pub fn is_confident(&self) -> bool {
        self.features.iter().all(|f| f.warnings.is_empty())
    }

    pub fn n_warnings(&self) -> usize {
        self.features.iter().map(|f| f.warnings.len()).sum()
    }

    /// Features that actually contribute to the priority.
    pub fn affected(&self) -> impl Iterator<Item = &FeatureImpact> {
        self.features
            .iter()
            .filter(|f| f.contribution() >= MIN_CONTRIBUTION)
    }
}

///
/// Sum the contributions of `features`.
///
/// For heterozygous calls a gene contributes only `mode_of_inheritance_factor` of its
/// impact when it has known diseases and none of them is compatible with dominant
/// inheritance: one intact copy is then expected to be enough.
///
pub fn route_priority<P: PhenotypeDataService + ?Sized>(
    features: Vec<FeatureImpact>,
    zygosity: Zygosity,
    phenotype: &P,
    mode_of_inheritance_factor: f64,
) -> RoutePriority {
    let mut priority = 0.;
    for feature in &features {
        let contribution = feature.contribution();
        if contribution < MIN_CONTRIBUTION {
            continue;
        }

        let factor = match (zygosity, feature.kind) {
            (Zygosity::Heterozygous, FeatureKind::Gene) => {
                let diseases = phenotype.diseases_for_gene(&feature.feature_id);
                let recessive_only = !diseases.is_empty()
                    && diseases
                        .iter()
                        .all(|d| !d.is_compatible_with_dominant_inheritance());
                if recessive_only {
                    log::debug!(
                        "{} has no dominant disease, scaling by {}",
                        feature.feature_id,
                        mode_of_inheritance_factor
                    );
                    mode_of_inheritance_factor
                } else {
                    1.
                }
            }
            _ => 1.,
        };
        priority += contribution * factor;
    }

    RoutePriority {
        priority,
        features,
        skipped_windows: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svfit_core::service::{DiseaseSummary, ModeOfInheritance, NoPhenotypeData};

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    struct Diseases;

    impl PhenotypeDataService for Diseases {
        fn diseases_for_gene(&self, gene_id: &str) -> Vec<DiseaseSummary> {
            let mode = match gene_id {
                "RECESSIVE" => ModeOfInheritance::AutosomalRecessive,
                "DOMINANT" => ModeOfInheritance::AutosomalDominant,
                _ => return vec![],
            };
            vec![DiseaseSummary {
                disease_id: "OMIM:1".to_string(),
                name: "Disease".to_string(),
                modes_of_inheritance: vec![mode],
            }]
        }
    }

    fn impact(id: &str, kind: FeatureKind, fitness: f64) -> FeatureImpact {
        FeatureImpact {
            feature_id: id.to_string(),
            kind,
            start_event: Event::Deletion,
            end_event: Event::Deletion,
            spanned: "DEL[1]".to_string(),
            fitness,
            no_impact: 1.,
            warnings: vec![],
        }
    }

    #[fixture]
    fn features() -> Vec<FeatureImpact> {
        vec![
            impact("RECESSIVE", FeatureKind::Gene, 0.),
            impact("DOMINANT", FeatureKind::Gene, 0.),
            impact("UNKNOWN", FeatureKind::Gene, 0.5),
            impact("enh", FeatureKind::Enhancer, 0.9),
        ]
    }

    #[rstest]
    #[case(Zygosity::Heterozygous, 2.1)]
    #[case(Zygosity::Homozygous, 2.6)]
    #[case(Zygosity::Unknown, 2.6)]
    fn test_mode_of_inheritance_adjustment(
        features: Vec<FeatureImpact>,
        #[case] zygosity: Zygosity,
        #[case] expected: f64,
    ) {
        let priority = route_priority(features, zygosity, &Diseases, 0.5);
        assert_eq!((priority.priority - expected).abs() < 1e-9, true);
        assert_eq!(priority.features.len(), 4);
    }

    #[rstest]
    fn test_duplicated_triplosensitive_gene_contributes_no_impact() {
        let dup = impact("TS", FeatureKind::Gene, 2.);
        assert_eq!(dup.contribution(), 1.);
    }

    #[rstest]
    fn test_unaffected_features_are_skipped() {
        let features = vec![
            impact("A", FeatureKind::Gene, 1.),
            impact("B", FeatureKind::TadBoundary, 1.),
        ];
        let priority = route_priority(features, Zygosity::Heterozygous, &NoPhenotypeData, 0.5);
        assert_eq!(priority.priority, 0.);
        assert_eq!(priority.affected().count(), 0);
        assert_eq!(priority.is_confident(), true);
    }
}
