use crate::models::gene::Located;
use crate::models::region::GenomicRegion;

/// A regulatory element, e.g. a VISTA or FANTOM5 enhancer.
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enhancer {
    pub id: String,
    pub location: GenomicRegion,
    /// Tissue or anatomy terms the enhancer is active in.
    pub tissues: Vec<String>,
    pub developmental: bool,
}

impl Enhancer {
    pub fn new(id: &str, location: GenomicRegion) -> Enhancer {
        Enhancer {
            id: id.to_string(),
            location,
            tissues: vec![],
            developmental: false,
        }
    }
}

impl Located for Enhancer {
    fn location(&self) -> &GenomicRegion {
        &self.location
    }

    fn feature_id(&self) -> &str {
        &self.id
    }
}

///
/// Boundary between two topologically associating domains. `stability` is the
/// fraction of tissues/cell types in which the boundary is observed, in `[0, 1]`.
///
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TadBoundary {
    pub id: String,
    pub location: GenomicRegion,
    pub stability: f64,
}

impl TadBoundary {
    pub fn new(id: &str, location: GenomicRegion, stability: f64) -> TadBoundary {
        TadBoundary {
            id: id.to_string(),
            location,
            stability: stability.clamp(0., 1.),
        }
    }
}

impl Located for TadBoundary {
    fn location(&self) -> &GenomicRegion {
        &self.location
    }

    fn feature_id(&self) -> &str {
        &self.id
    }
}
