//! Intergenic distance tiers for the simple, non-additive overlap report.
//!
//! A variant that hits no gene is described by its nearest flanking gene and by how
//! far away that gene is. Upstream and downstream are taken on the gene's strand.

use std::fmt::{self, Display};

use svfit_core::models::{GenomicRegion, Located};

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum OverlapDistance {
    Overlapping,
    Upstream500b,
    Upstream2kb,
    Upstream5kb,
    Upstream500kb,
    UpstreamFar,
    Downstream500b,
    Downstream2kb,
    Downstream5kb,
    Downstream500kb,
    DownstreamFar,
}

impl OverlapDistance {
    ///
    /// Tier of a non-overlapping variant from its signed distance to the gene.
    /// Negative distances mean the variant is upstream of the gene.
    ///
    pub fn from_signed_distance(distance: i64) -> OverlapDistance {
        let abs = distance.unsigned_abs();
        if distance < 0 {
            match abs {
                0..=500 => OverlapDistance::Upstream500b,
                501..=2_000 => OverlapDistance::Upstream2kb,
                2_001..=5_000 => OverlapDistance::Upstream5kb,
                5_001..=500_000 => OverlapDistance::Upstream500kb,
                _ => OverlapDistance::UpstreamFar,
            }
        } else {
            match abs {
                0..=500 => OverlapDistance::Downstream500b,
                501..=2_000 => OverlapDistance::Downstream2kb,
                2_001..=5_000 => OverlapDistance::Downstream5kb,
                5_001..=500_000 => OverlapDistance::Downstream500kb,
                _ => OverlapDistance::DownstreamFar,
            }
        }
    }

    ///
    /// Classify `variant` with respect to `feature`. Returns `None` when the two are
    /// on different contigs.
    ///
    pub fn classify<F: Located>(feature: &F, variant: &GenomicRegion) -> Option<OverlapDistance> {
        let location = feature.location();
        if location.overlaps_with(variant) {
            return Some(OverlapDistance::Overlapping);
        }
        let distance = location.distance_to(variant)?;
        if distance == 0 {
            // touching: the side decides the tier
            let upstream = variant.end_on_strand(location.strand) <= location.start;
            return Some(if upstream {
                OverlapDistance::Upstream500b
            } else {
                OverlapDistance::Downstream500b
            });
        }
        Some(OverlapDistance::from_signed_distance(distance))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            OverlapDistance::Upstream500b
                | OverlapDistance::Upstream2kb
                | OverlapDistance::Upstream5kb
                | OverlapDistance::Upstream500kb
                | OverlapDistance::UpstreamFar
        )
    }
}

impl Display for OverlapDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverlapDistance::Overlapping => "overlapping",
            OverlapDistance::Upstream500b => "upstream_500b",
            OverlapDistance::Upstream2kb => "upstream_2kb",
            OverlapDistance::Upstream5kb => "upstream_5kb",
            OverlapDistance::Upstream500kb => "upstream_500kb",
            OverlapDistance::UpstreamFar => "upstream",
            OverlapDistance::Downstream500b => "downstream_500b",
            OverlapDistance::Downstream2kb => "downstream_2kb",
            OverlapDistance::Downstream5kb => "downstream_5kb",
            OverlapDistance::Downstream500kb => "downstream_500kb",
            OverlapDistance::DownstreamFar => "downstream",
        };
        write!(f, "{}", name)
    }
}

///
/// Pick the flanking feature closest to `query`, together with its absolute distance.
///
/// Equal distances resolve to the upstream neighbour.
///
pub fn nearest_flanking<'a, F: Located>(
    query: &GenomicRegion,
    upstream: Option<&'a F>,
    downstream: Option<&'a F>,
) -> Option<(&'a F, u64)> {
    let measure = |f: &'a F| {
        query
            .distance_to(f.location())
            .map(|d| (f, d.unsigned_abs()))
    };
    match (upstream.and_then(measure), downstream.and_then(measure)) {
        (Some(up), Some(down)) => {
            if down.1 < up.1 {
                Some(down)
            } else {
                Some(up)
            }
        }
        (up, down) => up.or(down),
    }
}
