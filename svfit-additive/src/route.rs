use std::fmt::{self, Display};

use svfit_core::errors::CoordinateResult;
use svfit_core::models::{
    BreakendPair, Contig, CoordinateSystem, GenomicRegion, SimpleVariant, Strand, VariantType,
};

use crate::assembly::VariantArrangement;
use crate::event::Event;

///
/// A contiguous piece of the derivative molecule.
///
/// Every event but insertions and breakends corresponds to a `reference` interval.
/// Insertions are anchored at an empty locus between two reference bases; a breakend
/// segment carries two anchors, one per joined end.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Segment {
    /// Id of the variant that produced the segment, `None` for gaps.
    pub variant_id: Option<String>,
    pub event: Event,
    pub reference: Option<GenomicRegion>,
    pub anchors: Vec<GenomicRegion>,
    /// Number of bases the segment contributes to the derivative molecule.
    pub derivative_length: u32,
    pub coordinate_system: CoordinateSystem,
}

impl Segment {
    pub fn gap(region: GenomicRegion) -> Segment {
        Segment {
            variant_id: None,
            event: Event::Gap,
            derivative_length: region.length(),
            reference: Some(region),
            anchors: vec![],
            coordinate_system: CoordinateSystem::ZeroBased,
        }
    }

    pub fn from_variant(variant: &SimpleVariant) -> Segment {
        let event = Event::from(variant.variant_type);
        let region = variant.region.clone();
        let (reference, anchors, derivative_length) = match variant.variant_type {
            VariantType::Insertion | VariantType::Breakend => {
                (None, vec![region], variant.inserted_length)
            }
            VariantType::Deletion => (Some(region), vec![], 0),
            VariantType::Duplication => {
                let length = 2 * region.length();
                (Some(region), vec![], length)
            }
            VariantType::Snv => (Some(region), vec![], 1),
            VariantType::Inversion => {
                let length = region.length();
                (Some(region), vec![], length)
            }
        };
        Segment {
            variant_id: Some(variant.id.clone()),
            event,
            reference,
            anchors,
            derivative_length,
            coordinate_system: CoordinateSystem::ZeroBased,
        }
    }

    pub fn breakend(pair: &BreakendPair) -> Segment {
        Segment {
            variant_id: Some(pair.id.clone()),
            event: Event::Breakend,
            reference: None,
            anchors: vec![pair.left.locus(), pair.right.locus()],
            derivative_length: pair.inserted_length,
            coordinate_system: CoordinateSystem::ZeroBased,
        }
    }

    /// Reference interval or anchors, whichever the segment has.
    pub fn loci(&self) -> impl Iterator<Item = &GenomicRegion> {
        self.reference.iter().chain(self.anchors.iter())
    }

    /// Extents of the segment loci on `contig`, expressed on `strand`.
    pub fn extents_on<'a>(
        &'a self,
        contig: &'a Contig,
        strand: Strand,
    ) -> impl Iterator<Item = (u32, u32)> + 'a {
        self.loci()
            .filter(move |locus| locus.contig.name == contig.name)
            .map(move |locus| (locus.start_on_strand(strand), locus.end_on_strand(strand)))
    }

    pub fn reference_length(&self) -> u32 {
        self.loci().map(|locus| locus.length()).sum()
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loci: Vec<String> = self.loci().map(|l| l.to_string()).collect();
        write!(f, "{}[{}]", self.event, loci.join(","))
    }
}

///
/// One derivative molecule: contiguous segments plus the reference windows a feature
/// store has to be queried with.
///
/// A route assembled around a breakend has two windows, one per joined contig; the
/// breakend segment splits the segments into the left and the right arm.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Route {
    segments: Vec<Segment>,
    references: Vec<GenomicRegion>,
}

impl Route {
    ///
    /// Turn an arrangement into a route, flanking the outer ends with `flank_length`
    /// bases of untouched reference (clamped to the contig).
    ///
    pub fn materialize(arrangement: &VariantArrangement, flank_length: u32) -> CoordinateResult<Route> {
        let mut segments = vec![];
        let mut references = vec![];
        match arrangement {
            VariantArrangement::Intrachromosomal { variants } => {
                if let (Some(first), Some(last)) = (variants.first(), variants.last()) {
                    let contig = first.region.contig.clone();
                    let start = first.region.start.saturating_sub(flank_length);
                    let end = last
                        .region
                        .end
                        .saturating_add(flank_length)
                        .min(contig.length);
                    let window = GenomicRegion::new(contig, Strand::Positive, start, end)?;
                    lay_out(&mut segments, &window, variants)?;
                    references.push(window);
                }
            }
            VariantArrangement::Interchromosomal {
                left,
                breakend,
                right,
            } => {
                let (l, r) = (&breakend.left, &breakend.right);

                let left_start = left
                    .first()
                    .map_or(l.position, |v| v.region.start)
                    .saturating_sub(flank_length);
                let left_window =
                    GenomicRegion::new(l.contig.clone(), l.strand, left_start, l.position)?;
                lay_out(&mut segments, &left_window, left)?;

                segments.push(Segment::breakend(breakend));

                let right_end = right
                    .last()
                    .map_or(r.position, |v| v.region.end)
                    .saturating_add(flank_length)
                    .min(r.contig.length);
                let right_window =
                    GenomicRegion::new(r.contig.clone(), r.strand, r.position, right_end)?;
                lay_out(&mut segments, &right_window, right)?;

                references.push(left_window);
                references.push(right_window);
            }
        }
        Ok(Route {
            segments,
            references,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn references(&self) -> &[GenomicRegion] {
        &self.references
    }

    pub fn derivative_length(&self) -> u64 {
        self.segments
            .iter()
            .map(|s| s.derivative_length as u64)
            .sum()
    }

    pub fn breakend_index(&self) -> Option<usize> {
        self.segments.iter().position(|s| s.event == Event::Breakend)
    }

    /// Indices of the segments read from reference window `window`.
    pub fn arm(&self, window: usize) -> std::ops::Range<usize> {
        match (self.breakend_index(), window) {
            (None, _) => 0..self.segments.len(),
            (Some(b), 0) => 0..b,
            (Some(b), _) => b + 1..self.segments.len(),
        }
    }
}

/// Tile `window` with gaps and the variant segments, in order.
fn lay_out(
    segments: &mut Vec<Segment>,
    window: &GenomicRegion,
    variants: &[SimpleVariant],
) -> CoordinateResult<()> {
    let mut cursor = window.start;
    for variant in variants {
        if variant.region.start > cursor {
            segments.push(Segment::gap(GenomicRegion::new(
                window.contig.clone(),
                window.strand,
                cursor,
                variant.region.start,
            )?));
        }
        segments.push(Segment::from_variant(variant));
        cursor = cursor.max(variant.region.end);
    }
    if window.end > cursor {
        segments.push(Segment::gap(GenomicRegion::new(
            window.contig.clone(),
            window.strand,
            cursor,
            window.end,
        )?));
    }
    Ok(())
}

///
/// Merge the reference windows of many routes into as few queries as possible.
///
/// Windows are brought to the positive strand and overlapping or adjacent windows on
/// the same contig are merged, so nearby variants share one feature store round-trip.
///
pub fn coalesce_windows(routes: &[Route]) -> Vec<GenomicRegion> {
    let mut windows: Vec<GenomicRegion> = routes
        .iter()
        .flat_map(|r| r.references.iter().map(|w| w.to_positive_strand()))
        .collect();
    windows.sort_by(|a, b| {
        (&a.contig.name, a.start, a.end).cmp(&(&b.contig.name, b.start, b.end))
    });

    let mut merged: Vec<GenomicRegion> = Vec::with_capacity(windows.len());
    for window in windows {
        match merged.last_mut() {
            Some(last) if last.same_contig(&window) && window.start <= last.end => {
                last.end = last.end.max(window.end);
            }
            _ => merged.push(window),
        }
    }
    merged
}
