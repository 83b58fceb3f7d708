use std::fmt::{self, Display};

use crate::errors::{CoordinateError, CoordinateResult};
use crate::models::coordinates::{self, Contig, CoordinateSystem, Strand};

///
/// A stranded stretch of a contig. Coordinates are zero-based, half-open and are
/// expressed on `strand`. An empty region (`start == end`) marks a position between
/// two bases, which is how insertion points and breakend junctions are located.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenomicRegion {
    pub contig: Contig,
    pub strand: Strand,
    pub start: u32,
    pub end: u32,
}

impl GenomicRegion {
    pub fn new(contig: Contig, strand: Strand, start: u32, end: u32) -> CoordinateResult<Self> {
        if start > end {
            return Err(CoordinateError::InvertedRegion { start, end });
        }
        if end > contig.length {
            return Err(CoordinateError::BeyondContigEnd {
                contig: contig.name.clone(),
                end,
                length: contig.length,
            });
        }
        Ok(GenomicRegion {
            contig,
            strand,
            start,
            end,
        })
    }

    /// Build a region from one-based, fully-closed coordinates (VCF style).
    pub fn one_based(contig: Contig, strand: Strand, start: u32, end: u32) -> CoordinateResult<Self> {
        GenomicRegion::new(contig, strand, start.saturating_sub(1), end)
    }

    ///
    /// Get length of the region
    ///
    pub fn length(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn start_on_strand(&self, strand: Strand) -> u32 {
        if self.strand == strand {
            self.start
        } else {
            self.contig.length - self.end
        }
    }

    pub fn end_on_strand(&self, strand: Strand) -> u32 {
        if self.strand == strand {
            self.end
        } else {
            self.contig.length - self.start
        }
    }

    pub fn start_with_coordinate_system(&self, system: CoordinateSystem) -> i64 {
        self.start as i64 + CoordinateSystem::ZeroBased.start_delta(system)
    }

    /// End coordinates are the same in zero-based half-open and one-based closed systems.
    pub fn end_with_coordinate_system(&self, _system: CoordinateSystem) -> i64 {
        self.end as i64
    }

    pub fn with_strand(&self, strand: Strand) -> GenomicRegion {
        if self.strand == strand {
            return self.clone();
        }
        let (start, end) = self.contig.flip(self.start, self.end);
        GenomicRegion {
            contig: self.contig.clone(),
            strand,
            start,
            end,
        }
    }

    pub fn to_positive_strand(&self) -> GenomicRegion {
        self.with_strand(Strand::Positive)
    }

    pub fn same_contig(&self, other: &GenomicRegion) -> bool {
        self.contig.name == other.contig.name
    }

    pub fn overlaps_with(&self, other: &GenomicRegion) -> bool {
        self.same_contig(other)
            && coordinates::overlap(
                self.start,
                self.end,
                other.start_on_strand(self.strand),
                other.end_on_strand(self.strand),
            )
    }

    pub fn contains(&self, other: &GenomicRegion) -> bool {
        self.same_contig(other)
            && coordinates::contains(
                self.start,
                self.end,
                other.start_on_strand(self.strand),
                other.end_on_strand(self.strand),
            )
    }

    pub fn contains_position(&self, position: u32) -> bool {
        self.start <= position && position < self.end
    }

    ///
    /// Signed distance to `other`, measured on the strand of `self`.
    ///
    /// Zero when the regions overlap or touch, positive when `other` lies downstream,
    /// negative when it lies upstream. Regions on different contigs have no distance.
    ///
    pub fn distance_to(&self, other: &GenomicRegion) -> Option<i64> {
        if !self.same_contig(other) {
            return None;
        }
        let other_start = other.start_on_strand(self.strand) as i64;
        let other_end = other.end_on_strand(self.strand) as i64;
        let (start, end) = (self.start as i64, self.end as i64);

        if other_start >= end {
            Some(other_start - end)
        } else if other_end <= start {
            Some(other_end - start)
        } else {
            Some(0)
        }
    }

    ///
    /// Get string of the region in `chr:start-end(strand)` form
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}:{}-{}({})",
            self.contig.name, self.start, self.end, self.strand
        )
    }
}

impl Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
