use std::fmt::{self, Display};

use crate::errors::{CoordinateError, CoordinateResult};

///
/// Coordinate system of a pair of region boundaries.
///
/// Everything inside this crate is stored zero-based, half-open. The one-based,
/// fully-closed variant exists for reporting and for callers that speak VCF.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    #[default]
    ZeroBased,
    OneBased,
}

impl CoordinateSystem {
    /// Delta to add to a start coordinate of `self` to express it in `target`.
    pub fn start_delta(&self, target: CoordinateSystem) -> i64 {
        match (self, target) {
            (CoordinateSystem::ZeroBased, CoordinateSystem::OneBased) => 1,
            (CoordinateSystem::OneBased, CoordinateSystem::ZeroBased) => -1,
            _ => 0,
        }
    }
}

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Positive,
    Negative,
}

impl Strand {
    pub fn opposite(&self) -> Strand {
        match self {
            Strand::Positive => Strand::Negative,
            Strand::Negative => Strand::Positive,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Strand::Positive)
    }

    pub fn from_char(c: char) -> CoordinateResult<Strand> {
        match c {
            '+' => Ok(Strand::Positive),
            '-' => Ok(Strand::Negative),
            other => Err(CoordinateError::UnknownStrand(other)),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Positive => write!(f, "+"),
            Strand::Negative => write!(f, "-"),
        }
    }
}

///
/// A named reference sequence together with its length. The length is required to
/// flip coordinates between strands.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contig {
    pub name: String,
    pub length: u32,
}

impl Contig {
    pub fn new(name: &str, length: u32) -> Contig {
        Contig {
            name: name.to_string(),
            length,
        }
    }

    /// Flip a zero-based half-open interval to the opposite strand of this contig.
    #[inline]
    pub fn flip(&self, start: u32, end: u32) -> (u32, u32) {
        (self.length - end, self.length - start)
    }
}

impl Display for Contig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Overlap of two zero-based half-open intervals.
///
/// An empty interval at `p` overlaps `[s, e)` only when `p` lies strictly inside it.
/// Two empty intervals never overlap.
#[inline]
pub fn overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    match (a_start == a_end, b_start == b_end) {
        (true, true) => false,
        (true, false) => b_start < a_start && a_start < b_end,
        (false, true) => a_start < b_start && b_start < a_end,
        (false, false) => a_start < b_end && b_start < a_end,
    }
}

/// Does `[a_start, a_end)` contain `[b_start, b_end)`? Empty `b` at either boundary counts.
#[inline]
pub fn contains(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start <= b_start && b_end <= a_end
}

/// Number of bases shared by two zero-based half-open intervals.
#[inline]
pub fn overlap_length(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> u32 {
    a_end.min(b_end).saturating_sub(a_start.max(b_start))
}
