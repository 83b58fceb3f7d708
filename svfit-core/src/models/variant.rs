use std::fmt::{self, Display};

use crate::errors::{CoordinateError, CoordinateResult};
use crate::models::coordinates::{Contig, Strand};
use crate::models::region::GenomicRegion;

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariantType {
    Snv,
    Insertion,
    Deletion,
    Duplication,
    Inversion,
    Breakend,
}

impl Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantType::Snv => "SNV",
            VariantType::Insertion => "INS",
            VariantType::Deletion => "DEL",
            VariantType::Duplication => "DUP",
            VariantType::Inversion => "INV",
            VariantType::Breakend => "BND",
        };
        write!(f, "{}", name)
    }
}

///
/// An intra-contig variant call. Insertions have an empty reference region located
/// between two bases and a positive `inserted_length`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleVariant {
    pub id: String,
    pub region: GenomicRegion,
    pub variant_type: VariantType,
    pub inserted_length: u32,
}

impl SimpleVariant {
    pub fn new(
        id: &str,
        region: GenomicRegion,
        variant_type: VariantType,
    ) -> CoordinateResult<SimpleVariant> {
        match variant_type {
            VariantType::Snv if region.length() != 1 => {
                return Err(CoordinateError::InvalidVariant {
                    id: id.to_string(),
                    reason: format!("SNV spans {} bases", region.length()),
                });
            }
            VariantType::Deletion | VariantType::Duplication | VariantType::Inversion
                if region.is_empty() =>
            {
                return Err(CoordinateError::InvalidVariant {
                    id: id.to_string(),
                    reason: format!("{} with an empty reference region", variant_type),
                });
            }
            VariantType::Insertion | VariantType::Breakend => {
                return Err(CoordinateError::InvalidVariant {
                    id: id.to_string(),
                    reason: format!("{} needs a dedicated constructor", variant_type),
                });
            }
            _ => {}
        }
        Ok(SimpleVariant {
            id: id.to_string(),
            region,
            variant_type,
            inserted_length: 0,
        })
    }

    /// Insertion of `inserted_length` bases between `position - 1` and `position`.
    pub fn insertion(
        id: &str,
        contig: Contig,
        strand: Strand,
        position: u32,
        inserted_length: u32,
    ) -> CoordinateResult<SimpleVariant> {
        let region = GenomicRegion::new(contig, strand, position, position)?;
        Ok(SimpleVariant {
            id: id.to_string(),
            region,
            variant_type: VariantType::Insertion,
            inserted_length,
        })
    }

    pub fn with_strand(&self, strand: Strand) -> SimpleVariant {
        SimpleVariant {
            id: self.id.clone(),
            region: self.region.with_strand(strand),
            variant_type: self.variant_type,
            inserted_length: self.inserted_length,
        }
    }
}

/// One end of a novel adjacency: an empty locus on `strand`.
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakend {
    pub id: String,
    pub contig: Contig,
    pub strand: Strand,
    pub position: u32,
}

impl Breakend {
    pub fn new(id: &str, contig: Contig, strand: Strand, position: u32) -> CoordinateResult<Breakend> {
        if position > contig.length {
            return Err(CoordinateError::BeyondContigEnd {
                contig: contig.name.clone(),
                end: position,
                length: contig.length,
            });
        }
        Ok(Breakend {
            id: id.to_string(),
            contig,
            strand,
            position,
        })
    }

    pub fn locus(&self) -> GenomicRegion {
        GenomicRegion {
            contig: self.contig.clone(),
            strand: self.strand,
            start: self.position,
            end: self.position,
        }
    }

    /// Signed distance from the breakend to `region` on the breakend strand.
    pub fn distance_to(&self, region: &GenomicRegion) -> Option<i64> {
        self.locus().distance_to(region)
    }
}

impl Display for Breakend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}({})", self.contig.name, self.position, self.strand)
    }
}

///
/// Two mated breakends. Reading the derivative molecule, the `left` contig is followed
/// on its strand up to the left position, then `inserted_length` novel bases, then the
/// `right` contig from the right position onwards on its strand.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakendPair {
    pub id: String,
    pub left: Breakend,
    pub right: Breakend,
    pub inserted_length: u32,
}

impl BreakendPair {
    pub fn new(id: &str, left: Breakend, right: Breakend, inserted_length: u32) -> BreakendPair {
        BreakendPair {
            id: id.to_string(),
            left,
            right,
            inserted_length,
        }
    }
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    Simple(SimpleVariant),
    Breakend(BreakendPair),
}

impl Variant {
    pub fn id(&self) -> &str {
        match self {
            Variant::Simple(v) => &v.id,
            Variant::Breakend(b) => &b.id,
        }
    }

    /// Contig of the variant, the left contig for a breakend pair.
    pub fn contig(&self) -> &Contig {
        match self {
            Variant::Simple(v) => &v.region.contig,
            Variant::Breakend(b) => &b.left.contig,
        }
    }

    pub fn variant_type(&self) -> VariantType {
        match self {
            Variant::Simple(v) => v.variant_type,
            Variant::Breakend(_) => VariantType::Breakend,
        }
    }

    pub fn is_breakend(&self) -> bool {
        matches!(self, Variant::Breakend(_))
    }

    /// Short, log-friendly summary such as `del1 DEL chr1:100-200(+)`.
    pub fn summary(&self) -> String {
        match self {
            Variant::Simple(v) => format!("{} {} {}", v.id, v.variant_type, v.region),
            Variant::Breakend(b) => format!("{} BND {}->{}", b.id, b.left, b.right),
        }
    }
}

impl From<SimpleVariant> for Variant {
    fn from(value: SimpleVariant) -> Self {
        Variant::Simple(value)
    }
}

impl From<BreakendPair> for Variant {
    fn from(value: BreakendPair) -> Self {
        Variant::Breakend(value)
    }
}
