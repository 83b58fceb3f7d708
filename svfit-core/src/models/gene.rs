use crate::errors::{CoordinateError, CoordinateResult};
use crate::models::coordinates::Strand;
use crate::models::region::GenomicRegion;

///
/// Anything that sits on the reference genome and can be projected onto a route:
/// genes, enhancers, TAD boundaries.
///
pub trait Located {
    fn location(&self) -> &GenomicRegion;

    fn feature_id(&self) -> &str;
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneIdentifier {
    pub accession: String,
    pub symbol: String,
    pub hgnc_id: Option<String>,
}

impl GeneIdentifier {
    pub fn new(accession: &str, symbol: &str, hgnc_id: Option<&str>) -> GeneIdentifier {
        GeneIdentifier {
            accession: accession.to_string(),
            symbol: symbol.to_string(),
            hgnc_id: hgnc_id.map(str::to_string),
        }
    }
}

/// An exon of a transcript, on the transcript strand.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exon {
    pub start: u32,
    pub end: u32,
}

impl Exon {
    pub fn new(start: u32, end: u32) -> Exon {
        Exon { start, end }
    }

    pub fn length(&self) -> u32 {
        self.end - self.start
    }
}

/// Coding sequence bounds of a transcript, on the transcript strand.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodingRegion {
    pub start: u32,
    pub end: u32,
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transcript {
    pub accession: String,
    pub location: GenomicRegion,
    pub exons: Vec<Exon>,
    pub coding: Option<CodingRegion>,
}

impl Transcript {
    ///
    /// Create a transcript, checking that exons are sorted, non-overlapping, and inside
    /// the transcript, and that the coding region (if any) is inside the transcript.
    /// All coordinates are on the strand of `location`.
    ///
    pub fn new(
        accession: &str,
        location: GenomicRegion,
        exons: Vec<Exon>,
        coding: Option<CodingRegion>,
    ) -> CoordinateResult<Transcript> {
        let mut last_end = location.start;
        for exon in &exons {
            if exon.start > exon.end {
                return Err(CoordinateError::InvertedRegion {
                    start: exon.start,
                    end: exon.end,
                });
            }
            if exon.start < last_end || exon.end > location.end {
                return Err(CoordinateError::InvalidTranscript {
                    accession: accession.to_string(),
                    reason: format!("exon {}-{} is unsorted or outside", exon.start, exon.end),
                });
            }
            last_end = exon.end;
        }
        if let Some(cds) = coding {
            if cds.start > cds.end {
                return Err(CoordinateError::InvertedRegion {
                    start: cds.start,
                    end: cds.end,
                });
            }
            if cds.start < location.start || cds.end > location.end {
                return Err(CoordinateError::InvalidTranscript {
                    accession: accession.to_string(),
                    reason: format!("coding region {}-{} is outside", cds.start, cds.end),
                });
            }
        }

        Ok(Transcript {
            accession: accession.to_string(),
            location,
            exons,
            coding,
        })
    }

    pub fn strand(&self) -> Strand {
        self.location.strand
    }

    pub fn start(&self) -> u32 {
        self.location.start
    }

    pub fn end(&self) -> u32 {
        self.location.end
    }

    pub fn is_coding(&self) -> bool {
        self.coding.is_some()
    }
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gene {
    pub id: GeneIdentifier,
    pub location: GenomicRegion,
    pub transcripts: Vec<Transcript>,
}

impl Gene {
    pub fn new(id: GeneIdentifier, location: GenomicRegion, transcripts: Vec<Transcript>) -> Gene {
        Gene {
            id,
            location,
            transcripts,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.id.symbol
    }

    pub fn transcript_count(&self) -> usize {
        self.transcripts.len()
    }
}

impl Located for Gene {
    fn location(&self) -> &GenomicRegion {
        &self.location
    }

    fn feature_id(&self) -> &str {
        &self.id.accession
    }
}

impl Located for Transcript {
    fn location(&self) -> &GenomicRegion {
        &self.location
    }

    fn feature_id(&self) -> &str {
        &self.accession
    }
}
