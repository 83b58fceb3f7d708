use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("Region start {start} is past its end {end}")]
    InvertedRegion { start: u32, end: u32 },

    #[error("Region end {end} is beyond the end of contig {contig} ({length} bp)")]
    BeyondContigEnd {
        contig: String,
        end: u32,
        length: u32,
    },

    #[error("Invalid transcript {accession}: {reason}")]
    InvalidTranscript { accession: String, reason: String },

    #[error("Invalid variant {id}: {reason}")]
    InvalidVariant { id: String, reason: String },

    #[error("Unknown strand: {0}")]
    UnknownStrand(char),
}

/// Raised by feature stores when a query cannot be answered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Unknown contig: {0}")]
    UnknownContig(String),
}

pub type CoordinateResult<T> = std::result::Result<T, CoordinateError>;
