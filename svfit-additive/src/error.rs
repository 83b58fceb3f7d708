use thiserror::Error;

use svfit_core::errors::CoordinateError;

/// Raised when a set of variants cannot be laid out as one derivative molecule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("Variant list must not be empty")]
    Empty,

    #[error("Unable to assemble a list of {0} (>1) breakend variants")]
    MultipleBreakends(usize),

    #[error("Unable to assemble variants on {0} (>1) contigs without a breakend")]
    MultipleContigs(usize),

    #[error("Intrachromosomal breakends are not supported: {0}")]
    IntrachromosomalBreakend(String),

    #[error("Unable to assemble overlapping variants: {0} {1}")]
    Overlapping(String, String),

    #[error("Variant {variant} is not upstream of the breakend {breakend}")]
    NotUpstream { variant: String, breakend: String },

    #[error("Variant {variant} is not downstream of the breakend {breakend}")]
    NotDownstream { variant: String, breakend: String },

    #[error("Variant {variant} is on contig {contig} that is not joined by the breakend")]
    UnrelatedContig { variant: String, contig: String },
}

pub type AssemblyResult<T> = std::result::Result<T, AssemblyError>;

/// Failure of one variant set evaluation. Never aborts a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrioritizationError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

pub type PrioritizationResult<T> = std::result::Result<T, PrioritizationError>;
