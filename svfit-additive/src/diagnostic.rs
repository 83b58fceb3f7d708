//! Recoverable conditions met while scoring.
//!
//! A calculator that has to fall back to a conservative value records why in an
//! [`ImpactWarning`] next to the fitness, so callers can tell a confident score from
//! a fallback. Each warning is logged once, when it is raised.

use std::fmt::{self, Display};

use crate::event::Event;

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum UtrEnd {
    FivePrime,
    ThreePrime,
}

impl Display for UtrEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtrEnd::FivePrime => write!(f, "5'UTR"),
            UtrEnd::ThreePrime => write!(f, "3'UTR"),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum ImpactWarning {
    /// A segment hit a UTR of zero length; the transcript was scored as unaffected.
    ZeroLengthUtr { transcript: String, utr: UtrEnd },

    /// A whole feature sits inside a zero-length event such as an SNV or a breakend.
    UnexpectedEnclosingEvent { feature: String, event: Event },

    /// An insertion segment has a non-empty reference footprint.
    NonZeroLengthInsertion { length: u32 },

    TranscriptWithoutExons { transcript: String },

    /// A segment outside the coding region could not be assigned to either UTR.
    UtrClassificationFailed {
        transcript: String,
        start: u32,
        end: u32,
    },
}

impl ImpactWarning {
    /// Log the warning and hand it back.
    pub fn raise(self) -> ImpactWarning {
        log::warn!("{}", self);
        self
    }
}

impl Display for ImpactWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactWarning::ZeroLengthUtr { transcript, utr } => {
                write!(f, "{} of {} is 0bp long", utr, transcript)
            }
            ImpactWarning::UnexpectedEnclosingEvent { feature, event } => write!(
                f,
                "{} is unexpectedly located within a {} event",
                feature, event
            ),
            ImpactWarning::NonZeroLengthInsertion { length } => {
                write!(f, "Bad insertion with nonzero reference length {}", length)
            }
            ImpactWarning::TranscriptWithoutExons { transcript } => {
                write!(f, "Transcript with no exons: {}", transcript)
            }
            ImpactWarning::UtrClassificationFailed {
                transcript,
                start,
                end,
            } => write!(
                f,
                "Segment {}-{} should overlap with 5'UTR or 3'UTR of {}, but it does not",
                start, end, transcript
            ),
        }
    }
}

///
/// Fitness of one feature together with the warnings raised while computing it.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Impact {
    pub fitness: f64,
    pub warnings: Vec<ImpactWarning>,
}

impl Impact {
    pub fn of(fitness: f64) -> Impact {
        Impact {
            fitness,
            warnings: vec![],
        }
    }

    pub fn is_confident(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Keep the worse of the two fitness values and every warning.
    pub fn min(mut self, other: Impact) -> Impact {
        self.fitness = self.fitness.min(other.fitness);
        self.warnings.extend(other.warnings);
        self
    }
}

/// Raised when a configuration value is clamped instead of rejected.
#[derive(PartialEq, Debug, Clone)]
pub enum ConfigWarning {
    PromoterFitnessGainClipped { value: f64 },
}

impl Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::PromoterFitnessGainClipped { value } => write!(
                f,
                "Promoter fitness gain {} cannot be greater than 1. Clipping to 1",
                value
            ),
        }
    }
}
