use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use svfit_core::models::VariantType;

/// The kind of rearrangement that produced a stretch of the derivative sequence.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    /// Untouched reference sequence.
    Gap,
    Snv,
    Insertion,
    Deletion,
    Duplication,
    Inversion,
    Breakend,
}

impl Event {
    /// Everything but a gap may change the function of a feature.
    pub fn is_causal(&self) -> bool {
        !matches!(self, Event::Gap)
    }
}

impl From<VariantType> for Event {
    fn from(value: VariantType) -> Self {
        match value {
            VariantType::Snv => Event::Snv,
            VariantType::Insertion => Event::Insertion,
            VariantType::Deletion => Event::Deletion,
            VariantType::Duplication => Event::Duplication,
            VariantType::Inversion => Event::Inversion,
            VariantType::Breakend => Event::Breakend,
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Event::Gap => "GAP",
            Event::Snv => "SNV",
            Event::Insertion => "INS",
            Event::Deletion => "DEL",
            Event::Duplication => "DUP",
            Event::Inversion => "INV",
            Event::Breakend => "BND",
        };
        write!(f, "{}", name)
    }
}
