pub mod coordinates;
pub mod dosage;
pub mod gene;
pub mod interval;
pub mod landscape;
pub mod region;
pub mod variant;

// re-export for cleaner imports
pub use self::coordinates::{Contig, CoordinateSystem, Strand};
pub use self::dosage::{Dosage, DosageEvidence, DosageSensitivity, GeneDosageData};
pub use self::gene::{CodingRegion, Exon, Gene, GeneIdentifier, Located, Transcript};
pub use self::interval::Interval;
pub use self::landscape::{Enhancer, TadBoundary};
pub use self::region::GenomicRegion;
pub use self::variant::{Breakend, BreakendPair, SimpleVariant, Variant, VariantType};
