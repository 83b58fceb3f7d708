//! Core model for structural variant impact scoring.
//!
//! This crate holds the vocabulary shared by the rest of the workspace:
//!
//! - **Coordinates**: contigs, strands, coordinate systems and stranded genomic regions.
//!   Everything is stored zero-based, half-open, on the region's own strand.
//! - **Features**: genes with transcripts, enhancers and TAD boundaries, all exposing
//!   their reference location through the [`models::Located`] trait.
//! - **Variants**: simple intra-contig calls and breakend pairs.
//! - **Services**: the narrow contracts of the external collaborators (feature stores,
//!   gene dosage, phenotype relevance).
//!
//! ## Example
//!
//! ```rust
//! use svfit_core::models::{Contig, GenomicRegion, Strand};
//!
//! let chr1 = Contig::new("chr1", 1_000);
//! let region = GenomicRegion::new(chr1, Strand::Positive, 100, 200).unwrap();
//! let flipped = region.with_strand(Strand::Negative);
//! assert_eq!((flipped.start, flipped.end), (800, 900));
//! ```
pub mod errors;
pub mod models;
pub mod service;

pub use errors::{CoordinateError, CoordinateResult, LookupError};
