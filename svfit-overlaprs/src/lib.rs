//! Read-only interval indexes that serve reference features to the impact engine.
//!
//! The impact engine itself never touches storage: it hands reference windows to a
//! [`svfit_core::service::FeatureSource`] and works with whatever comes back. This crate
//! provides an in-memory implementation of that contract.
//!
//! ## Features
//!
//! - **Fast overlap queries**: [`AugmentedList`] answers overlap queries with a binary
//!   search followed by a short backwards scan
//! - **Neighbour lookup**: nearest feature ending before or starting after a position,
//!   used to describe intergenic variants
//! - **Thread-safe**: everything is `Send + Sync` and immutable once built
//!
//! ## Quick Start
//!
//! ```rust
//! use svfit_core::models::{Contig, Enhancer, GenomicRegion, Strand};
//! use svfit_core::service::FeatureSource;
//! use svfit_overlaprs::FeatureStore;
//!
//! let chr1 = Contig::new("chr1", 10_000);
//! let enhancer = Enhancer::new(
//!     "E1",
//!     GenomicRegion::new(chr1.clone(), Strand::Positive, 100, 300).unwrap(),
//! );
//! let store = FeatureStore::new(vec![chr1.clone()], vec![], vec![enhancer], vec![]).unwrap();
//!
//! let query = GenomicRegion::new(chr1, Strand::Positive, 250, 400).unwrap();
//! assert_eq!(store.overlapping_enhancers(&query).unwrap().len(), 1);
//! ```

/// Start-sorted interval list with max-end augmentation.
///
/// See [`AugmentedList`] for details.
pub mod augmented_list;

/// Intergenic distance tiers.
pub mod distance;

pub mod errors;

/// Per-contig feature store implementing `FeatureSource`.
pub mod feature_store;

/// Core traits for interval overlap operations.
///
/// See [`Overlapper`] for details.
pub mod traits;

pub use augmented_list::AugmentedList;
pub use distance::{OverlapDistance, nearest_flanking};
pub use errors::FeatureStoreError;
pub use feature_store::FeatureStore;
pub use traits::{Interval, Overlapper};
