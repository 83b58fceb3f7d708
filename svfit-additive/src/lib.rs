//! Additive impact engine for structural variants.
//!
//! The variants of one haplotype are assembled into the derivative molecule they
//! produce, laid out as a [`route::Route`] of segments over reference windows. Genes,
//! enhancers and TAD boundaries found along the route are projected onto it, and each
//! projection is scored by the calculator of its feature kind. The route priority is the
//! sum of how far every feature is from being unaffected.
//!
//! ## Pipeline
//!
//! 1. [`assembly::assemble`]: order and strand-normalize the variants, reject sets that
//!    cannot form one derivative molecule
//! 2. [`route::Route::materialize`]: tile the reference windows with segments
//! 3. [`route_data::RouteDataService`]: collect the features touching the windows
//! 4. [`projection::Projection::project`]: map each feature onto the route
//! 5. [`impact::SequenceImpactCalculator`]: score each projection
//! 6. [`aggregate::route_priority`]: sum contributions, adjusting for zygosity
//!
//! [`AdditivePrioritizer`] runs the whole pipeline for one variant set, and
//! [`batch::evaluate_batch`] runs it over many sets in parallel.
//!
//! ## Example
//!
//! ```rust
//! use svfit_additive::{AdditivePrioritizer, RouteData, RouteDataService, VariantSet, Zygosity};
//! use svfit_additive::config::ValidatedConfig;
//! use svfit_additive::route::Route;
//! use svfit_core::models::{Contig, Enhancer, GenomicRegion, SimpleVariant, Strand, VariantType};
//!
//! struct OneEnhancer(Enhancer);
//!
//! impl RouteDataService for OneEnhancer {
//!     fn route_data(&self, _route: &Route) -> RouteData {
//!         RouteData { enhancers: vec![self.0.clone()], ..Default::default() }
//!     }
//! }
//!
//! let chr1 = Contig::new("chr1", 100_000);
//! let region = |s, e| GenomicRegion::new(chr1.clone(), Strand::Positive, s, e).unwrap();
//! let enhancer = Enhancer::new("E1", region(5_000, 5_200));
//! let deletion = SimpleVariant::new("del", region(4_000, 6_000), VariantType::Deletion).unwrap();
//!
//! let prioritizer = AdditivePrioritizer::new(ValidatedConfig::default(), OneEnhancer(enhancer));
//! let set = VariantSet::new("sv1", vec![deletion.into()], Zygosity::Heterozygous);
//! let priority = prioritizer.evaluate(&set).unwrap();
//! assert_eq!(priority.priority, 1.0);
//! ```

pub mod aggregate;
pub mod assembly;
pub mod batch;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod event;

/// Per-feature-kind impact calculators.
pub mod impact;

pub mod prioritizer;

/// Mapping of features onto routes.
///
/// See [`projection::Projection`] for details.
pub mod projection;

pub mod route;
pub mod route_data;

// re-exports
pub use self::aggregate::{FeatureImpact, FeatureKind, RoutePriority, Zygosity};
pub use self::assembly::{VariantArrangement, assemble};
pub use self::batch::{BatchReport, evaluate_batch};
pub use self::config::{ImpactConfig, ValidatedConfig};
pub use self::diagnostic::{Impact, ImpactWarning};
pub use self::error::{AssemblyError, PrioritizationError};
pub use self::event::Event;
pub use self::prioritizer::{AdditivePrioritizer, VariantSet};
pub use self::projection::Projection;
pub use self::route::{Route, Segment};
pub use self::route_data::{FeatureRouteDataService, RouteData, RouteDataService};
