//! # svfit
//!
//! Umbrella crate of the svfit workspace. Each member is exposed behind a feature of the
//! same name:
//!
//! - `core`: coordinate, feature and variant model, collaborator contracts
//! - `overlaprs`: in-memory interval indexes serving features to the engine
//! - `additive`: the additive impact engine
//!
//! All three are enabled by default.

#[cfg(feature = "core")]
#[doc(inline)]
pub use svfit_core as core;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use svfit_overlaprs as overlaprs;

#[cfg(feature = "additive")]
#[doc(inline)]
pub use svfit_additive as additive;
