//! US region resolution subsystem.
//!
//! Resolves free-text location strings against static reference data for
//! states, counties, and incorporated places. Deterministic normalization
//! only — no fuzzy matching — and ambiguous county names surface as a
//! candidate list instead of a silently-picked winner.

pub mod datasets;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use resolver::{DatasetPaths, RegionResolver};
pub use types::{County, DatasetError, Place, Region, Resolved, State, ZipCode};
