//! Census Regions — deterministic US region resolution.
//!
//! Given a string that might name a state, county, incorporated place, or
//! zip code, determine which geographic entity (or ambiguous set of
//! entities) it refers to.

pub mod region;
