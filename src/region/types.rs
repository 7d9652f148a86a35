//! Core types for the region subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::normalize;

/// Capability shared by every US region variant.
///
/// `lower_case_key` is the display name lower-cased with all whitespace
/// stripped; each variant additionally derives its own lookup key(s).
pub trait Region {
    /// Stable identifier: postal code for states, FIPS code for counties,
    /// census place code for places.
    fn code(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    fn lower_case_key(&self) -> String {
        normalize::squash(self.name())
    }
}

/// A US state (or DC), keyed by its two-letter postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub code: String,
    pub name: String,
}

impl State {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into() }
    }

    /// Lookup key: the postal code, lower-cased.
    pub fn key(&self) -> String {
        self.code.to_lowercase()
    }

    /// Secondary lookup key: the full name, squashed. "New York" → "newyork".
    pub fn name_key(&self) -> String {
        normalize::squash(&self.name)
    }
}

impl Region for State {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// A US county, keyed by its 5-digit FIPS code and owning state.
///
/// See <https://en.wikipedia.org/wiki/FIPS_county_code>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct County {
    pub code: String,
    pub name: String,
    pub state: String,
}

impl County {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self { code: code.into(), name: name.into(), state: state.into() }
    }

    /// Short-name key: name squashed with the "county" substring removed.
    /// "Cook County" → "cook". Not unique nationally — many states share
    /// county names.
    pub fn short_name_key(&self) -> String {
        normalize::strip_county(&normalize::squash(&self.name))
    }

    /// Full lookup key, unique nationally. "Cook County" in IL → "cook,il".
    pub fn key(&self) -> String {
        format!("{},{}", self.short_name_key(), self.state.to_lowercase())
    }
}

impl Region for County {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for County {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.state)
    }
}

/// An incorporated place (city, town, village) or CDP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub code: String,
    pub name: String,
    pub state: String,
    pub county: String,
}

impl Place {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
        county: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            state: state.into(),
            county: county.into(),
        }
    }

    /// Lookup key: name with the trailing place-type suffix stripped, then
    /// squashed. "Highland Park city" → "highlandpark". Not unique nationally;
    /// the last-loaded entry wins on collision.
    pub fn key(&self) -> String {
        normalize::squash(normalize::strip_place_suffix(&self.name))
    }
}

impl Region for Place {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.state)
    }
}

/// A 5-digit zip code, syntactically validated only.
///
/// There is no ZCTA dataset wired in yet, so a zip code never resolves to a
/// geographic entity; it carries the digit string so the boundary stays
/// stable once that dataset lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipCode {
    pub code: String,
}

impl ZipCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// The shape a resolution query comes back in.
///
/// Callers must branch on the variant: a county short name shared by several
/// states comes back as `Counties` with every candidate, in load order, and
/// disambiguation is the caller's job. Silent tie-breaking on geographic
/// names produces wrong answers with no diagnostic trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "region", rename_all = "snake_case")]
pub enum Resolved<'a> {
    State(&'a State),
    County(&'a County),
    Place(&'a Place),
    Counties(&'a [County]),
}

impl fmt::Display for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(s) => write!(f, "{}", s),
            Self::County(c) => write!(f, "{}", c),
            Self::Place(p) => write!(f, "{}", p),
            Self::Counties(list) => {
                let names: Vec<String> = list.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", names.join("; "))
            }
        }
    }
}

/// Construction-time dataset failures. The resolver cannot function without
/// its reference data, so callers treat these as fatal at startup. Queries
/// themselves never error; all query failure is expressed in the return shape.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed county table: {0}")]
    Json(#[from] serde_json::Error),
}
