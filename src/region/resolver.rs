//! Region resolver — orchestrates the lookup chain.
//!
//! Priority: state code → state name → place → exact county key →
//! state-name-substituted county key → ambiguous county candidates → none.
//! Ambiguity comes back as the full candidate list; disambiguation belongs
//! to the caller.

use std::collections::HashMap;
use std::path::PathBuf;

use super::datasets;
use super::normalize;
use super::types::{County, DatasetError, Place, Resolved, State};

/// Locations of the file-backed reference datasets.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub counties: PathBuf,
    pub places: PathBuf,
}

/// The region resolver with its immutable lookup indices.
///
/// All indices are built once during construction and never mutated, so the
/// resolver is freely shareable across threads without locking.
pub struct RegionResolver {
    states_by_code: HashMap<String, State>,
    states_by_name: HashMap<String, State>,
    counties_by_key: HashMap<String, County>,
    county_candidates: HashMap<String, Vec<County>>,
    places_by_key: HashMap<String, Place>,
}

impl RegionResolver {
    /// Build a resolver from the reference datasets.
    ///
    /// Awaits the streamed place load to completion before returning, so a
    /// resolver value in hand is always fully loaded and safe to query.
    /// There is no partially-ready state to observe.
    pub async fn load(paths: &DatasetPaths) -> Result<Self, DatasetError> {
        let counties = datasets::load_counties(&paths.counties)?;
        let places = datasets::load_places(&paths.places).await?;
        Ok(Self::from_tables(datasets::state_table(), counties, places))
    }

    /// Build a resolver from in-memory tables (tests, embedded data).
    ///
    /// County candidate lists preserve the order of `counties`; place key
    /// collisions keep the last entry.
    pub fn from_tables(states: Vec<State>, counties: Vec<County>, places: Vec<Place>) -> Self {
        let mut states_by_code = HashMap::new();
        let mut states_by_name = HashMap::new();
        for state in states {
            states_by_name.insert(state.name_key(), state.clone());
            states_by_code.insert(state.key(), state);
        }

        let mut counties_by_key = HashMap::new();
        let mut county_candidates: HashMap<String, Vec<County>> = HashMap::new();
        for county in counties {
            county_candidates
                .entry(county.short_name_key())
                .or_default()
                .push(county.clone());
            counties_by_key.insert(county.key(), county);
        }

        let mut places_by_key = HashMap::new();
        for place in places {
            places_by_key.insert(place.key(), place);
        }

        Self {
            states_by_code,
            states_by_name,
            counties_by_key,
            county_candidates,
            places_by_key,
        }
    }

    // ─── Validation API ─────────────────────────────────────────

    /// Check whether the text names a state, by postal code or full name.
    pub fn is_valid_state(&self, text: &str) -> bool {
        match normalize::region_key(text) {
            Some(key) => {
                self.states_by_code.contains_key(&key) || self.states_by_name.contains_key(&key)
            }
            None => false,
        }
    }

    /// Syntactic zip code check: at least five characters, all ASCII digits.
    ///
    /// Longer-than-five digit strings pass, matching the consumer contract.
    /// No ZCTA dataset is consulted.
    pub fn is_valid_zip_code(&self, text: &str) -> bool {
        text.len() >= 5 && text.chars().all(|c| c.is_ascii_digit())
    }

    /// Check whether the text names a county, with or without a state part.
    pub fn is_valid_county(&self, text: &str) -> bool {
        let Some(key) = normalize::county_key(text) else {
            return false;
        };
        let state_key = self.county_state_key(&key);
        self.counties_by_key.contains_key(&key)
            || self.counties_by_key.contains_key(&state_key)
            || self.county_candidates.contains_key(&key)
    }

    /// Check whether the text names any known region type.
    pub fn is_valid_region(&self, text: &str) -> bool {
        self.is_valid_state(text) || self.is_valid_zip_code(text) || self.is_valid_county(text)
    }

    // ─── Resolution ─────────────────────────────────────────────

    /// Resolve a free-text location to a region entity.
    ///
    /// Each step short-circuits on first hit. Invalid input never errors;
    /// it yields `None`, like any other miss.
    pub fn resolve(&self, location: &str) -> Option<Resolved<'_>> {
        let region_key = normalize::region_key(location)?;

        // 1. States, by postal code then full name.
        if let Some(state) = self.states_by_code.get(&region_key) {
            return Some(Resolved::State(state));
        }
        if let Some(state) = self.states_by_name.get(&region_key) {
            return Some(Resolved::State(state));
        }

        // 2. Places, after type-suffix stripping.
        let place_key = normalize::place_key(location)?;
        if let Some(place) = self.places_by_key.get(&place_key) {
            return Some(Resolved::Place(place));
        }

        // 3. Counties: exact key, then with a full state name substituted.
        let county_key = normalize::strip_county(&region_key);
        if let Some(county) = self.counties_by_key.get(&county_key) {
            return Some(Resolved::County(county));
        }
        let county_state_key = self.county_state_key(&county_key);
        if let Some(county) = self.counties_by_key.get(&county_state_key) {
            return Some(Resolved::County(county));
        }

        // 4. Ambiguous county short name: surface every candidate.
        if let Some(candidates) = self.county_candidates.get(&county_key) {
            return Some(Resolved::Counties(candidates));
        }

        // 5. Zip codes validate syntactically but have no ZCTA dataset to
        //    resolve against, so they fall through unresolved.
        None
    }

    /// Rewrite a "name,statename" key to "name,statecode" when the trailing
    /// comma part is a known full state name. "cook,illinois" → "cook,il".
    /// Anything else passes through unchanged.
    fn county_state_key(&self, county_key: &str) -> String {
        let tokens: Vec<&str> = county_key.split(',').collect();
        if tokens.len() > 1 {
            let state_part = tokens[tokens.len() - 1];
            if let Some(state) = self.states_by_name.get(state_part) {
                return format!("{},{}", tokens[0], state.key());
            }
        }
        county_key.to_string()
    }
}
