//! Reference data loaders: built-in state table, county FIPS table,
//! and the streamed census place file.
//!
//! All loaders are one-shot and run at startup. A missing or malformed
//! dataset is fatal; a malformed *row* in the place file is skipped and
//! counted, never an error.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::types::{County, DatasetError, Place, State};

// ─── Built-in state table ───────────────────────────────────────

/// The 50 states plus DC. Small and genuinely static, so it ships in the
/// binary rather than as a dataset file.
const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Materialize the built-in state table.
pub fn state_table() -> Vec<State> {
    STATES
        .iter()
        .map(|(code, name)| State::new(*code, *name))
        .collect()
}

// ─── County FIPS table ──────────────────────────────────────────

#[derive(Deserialize)]
struct CountyRow {
    name: String,
    state: String,
}

/// Load the county table: a JSON object keyed by 5-digit FIPS code with
/// `{name, state}` values. Returned in ascending FIPS order, which fixes
/// the order of ambiguous candidate lists downstream.
pub fn load_counties(path: &Path) -> Result<Vec<County>, DatasetError> {
    let data = std::fs::read_to_string(path)?;
    parse_counties(&data)
}

fn parse_counties(data: &str) -> Result<Vec<County>, DatasetError> {
    let rows: BTreeMap<String, CountyRow> = serde_json::from_str(data)?;
    let counties: Vec<County> = rows
        .into_iter()
        .map(|(code, row)| County::new(code, row.name, row.state))
        .collect();
    tracing::info!(count = counties.len(), "loaded county table");
    Ok(counties)
}

// ─── Census place file ──────────────────────────────────────────

/// Parse one pipe-delimited census place record.
///
/// Example: `IL|17|34722|Highland Park city|Incorporated Place|A|Lake County`
/// Field 0 = state, 2 = place code, 3 = place name, 6 = county name.
/// Anything without exactly 7 fields is not a place record.
pub fn parse_place_line(line: &str) -> Option<Place> {
    let fields: Vec<&str> = line.trim().split('|').collect();
    if fields.len() != 7 {
        return None;
    }
    Some(Place::new(fields[2], fields[3], fields[0], fields[6]))
}

/// Stream the place file line by line. Malformed rows are skipped and the
/// count logged; the returned vector preserves file order so the last row
/// wins on key collisions.
///
/// The future completes only once the whole file is consumed — awaiting it
/// is the readiness signal for place queries.
pub async fn load_places(path: &Path) -> Result<Vec<Place>, DatasetError> {
    let file = tokio::fs::File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut places = Vec::new();
    let mut skipped = 0usize;
    while let Some(line) = lines.next_line().await? {
        match parse_place_line(&line) {
            Some(place) => places.push(place),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed place records");
    }
    tracing::info!(count = places.len(), "loaded census places");
    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_state_table_complete() {
        let states = state_table();
        assert_eq!(states.len(), 51);
        assert!(states.iter().any(|s| s.code == "IL" && s.name == "Illinois"));
        assert!(states.iter().any(|s| s.code == "DC"));
    }

    #[test]
    fn test_state_table_unique_codes() {
        let states = state_table();
        let mut codes: Vec<&str> = states.iter().map(|s| s.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 51);
    }

    #[test]
    fn test_parse_counties() {
        let json = r#"{
            "17031": {"name": "Cook County", "state": "IL"},
            "41067": {"name": "Washington County", "state": "OR"},
            "42125": {"name": "Washington County", "state": "PA"}
        }"#;
        let counties = parse_counties(json).unwrap();
        assert_eq!(counties.len(), 3);
        // Ascending FIPS order.
        assert_eq!(counties[0].code, "17031");
        assert_eq!(counties[0].key(), "cook,il");
        assert_eq!(counties[1].state, "OR");
        assert_eq!(counties[2].state, "PA");
    }

    #[test]
    fn test_parse_counties_bad_json() {
        assert!(parse_counties("not json").is_err());
    }

    #[test]
    fn test_load_counties_missing_file() {
        let result = load_counties(Path::new("/nonexistent/us-counties.json"));
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn test_parse_place_line() {
        let place =
            parse_place_line("IL|17|34722|Highland Park city|Incorporated Place|A|Lake County")
                .unwrap();
        assert_eq!(place.code, "34722");
        assert_eq!(place.name, "Highland Park city");
        assert_eq!(place.state, "IL");
        assert_eq!(place.county, "Lake County");
    }

    #[test]
    fn test_parse_place_line_malformed() {
        assert!(parse_place_line("").is_none());
        assert!(parse_place_line("IL|17|34722").is_none());
        assert!(parse_place_line("a|b|c|d|e|f|g|h").is_none());
    }

    #[tokio::test]
    async fn test_load_places_skips_malformed_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "IL|17|34722|Highland Park city|Incorporated Place|A|Lake County").unwrap();
        writeln!(file, "garbage row").unwrap();
        writeln!(file, "OR|41|05800|Beaverton city|Incorporated Place|A|Washington County")
            .unwrap();
        file.flush().unwrap();

        let places = load_places(file.path()).await.unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].code, "34722");
        assert_eq!(places[1].state, "OR");
    }

    #[tokio::test]
    async fn test_load_places_missing_file() {
        let result = load_places(Path::new("/nonexistent/us-places.txt")).await;
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }
}
