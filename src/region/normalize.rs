//! Key normalization — pure functions from raw query text to lookup keys.
//!
//! Entity key derivation in `types` uses the same helpers, so any key an
//! entity produces re-resolves through the same scheme.

/// Place-type suffixes as they appear in the census place dataset.
/// Case-sensitive on purpose: "CDP" is upper-case in the data, and a
/// lower-case " cdp" is not a type suffix.
const PLACE_SUFFIXES: &[&str] = &[" city", " town", " village", " CDP"];

/// Lower-case and strip all whitespace. "New York" → "newyork".
pub(crate) fn squash(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect()
}

/// Remove every occurrence of the literal "county" from a squashed key.
/// Anywhere, not only as a suffix — matching is on the squashed form, so
/// "Cook County" and "cookcounty" normalize identically.
pub(crate) fn strip_county(key: &str) -> String {
    key.replace("county", "")
}

/// Strip one trailing place-type suffix, if present.
pub(crate) fn strip_place_suffix(text: &str) -> &str {
    PLACE_SUFFIXES
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix))
        .unwrap_or(text)
}

/// General region key for state lookups. Input shorter than two characters
/// is not a valid location string.
pub fn region_key(text: &str) -> Option<String> {
    if text.len() < 2 {
        return None;
    }
    Some(squash(text))
}

/// County key: region key with the "county" substring removed.
/// "Cook County, IL" → "cook,il".
pub fn county_key(text: &str) -> Option<String> {
    region_key(text).map(|key| strip_county(&key))
}

/// Place key: trailing type suffix stripped, then squashed.
/// "Highland Park city" → "highlandpark".
pub fn place_key(text: &str) -> Option<String> {
    if text.len() < 2 {
        return None;
    }
    Some(squash(strip_place_suffix(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squash() {
        assert_eq!(squash("New York"), "newyork");
        assert_eq!(squash("  District  of  Columbia "), "districtofcolumbia");
        assert_eq!(squash("IL"), "il");
    }

    #[test]
    fn test_region_key_rejects_short_input() {
        assert_eq!(region_key(""), None);
        assert_eq!(region_key("x"), None);
        assert_eq!(region_key("or"), Some("or".to_string()));
    }

    #[test]
    fn test_county_key_strips_county_anywhere() {
        assert_eq!(county_key("Cook County"), Some("cook".to_string()));
        assert_eq!(county_key("Cook County, IL"), Some("cook,il".to_string()));
        // Substring removal, not suffix-only.
        assert_eq!(county_key("County of Cook"), Some("ofcook".to_string()));
    }

    #[test]
    fn test_county_key_multiword() {
        assert_eq!(
            county_key("Washington County, Oregon"),
            Some("washington,oregon".to_string())
        );
    }

    #[test]
    fn test_place_key_suffixes() {
        assert_eq!(place_key("Highland Park city"), Some("highlandpark".to_string()));
        assert_eq!(place_key("Normal town"), Some("normal".to_string()));
        assert_eq!(place_key("Lake Zurich village"), Some("lakezurich".to_string()));
        assert_eq!(place_key("Bethesda CDP"), Some("bethesda".to_string()));
    }

    #[test]
    fn test_place_key_no_suffix() {
        assert_eq!(place_key("Highland Park"), Some("highlandpark".to_string()));
    }

    #[test]
    fn test_place_key_cdp_case_sensitive() {
        // Lower-case "cdp" is not a type suffix.
        assert_eq!(place_key("Bethesda cdp"), Some("bethesdacdp".to_string()));
    }

    #[test]
    fn test_place_key_rejects_short_input() {
        assert_eq!(place_key(""), None);
        assert_eq!(place_key("x"), None);
    }
}
