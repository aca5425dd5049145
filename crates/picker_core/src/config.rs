//! Typed configuration for the picker.
//!
//! The upload cap crosses the host boundary as an attribute-style string or
//! a plain integer; it is parsed once here into `Option<NonZeroUsize>` and
//! stays typed everywhere else. Zero, negative, and non-numeric inputs all
//! normalize to unbounded rather than erroring.

use std::num::NonZeroUsize;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PickerOptions {
    #[serde(default, deserialize_with = "de_max_uploads")]
    pub max_uploads: Option<NonZeroUsize>,
}

/// Parses an attribute-style cap value. Whitespace is trimmed; anything that
/// is not a positive integer means unbounded.
pub fn parse_max_uploads(raw: &str) -> Option<NonZeroUsize> {
    raw.trim().parse::<i64>().ok().and_then(normalize_count)
}

fn normalize_count(n: i64) -> Option<NonZeroUsize> {
    if n <= 0 {
        return None;
    }
    NonZeroUsize::new(n as usize)
}

fn de_max_uploads<'de, D>(deserializer: D) -> Result<Option<NonZeroUsize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Count(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Count(n)) => normalize_count(n),
        Some(Raw::Text(s)) => parse_max_uploads(&s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_integers() {
        assert_eq!(parse_max_uploads("5"), NonZeroUsize::new(5));
        assert_eq!(parse_max_uploads(" 3 "), NonZeroUsize::new(3));
    }

    #[test]
    fn zero_negative_and_garbage_mean_unbounded() {
        assert_eq!(parse_max_uploads("0"), None);
        assert_eq!(parse_max_uploads("-2"), None);
        assert_eq!(parse_max_uploads(""), None);
        assert_eq!(parse_max_uploads("banana"), None);
    }

    #[test]
    fn toml_integer_cap() {
        let opts: PickerOptions = toml::from_str("max_uploads = 7").expect("parse");
        assert_eq!(opts.max_uploads, NonZeroUsize::new(7));
    }

    #[test]
    fn toml_zero_is_unbounded() {
        let opts: PickerOptions = toml::from_str("max_uploads = 0").expect("parse");
        assert_eq!(opts.max_uploads, None);
    }

    #[test]
    fn toml_attribute_string_cap() {
        let opts: PickerOptions = toml::from_str("max_uploads = \"7\"").expect("parse");
        assert_eq!(opts.max_uploads, NonZeroUsize::new(7));
    }

    #[test]
    fn toml_missing_field_is_unbounded() {
        let opts: PickerOptions = toml::from_str("").expect("parse");
        assert_eq!(opts.max_uploads, None);
    }
}
