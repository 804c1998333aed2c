//! Hierarchical GEOID key derivation.
//!
//! A GEOID nests its coarser geographies as leading substrings: the first
//! 2 characters name the state, the first 5 the state + county, and the
//! full string the tract. Key comparison is plain string equality.

use crate::utils::config::{COUNTY_KEY_LEN, STATE_KEY_LEN};
use crate::utils::error::AggregateError;

/// State portion of a GEOID (first 2 characters).
///
/// # Errors
/// `AggregateError::MalformedKey` when the identifier is too short; a
/// truncated GEOID is a data-format fault, not a valid key.
pub fn state_of(geo_id: &str) -> Result<&str, AggregateError> {
    geo_id
        .get(..STATE_KEY_LEN)
        .ok_or_else(|| AggregateError::MalformedKey(geo_id.to_string()))
}

/// State + county portion of a GEOID (first 5 characters).
pub fn county_of(geo_id: &str) -> Result<&str, AggregateError> {
    geo_id
        .get(..COUNTY_KEY_LEN)
        .ok_or_else(|| AggregateError::MalformedKey(geo_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefixes() {
        assert_eq!(state_of("010010001").unwrap(), "01");
        assert_eq!(county_of("010010001").unwrap(), "01001");
    }

    #[test]
    fn test_exactly_county_length() {
        assert_eq!(county_of("01001").unwrap(), "01001");
        assert_eq!(state_of("01").unwrap(), "01");
    }

    #[test]
    fn test_short_geoid_is_malformed() {
        assert!(matches!(
            county_of("0100"),
            Err(AggregateError::MalformedKey(_))
        ));
        assert!(matches!(state_of("0"), Err(AggregateError::MalformedKey(_))));
    }

    #[test]
    fn test_non_char_boundary_is_malformed() {
        // Multi-byte character straddling the prefix boundary must not panic
        assert!(matches!(
            county_of("0100é001"),
            Err(AggregateError::MalformedKey(_))
        ));
    }
}
