//! Client-side checks applied before a request is sent.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{CarbonArcError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// `d` marks an ASCII digit, any other byte must match literally.
const DATE_LAYOUT: &[u8] = b"dddd-dd-dd";
const DATETIME_LAYOUT: &[u8] = b"dddd-dd-ddTdd:dd:dd";

/// chrono tolerates signs, padding and single-digit fields, so the exact
/// digit and separator positions are checked first.
fn matches_layout(value: &str, layout: &[u8]) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == layout.len()
        && bytes.iter().zip(layout).all(|(&b, &l)| match l {
            b'd' => b.is_ascii_digit(),
            _ => b == l,
        })
}

/// Accept `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
///
/// # Errors
///
/// Returns [`CarbonArcError::InvalidDate`] for anything else, including
/// well-formed strings naming impossible dates.
pub fn validate_date(value: &str) -> Result<()> {
    let ok = match value.len() {
        10 => {
            matches_layout(value, DATE_LAYOUT)
                && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
        }
        19 => {
            matches_layout(value, DATETIME_LAYOUT)
                && NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).is_ok()
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(CarbonArcError::InvalidDate(value.to_string()))
    }
}

/// Validate an optional date filter.
pub fn validate_optional_date(value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), validate_date)
}
