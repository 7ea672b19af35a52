// Date/time parsing and formatting
//
// User input uses a single strict format: dd/MM/yyyy HHmm (24-hour clock).
// All values are naive local date-times.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::error::{Result, YarrError};

/// chrono format for user-entered date-times
pub const INPUT_FORMAT: &str = "%d/%m/%Y %H%M";

/// chrono format used when showing date-times back to the user
pub const DISPLAY_FORMAT: &str = "%b %d %Y %H:%M";

/// chrono format used in the task ledger
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M";

// chrono accepts unpadded fields, so the exact shape is checked first
static INPUT_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4} \d{4}$").expect("valid date shape regex"));

/// Parse a user-entered date-time such as `20/12/2024 1800`
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    if !INPUT_SHAPE.is_match(input) {
        return Err(YarrError::InvalidDateFormat(input.to_string()));
    }
    NaiveDateTime::parse_from_str(input, INPUT_FORMAT)
        .map_err(|_| YarrError::InvalidDateFormat(input.to_string()))
}

/// Format a date-time for display, e.g. `Dec 20 2024 18:00`
pub fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Format a date-time for the ledger
pub fn to_storage(dt: &NaiveDateTime) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

/// Parse a ledger date-time
pub fn from_storage(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, STORAGE_FORMAT).ok()
}
