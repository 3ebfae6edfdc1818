//! edtf_grammar - An EDTF (Extended Date/Time Format) grammar engine
//!
//! This crate parses ISO 8601-2:2019 (EDTF) Level 0, Level 1 and Level 2
//! strings into a typed [`Edtf`] value, checks them against the calendar,
//! and renders them back in canonical form.
//!
//! ```
//! use edtf_grammar::{canonicalize, parse, Level};
//!
//! let value = parse("2004-06-11?").unwrap();
//! assert_eq!(value.as_date().unwrap().year.value, 2004);
//!
//! assert_eq!(canonicalize("[1667,1668]").unwrap(), "[1667, 1668]");
//! assert_eq!(edtf_grammar::classify("156X-12-2X").unwrap(), Level::Two);
//! ```

pub mod calendar;
mod display;
pub mod error;
pub mod model;
mod parser;

use std::str::FromStr;

pub use error::{ParseError, Result};
pub use model::{
    ConsecutiveRange, Date, DateOrSeason, DateTime, Day, Edtf, Endpoint, Interval, List,
    ListElement, ListKind, LongYear, MaskedPrecision, MaskedYear, Month, Precision, Quality,
    Season, SeasonKind, Time, Unspecified, Year, Zone, ZoneOffset,
};
pub use parser::{parse_with_level, Level};

/// Main entry point: parses and validates one EDTF string.
pub fn parse(text: &str) -> Result<Edtf> {
    parse_with_level(text).map(|(value, _)| value)
}

/// Whether `text` is a valid EDTF string at any level.
pub fn validate(text: &str) -> bool {
    parse(text).is_ok()
}

/// The lowest conformance level whose grammar accepts `text`.
pub fn classify(text: &str) -> Result<Level> {
    parse_with_level(text).map(|(_, level)| level)
}

/// Renders a value in canonical form.
pub fn serialize(value: &Edtf) -> String {
    value.to_string()
}

/// Parses `text` and renders it back in canonical form.
pub fn canonicalize(text: &str) -> Result<String> {
    parse(text).map(|value| serialize(&value))
}

impl FromStr for Edtf {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
