//! # Birth Date Interpretation
//!
//! The first six characters of an ID number are the holder's birth date as
//! `YYMMDD`. The year has no century, so the decoder infers one: it assumes
//! the current century, and if that places the birth date after today it
//! moves the date back one hundred years. Nobody is born in the future.
//!
//! Month and day are validated against the calendar of the inferred year.
//! `NaiveDate::from_ymd_opt` never rolls over (30 February does not quietly
//! become 2 March), so a date that does not exist is simply rejected.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Marker emitted in place of a date, gender or citizenship that could not
/// be decoded.
pub const INVALID_MARKER: &str = "Invalid";

/// Number of characters in the `YYMMDD` fragment.
pub const DATE_FRAGMENT_LEN: usize = 6;

/// A decoded birth date, or the invalid marker.
///
/// Serializes as `YYYY-MM-DD` or as `"Invalid"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BirthDate {
    /// A real calendar date.
    Valid(NaiveDate),
    /// Not enough digits, or the digits are not a date.
    #[default]
    Invalid,
}

impl BirthDate {
    /// Whether this is a real calendar date.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The calendar date, if valid.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid => None,
        }
    }

    /// Render as `YYYY-MM-DD`, or the invalid marker.
    pub fn to_iso8601(&self) -> String {
        match self {
            Self::Valid(date) => date.format("%Y-%m-%d").to_string(),
            Self::Invalid => INVALID_MARKER.to_string(),
        }
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw == INVALID_MARKER {
            return Ok(Self::Invalid);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Self::Valid)
            .map_err(serde::de::Error::custom)
    }
}

/// Interpret a `YYMMDD` fragment relative to `today`.
///
/// Returns [`BirthDate::Invalid`] if the fragment is not exactly six ASCII
/// digits, if month or day are out of range for the inferred year, or if
/// moving a future date back a century lands on a day that year lacks.
pub fn interpret(fragment: &str, today: NaiveDate) -> BirthDate {
    let Some((yy, mm, dd)) = split_fragment(fragment) else {
        return BirthDate::Invalid;
    };

    let century = today.year() - today.year().rem_euclid(100);
    let Some(candidate) = NaiveDate::from_ymd_opt(century + yy, mm, dd) else {
        return BirthDate::Invalid;
    };

    if candidate > today {
        return candidate
            .with_year(candidate.year() - 100)
            .map_or(BirthDate::Invalid, BirthDate::Valid);
    }

    BirthDate::Valid(candidate)
}

/// Split `YYMMDD` into its three numeric parts.
fn split_fragment(fragment: &str) -> Option<(i32, u32, u32)> {
    let bytes = fragment.as_bytes();
    if bytes.len() != DATE_FRAGMENT_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let pair = |i: usize| u32::from(bytes[i] - b'0') * 10 + u32::from(bytes[i + 1] - b'0');
    Some((pair(0) as i32, pair(2), pair(4)))
}
