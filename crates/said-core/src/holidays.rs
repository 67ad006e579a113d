//! # Holiday Requests
//!
//! The holiday widget looks up public holidays around a decoded birth
//! date. This module defines which lookup is wanted and derives the query
//! handed to the holiday backend. The backend itself is external.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::BirthDate;

/// Country code sent with every holiday query.
pub const HOLIDAY_COUNTRY: &str = "ZA";

/// Which holidays the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolidayRequestType {
    /// Every holiday in the birth year.
    #[serde(rename = "ShowHolidaysInYear")]
    InBirthYear,
    /// Every holiday in the birth month.
    #[serde(rename = "ShowHolidaysInMonth")]
    InBirthMonth,
    /// Holidays falling on the birthday itself.
    #[serde(rename = "ShowHolidaysOnDay")]
    OnBirthday,
}

impl HolidayRequestType {
    /// Wire name of the request type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InBirthYear => "ShowHolidaysInYear",
            Self::InBirthMonth => "ShowHolidaysInMonth",
            Self::OnBirthday => "ShowHolidaysOnDay",
        }
    }

    /// Heading shown above the holiday list.
    pub fn header_text(&self) -> &'static str {
        match self {
            Self::InBirthYear => "Holidays in year of your birth",
            Self::InBirthMonth => "Holidays in month of your birth",
            Self::OnBirthday => "Holidays on your birthday",
        }
    }
}

impl fmt::Display for HolidayRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised request type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown holiday request type: \"{0}\"")]
pub struct UnknownRequestType(pub String);

impl FromStr for HolidayRequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ShowHolidaysInYear" | "year" => Ok(Self::InBirthYear),
            "ShowHolidaysInMonth" | "month" => Ok(Self::InBirthMonth),
            "ShowHolidaysOnDay" | "day" => Ok(Self::OnBirthday),
            other => Err(UnknownRequestType(other.to_string())),
        }
    }
}

/// Query sent to the holiday backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayQuery {
    pub country: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl HolidayQuery {
    /// Narrow a query around `date` according to `request`.
    pub fn for_date(date: NaiveDate, request: HolidayRequestType) -> Self {
        let (month, day) = match request {
            HolidayRequestType::InBirthYear => (None, None),
            HolidayRequestType::InBirthMonth => (Some(date.month()), None),
            HolidayRequestType::OnBirthday => (Some(date.month()), Some(date.day())),
        };
        Self {
            country: HOLIDAY_COUNTRY.to_string(),
            year: date.year(),
            month,
            day,
        }
    }

    /// Query for a decoded birth date. `None` when the date is invalid.
    pub fn for_birth_date(date: BirthDate, request: HolidayRequestType) -> Option<Self> {
        date.date().map(|d| Self::for_date(d, request))
    }
}
