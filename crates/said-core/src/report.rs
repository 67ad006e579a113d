//! # Diagnostics
//!
//! Turns a decode result into the list of human-readable findings shown
//! next to the input field. Rules are evaluated in a fixed order and none
//! suppresses another, so a 12-character input with a letter in it reports
//! both the non-digit and the length finding, non-digit first.

use serde::Serialize;
use thiserror::Error;

use crate::checksum::ID_LENGTH;
use crate::components::IdComponents;
use crate::date::DATE_FRAGMENT_LEN;
use crate::decode::CITIZENSHIP_THRESHOLD;
use crate::normalize::Normalized;

/// Separator used when findings are joined for display.
pub const SEPARATOR: &str = ". ";

/// One violated rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The analysed value contains a non-digit character.
    #[error("Number must not contain any non-digit characters")]
    NonDigit,

    /// The analysed value is not thirteen characters long.
    #[error("Number must be exactly 13 digits long")]
    Length,

    /// The first six characters are not a `YYMMDD` date.
    #[error("Invalid first 6 digits. Must be date in YYMMDD format")]
    Date,

    /// The eleventh character is neither `0` nor `1`.
    #[error("Invalid citizenship code: Must be 0 or 1")]
    Citizenship,

    /// The check digit does not match.
    #[error("Invalid checksum digit.")]
    Checksum,
}

impl Violation {
    /// Machine-readable code for the finding.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonDigit => "FORMAT_ERROR",
            Self::Length => "LENGTH_ERROR",
            Self::Date => "DATE_ERROR",
            Self::Citizenship => "CITIZENSHIP_ERROR",
            Self::Checksum => "CHECKSUM_ERROR",
        }
    }
}

/// Ordered findings for one decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Diagnostics(Vec<Violation>);

impl Diagnostics {
    /// Evaluate every rule against the normalized input and its components.
    pub fn evaluate(normalized: &Normalized, components: &IdComponents) -> Self {
        let length = components.length;
        let rules = [
            (normalized.contains_non_digits(), Violation::NonDigit),
            (length != ID_LENGTH, Violation::Length),
            (
                length >= DATE_FRAGMENT_LEN && !components.date.is_valid(),
                Violation::Date,
            ),
            (
                length >= CITIZENSHIP_THRESHOLD && !components.citizenship.is_known(),
                Violation::Citizenship,
            ),
            (
                length == ID_LENGTH && !components.checksum_valid,
                Violation::Checksum,
            ),
        ];

        Self(
            rules
                .into_iter()
                .filter_map(|(violated, violation)| violated.then_some(violation))
                .collect(),
        )
    }

    /// The findings, in rule order.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Whether no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `violation` is among the findings.
    pub fn contains(&self, violation: Violation) -> bool {
        self.0.contains(&violation)
    }

    /// Each finding's display text, in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// All findings joined with [`SEPARATOR`]. Empty when there are none.
    pub fn message(&self) -> String {
        self.messages().join(SEPARATOR)
    }
}

impl Serialize for Diagnostics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}
