//! # Decoder Configuration
//!
//! Two knobs: the normalization policy and an optional pinned reference
//! date. Without a pinned date, "today" is the local calendar date at the
//! moment of each decode, which is what century inference compares against.
//!
//! Configuration can be read from the environment:
//!
//! | Variable              | Values                   | Default  |
//! |-----------------------|--------------------------|----------|
//! | `SAID_NORMALIZATION`  | `reject`, `strip`        | `reject` |
//! | `SAID_REFERENCE_DATE` | `YYYY-MM-DD`             | unset    |

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize::NormalizationPolicy;

/// Environment variable selecting the normalization policy.
pub const NORMALIZATION_ENV: &str = "SAID_NORMALIZATION";

/// Environment variable pinning the reference date.
pub const REFERENCE_DATE_ENV: &str = "SAID_REFERENCE_DATE";

/// Settings shared by every decode performed through one
/// [`Decoder`](crate::decode::Decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// How raw input is normalized.
    #[serde(default)]
    pub normalization: NormalizationPolicy,
    /// Fixed "today" for century inference. `None` means the local date.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

impl DecoderConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either variable is set to an
    /// unparseable value. Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let normalization = match lookup(NORMALIZATION_ENV) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => NormalizationPolicy::default(),
        };
        let reference_date = match lookup(REFERENCE_DATE_ENV) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_reference_date(&raw)?),
            _ => None,
        };
        Ok(Self {
            normalization,
            reference_date,
        })
    }

    /// The date century inference compares against.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Parse a `YYYY-MM-DD` reference date.
pub fn parse_reference_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        ConfigError::InvalidReferenceDate {
            value: raw.to_string(),
            reason: e.to_string(),
        }
    })
}
