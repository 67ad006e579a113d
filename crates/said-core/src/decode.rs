//! # Progressive Decoder
//!
//! Decodes as much of an ID number as the current input allows. Each field
//! unlocks at a fixed length:
//!
//! | Length | Newly decoded              |
//! |--------|----------------------------|
//! | 6      | birth date (chars 0–5)     |
//! | 10     | gender (chars 6–9)         |
//! | 11     | citizenship (char 10)      |
//! | 13     | check digit                |
//!
//! The gates are a flat, ordered sequence of length guards in [`decompose`],
//! each independent of the others. Every call starts from
//! [`IdComponents::undecoded`], so a field is either computed from the
//! current input or left invalid. Nothing survives from a previous keystroke.

use chrono::NaiveDate;
use serde::Serialize;

use crate::checksum::{self, ID_LENGTH};
use crate::components::{Citizenship, Gender, IdComponents};
use crate::config::DecoderConfig;
use crate::date::{self, DATE_FRAGMENT_LEN};
use crate::report::Diagnostics;

/// Length at which the gender sequence is decoded.
pub const GENDER_THRESHOLD: usize = 10;

/// Length at which the citizenship code is decoded.
pub const CITIZENSHIP_THRESHOLD: usize = 11;

/// Outcome of decoding one input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Decoded fields.
    pub components: IdComponents,
    /// Violated rules, in display order.
    #[serde(rename = "errors")]
    pub diagnostics: Diagnostics,
}

impl Decoded {
    /// Whether the input is a complete, valid ID number.
    pub fn is_valid(&self) -> bool {
        self.components.valid
    }

    /// Findings joined for display. Empty for a valid number.
    pub fn message(&self) -> String {
        self.diagnostics.message()
    }
}

/// Stateless decoder bound to one configuration.
///
/// Cheap to clone and safe to share; decoding never mutates the decoder.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `raw` against the configured reference date (or today).
    pub fn decode(&self, raw: &str) -> Decoded {
        self.decode_on(raw, self.config.today())
    }

    /// Decode `raw` as if today were `today`.
    pub fn decode_on(&self, raw: &str, today: NaiveDate) -> Decoded {
        let normalized = self.config.normalization.apply(raw);
        let components = decompose(normalized.as_str(), today);
        let diagnostics = Diagnostics::evaluate(&normalized, &components);

        tracing::debug!(
            policy = %self.config.normalization,
            length = components.length,
            valid = components.valid,
            findings = diagnostics.violations().len(),
            "decoded id number"
        );

        Decoded {
            components,
            diagnostics,
        }
    }
}

/// Build the field set for an already-normalized value.
pub fn decompose(value: &str, today: NaiveDate) -> IdComponents {
    let chars: Vec<char> = value.chars().collect();
    let length = chars.len();
    let segment = |start: usize, end: usize| chars[start..end].iter().collect::<String>();

    let mut components = IdComponents::undecoded(length);

    if length >= DATE_FRAGMENT_LEN {
        components.date = date::interpret(&segment(0, DATE_FRAGMENT_LEN), today);
    }
    if length >= GENDER_THRESHOLD {
        components.gender = Gender::from_sequence(&segment(DATE_FRAGMENT_LEN, GENDER_THRESHOLD));
    }
    if length >= CITIZENSHIP_THRESHOLD {
        components.citizenship = Citizenship::from_code(chars[CITIZENSHIP_THRESHOLD - 1]);
    }
    if length == ID_LENGTH {
        components.checksum_valid = checksum::checksum_valid(value);
    }

    components.valid = length == ID_LENGTH
        && components.date.is_valid()
        && components.gender.is_known()
        && components.citizenship.is_known()
        && components.checksum_valid;

    components
}
