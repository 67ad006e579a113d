//! # Normalizer
//!
//! Reduces raw input to the value the decoder analyses.
//!
//! Two policies exist, and a decoder applies exactly one of them:
//!
//! - [`NormalizationPolicy::Reject`] keeps the input as typed and reports
//!   whether it contains non-digit characters. Length is the raw character
//!   count, so `"800101-5009087"` is 14 characters long and carries a
//!   non-digit finding.
//! - [`NormalizationPolicy::Strip`] removes every non-digit character before
//!   anything is measured. The result is pure digits, so the non-digit
//!   finding can never fire against it.
//!
//! Stripping silently and then complaining about non-digits would assert two
//! contradictory things about the same value, so [`Normalized`] only carries
//! the non-digit flag produced by the policy that built it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How raw input is turned into the analysed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Analyse the input unchanged and flag any non-digit character.
    #[default]
    Reject,
    /// Drop non-digit characters before analysis.
    Strip,
}

impl NormalizationPolicy {
    /// Apply this policy to raw input.
    pub fn apply(self, raw: &str) -> Normalized {
        match self {
            Self::Reject => Normalized {
                value: raw.to_string(),
                contains_non_digits: raw.chars().any(|c| !c.is_ascii_digit()),
            },
            Self::Strip => Normalized {
                value: raw.chars().filter(char::is_ascii_digit).collect(),
                contains_non_digits: false,
            },
        }
    }

    /// The lowercase policy name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Strip => "strip",
        }
    }
}

impl fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "strip" => Ok(Self::Strip),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Input after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    value: String,
    contains_non_digits: bool,
}

impl Normalized {
    /// The analysed value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Number of characters in the analysed value.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Whether the analysed value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the analysed value contains a non-digit character.
    /// Always false under [`NormalizationPolicy::Strip`].
    pub fn contains_non_digits(&self) -> bool {
        self.contains_non_digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_keeps_input_and_flags_letters() {
        let n = NormalizationPolicy::Reject.apply("12345A789012");
        assert_eq!(n.as_str(), "12345A789012");
        assert_eq!(n.len(), 12);
        assert!(n.contains_non_digits());
    }

    #[test]
    fn reject_pure_digits_not_flagged() {
        let n = NormalizationPolicy::Reject.apply("8001015009087");
        assert!(!n.contains_non_digits());
        assert_eq!(n.len(), 13);
    }

    #[test]
    fn reject_counts_separators_towards_length() {
        let n = NormalizationPolicy::Reject.apply("800101 5009 087");
        assert_eq!(n.len(), 15);
        assert!(n.contains_non_digits());
    }

    #[test]
    fn strip_removes_non_digits_silently() {
        let n = NormalizationPolicy::Strip.apply("800101-5009-087");
        assert_eq!(n.as_str(), "8001015009087");
        assert_eq!(n.len(), 13);
        assert!(!n.contains_non_digits());
    }

    #[test]
    fn strip_of_garbage_is_empty() {
        let n = NormalizationPolicy::Strip.apply("abc-?");
        assert!(n.is_empty());
        assert!(!n.contains_non_digits());
    }

    #[test]
    fn non_ascii_digits_are_non_digits() {
        // Arabic-Indic digit three.
        let n = NormalizationPolicy::Reject.apply("80010\u{0663}");
        assert!(n.contains_non_digits());
        assert_eq!(n.len(), 6);
        assert_eq!(NormalizationPolicy::Strip.apply("80010\u{0663}").as_str(), "80010");
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!(
            "Strip".parse::<NormalizationPolicy>().unwrap(),
            NormalizationPolicy::Strip
        );
        assert_eq!(
            " reject ".parse::<NormalizationPolicy>().unwrap(),
            NormalizationPolicy::Reject
        );
        assert!(matches!(
            "lenient".parse::<NormalizationPolicy>(),
            Err(ConfigError::UnknownPolicy(_))
        ));
    }

    #[test]
    fn default_policy_is_reject() {
        assert_eq!(NormalizationPolicy::default(), NormalizationPolicy::Reject);
        assert_eq!(NormalizationPolicy::default().to_string(), "reject");
    }
}
