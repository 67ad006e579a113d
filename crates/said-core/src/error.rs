//! # Error Hierarchy
//!
//! Operational errors for the decoder, built with `thiserror`.
//!
//! Findings about an ID number itself (bad date, wrong length, failed
//! checksum) are not errors. They are [`Violation`](crate::report::Violation)
//! values carried inside every decode result, because the decoder always
//! produces a complete answer, even for empty or garbage input. The types
//! here cover the two places where something can actually go wrong:
//! reading configuration and handing results to external sinks.

use thiserror::Error;

/// Errors while building a [`DecoderConfig`](crate::config::DecoderConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The normalization policy name is not recognised.
    #[error("unknown normalization policy: \"{0}\" (expected \"reject\" or \"strip\")")]
    UnknownPolicy(String),

    /// The reference date is not a calendar date in `YYYY-MM-DD` form.
    #[error("invalid reference date: \"{value}\" ({reason})")]
    InvalidReferenceDate {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors reported by an external sink (persistence backend, relay).
///
/// Callers catch these and keep them as a local error value; a failing
/// sink never aborts the input flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The backend could not be reached.
    #[error("sink unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the outage.
        reason: String,
    },

    /// The backend refused the record.
    #[error("sink rejected record for \"{id_number}\": {reason}")]
    Rejected {
        /// The ID number carried by the refused record.
        id_number: String,
        /// Why it was refused.
        reason: String,
    },
}
