//! # said-core — South African ID Number Decoding
//!
//! Decodes and validates 13-digit South African national ID numbers of the
//! form `YYMMDD SSSS C A Z`: birth date, gender sequence, citizenship code,
//! a legacy digit and a Luhn check digit.
//!
//! Decoding is progressive. A partial number yields every field its length
//! already covers, so an input field can show results keystroke by
//! keystroke. Every call is a pure function of the input and a reference
//! date; the decoder never remembers previous input.
//!
//! ## Layout
//!
//! - [`normalize`]: input policy (reject or strip non-digits).
//! - [`date`]: the `YYMMDD` fragment and century selection.
//! - [`checksum`]: Luhn check over all 13 digits.
//! - [`decode`]: the progressive [`Decoder`].
//! - [`report`]: ordered user-facing findings.
//! - [`relay`], [`holidays`], [`sink`]: payload contracts for the widgets
//!   and the persistence backend.
//! - [`session`]: the controller tying one input field to those contracts.
//!
//! ## Crate Policy
//!
//! - No I/O. Delivery and persistence are injected through
//!   [`MessageRelay`] and [`ReferenceSink`].
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Invalid input is data, not an error. [`Decoder::decode`] never fails.

pub mod checksum;
pub mod components;
pub mod config;
pub mod date;
pub mod decode;
pub mod error;
pub mod holidays;
pub mod normalize;
pub mod relay;
pub mod report;
pub mod session;
pub mod sink;

pub use checksum::{checksum_valid, expected_check_digit, ID_LENGTH};
pub use components::{Citizenship, Gender, IdComponents};
pub use config::DecoderConfig;
pub use date::BirthDate;
pub use decode::{decompose, Decoded, Decoder};
pub use error::{ConfigError, SinkError};
pub use holidays::{HolidayQuery, HolidayRequestType, UnknownRequestType};
pub use normalize::{NormalizationPolicy, Normalized};
pub use relay::{ChannelRelay, ComponentOnline, HolidayPayload, MessageRelay, RelayPayload, Widget};
pub use report::{Diagnostics, Violation};
pub use session::{IdNumberSession, Visibility};
pub use sink::{InMemoryReferenceCounter, ReferenceRecord, ReferenceSink};
