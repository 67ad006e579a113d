//! # said-cli — Command-Line ID Number Decoder
//!
//! Provides the `said` command-line interface over [`said_core`].
//!
//! ## Subcommands
//!
//! - `said decode` — decode one or more ID numbers, or read them from stdin.
//!
//! ```bash
//! said decode 8001015009087
//! said decode --progressive --today 2025-06-15 8001015009087
//! cat numbers.txt | said decode --json -
//! ```
//!
//! Exit codes: 0 when every number is valid, 1 when any is invalid,
//! 2 on operational errors such as bad configuration.

pub mod decode;
