//! # API Route Modules
//!
//! - `id_numbers` — decoding, widget relay payloads, holiday queries and
//!   reference counting for South African ID numbers.

pub mod id_numbers;
