//! # Decode Subcommand
//!
//! Decodes ID numbers given on the command line or on stdin and prints
//! the decoded fields with any findings. `--progressive` replays the number
//! one character at a time, showing what an input field would display
//! after each keystroke.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use said_core::checksum::{expected_check_digit, parse_digits};
use said_core::config::parse_reference_date;
use said_core::{Decoded, Decoder, DecoderConfig, NormalizationPolicy, Violation};

/// Arguments for the `said decode` subcommand.
#[derive(Args, Debug, Default)]
pub struct DecodeArgs {
    /// ID numbers to decode. Pass `-` to read one per line from stdin.
    #[arg(value_name = "NUMBER", required = true)]
    pub numbers: Vec<String>,

    /// Strip non-digit characters instead of reporting them.
    #[arg(long)]
    pub strip: bool,

    /// Reference date for century inference (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    pub today: Option<String>,

    /// Print one JSON object per decoded value.
    #[arg(long)]
    pub json: bool,

    /// Decode every prefix of each number, as typed.
    #[arg(long)]
    pub progressive: bool,

    /// Show the expected check digit when the checksum fails.
    #[arg(long)]
    pub explain: bool,
}

/// Execute the decode subcommand.
///
/// Returns exit code: 0 if every number is valid, 1 if any is invalid.
/// Configuration problems surface as errors.
pub fn run_decode(args: &DecodeArgs) -> Result<u8> {
    let env = DecoderConfig::from_env().context("invalid decoder configuration in environment")?;
    let config = resolve_config(args, env)?;
    tracing::debug!(
        normalization = %config.normalization,
        reference_date = ?config.reference_date,
        "resolved decoder configuration"
    );

    let numbers = collect_numbers(&args.numbers, io::stdin().lock())?;
    if numbers.is_empty() {
        bail!("no ID numbers to decode");
    }

    let decoder = Decoder::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let all_valid = decode_all(&decoder, &numbers, args, &mut out)?;

    Ok(if all_valid { 0 } else { 1 })
}

/// Apply command-line overrides on top of the environment configuration.
pub fn resolve_config(args: &DecodeArgs, mut config: DecoderConfig) -> Result<DecoderConfig> {
    if args.strip {
        config.normalization = NormalizationPolicy::Strip;
    }
    if let Some(ref today) = args.today {
        config.reference_date =
            Some(parse_reference_date(today).context("invalid --today value")?);
    }
    Ok(config)
}

/// Expand `-` into the lines read from `stdin`. Blank lines are skipped.
pub fn collect_numbers(args: &[String], stdin: impl BufRead) -> Result<Vec<String>> {
    if !args.iter().any(|a| a == "-") {
        return Ok(args.to_vec());
    }

    let mut piped = Vec::new();
    for line in stdin.lines() {
        let line = line.context("failed to read ID numbers from stdin")?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            piped.push(line.to_string());
        }
    }

    let mut numbers = Vec::with_capacity(args.len() + piped.len());
    for arg in args {
        if arg == "-" {
            numbers.append(&mut piped);
        } else {
            numbers.push(arg.clone());
        }
    }
    Ok(numbers)
}

/// Decode and print every number. Returns whether all of them are valid.
///
/// Progressive prefixes are printed but only the complete number counts
/// towards the result.
pub fn decode_all(
    decoder: &Decoder,
    numbers: &[String],
    args: &DecodeArgs,
    out: &mut impl Write,
) -> Result<bool> {
    let mut all_valid = true;
    for number in numbers {
        if args.progressive {
            let chars: Vec<char> = number.chars().collect();
            for end in 1..chars.len() {
                let prefix: String = chars[..end].iter().collect();
                let report = DecodeReport::new(decoder, &prefix, args.explain);
                if args.json {
                    write_json(out, &report)?;
                } else {
                    write_progress_line(out, &report)?;
                }
            }
        }

        let report = DecodeReport::new(decoder, number, args.explain);
        if args.json {
            write_json(out, &report)?;
        } else if args.progressive {
            write_progress_line(out, &report)?;
            writeln!(out)?;
        } else {
            write_text(out, &report)?;
        }
        all_valid &= report.decoded.is_valid();
    }
    out.flush()?;
    Ok(all_valid)
}

/// One decoded value as printed.
#[derive(Debug, Serialize)]
pub struct DecodeReport<'a> {
    pub input: &'a str,
    #[serde(flatten)]
    pub decoded: Decoded,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_check_digit: Option<u8>,
}

impl<'a> DecodeReport<'a> {
    pub fn new(decoder: &Decoder, input: &'a str, explain: bool) -> Self {
        let decoded = decoder.decode(input);
        let message = decoded.message();
        let expected_check_digit = if explain && decoded.diagnostics.contains(Violation::Checksum)
        {
            let normalized = decoder.config().normalization.apply(input);
            parse_digits(normalized.as_str()).map(|digits| {
                let mut prefix = [0u8; 12];
                prefix.copy_from_slice(&digits[..12]);
                expected_check_digit(&prefix)
            })
        } else {
            None
        };
        Self {
            input,
            decoded,
            message,
            expected_check_digit,
        }
    }
}

fn write_json(out: &mut impl Write, report: &DecodeReport<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, report).context("failed to serialize decode report")?;
    writeln!(out)?;
    Ok(())
}

fn write_text(out: &mut impl Write, report: &DecodeReport<'_>) -> Result<()> {
    let components = &report.decoded.components;
    let status = if components.valid { "valid" } else { "INVALID" };
    writeln!(out, "{}: {status}", report.input)?;
    writeln!(out, "  birth date:   {}", components.date)?;
    writeln!(out, "  gender:       {}", components.gender)?;
    writeln!(out, "  citizenship:  {}", components.citizenship)?;
    match report.expected_check_digit {
        Some(digit) => writeln!(out, "  checksum:     incorrect (expected {digit})")?,
        None if components.checksum_valid => writeln!(out, "  checksum:     correct")?,
        None => writeln!(out, "  checksum:     incorrect")?,
    }
    for message in report.decoded.diagnostics.messages() {
        writeln!(out, "  error: {message}")?;
    }
    Ok(())
}

fn write_progress_line(out: &mut impl Write, report: &DecodeReport<'_>) -> Result<()> {
    let c = &report.decoded.components;
    write!(
        out,
        "{:<13}  {:<10}  {:<7}  {:<18}  {}",
        report.input,
        c.date.to_string(),
        c.gender.to_string(),
        c.citizenship.to_string(),
        if c.checksum_valid { "ok" } else { "-" },
    )?;
    if report.message.is_empty() {
        writeln!(out)?;
    } else {
        writeln!(out, "  {}", report.message)?;
    }
    Ok(())
}
