//! # ID Number Fields
//!
//! The structured breakdown of an ID number: `YYMMDD SSSS C A Z`, where
//! `SSSS` is the gender sequence, `C` the citizenship code, `A` a legacy
//! digit and `Z` the check digit.
//!
//! Serialized field names and values follow the payload contract consumed
//! by the display widgets (`checksumCorrect`, `"SA Citizen"`, `"Invalid"`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::BirthDate;

/// Gender sequences below this value are female.
pub const FEMALE_SEQUENCE_LIMIT: u16 = 5000;

/// Gender encoded by the four-digit sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Sequence 0000–4999.
    Female,
    /// Sequence 5000–9999.
    Male,
    /// Not enough digits, or the sequence is not numeric.
    #[default]
    Invalid,
}

impl Gender {
    /// Decode a four-character sequence.
    pub fn from_sequence(sequence: &str) -> Self {
        if sequence.len() != 4 || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Invalid;
        }
        match sequence.parse::<u16>() {
            Ok(n) if n < FEMALE_SEQUENCE_LIMIT => Self::Female,
            Ok(_) => Self::Male,
            Err(_) => Self::Invalid,
        }
    }

    /// Whether the gender was decoded.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => write!(f, "Female"),
            Self::Male => write!(f, "Male"),
            Self::Invalid => write!(f, "Invalid"),
        }
    }
}

/// Citizenship status encoded by the eleventh digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Citizenship {
    /// Code `0`.
    #[serde(rename = "SA Citizen")]
    Citizen,
    /// Code `1`.
    #[serde(rename = "Permanent resident")]
    PermanentResident,
    /// Any other code, or not enough digits.
    #[default]
    Invalid,
}

impl Citizenship {
    /// Decode the citizenship code character.
    pub fn from_code(code: char) -> Self {
        match code {
            '0' => Self::Citizen,
            '1' => Self::PermanentResident,
            _ => Self::Invalid,
        }
    }

    /// Whether the citizenship code was recognised.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for Citizenship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Citizen => write!(f, "SA Citizen"),
            Self::PermanentResident => write!(f, "Permanent resident"),
            Self::Invalid => write!(f, "Invalid"),
        }
    }
}

/// Fields decoded from the current input.
///
/// Built fresh by [`decompose`](crate::decode::decompose) on every call;
/// no field ever carries a value computed from earlier input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdComponents {
    /// Number of characters analysed.
    pub length: usize,
    /// Birth date, once six characters are present.
    pub date: BirthDate,
    /// Gender, once ten characters are present.
    pub gender: Gender,
    /// Citizenship, once eleven characters are present.
    pub citizenship: Citizenship,
    /// Check digit result. Only ever true at exactly thirteen characters.
    #[serde(rename = "checksumCorrect")]
    pub checksum_valid: bool,
    /// Every applicable check passed and the number is complete.
    pub valid: bool,
}

impl IdComponents {
    /// Components for input of `length` characters with nothing decoded.
    pub fn undecoded(length: usize) -> Self {
        Self {
            length,
            date: BirthDate::Invalid,
            gender: Gender::Invalid,
            citizenship: Citizenship::Invalid,
            checksum_valid: false,
            valid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_boundary_at_5000() {
        assert_eq!(Gender::from_sequence("0000"), Gender::Female);
        assert_eq!(Gender::from_sequence("4999"), Gender::Female);
        assert_eq!(Gender::from_sequence("5000"), Gender::Male);
        assert_eq!(Gender::from_sequence("9999"), Gender::Male);
    }

    #[test]
    fn gender_rejects_non_numeric_sequences() {
        assert_eq!(Gender::from_sequence("50A9"), Gender::Invalid);
        assert_eq!(Gender::from_sequence("+123"), Gender::Invalid);
        assert_eq!(Gender::from_sequence("500"), Gender::Invalid);
        assert!(!Gender::Invalid.is_known());
    }

    #[test]
    fn citizenship_codes() {
        assert_eq!(Citizenship::from_code('0'), Citizenship::Citizen);
        assert_eq!(Citizenship::from_code('1'), Citizenship::PermanentResident);
        assert_eq!(Citizenship::from_code('2'), Citizenship::Invalid);
        assert_eq!(Citizenship::from_code('x'), Citizenship::Invalid);
    }

    #[test]
    fn display_matches_widget_labels() {
        assert_eq!(Citizenship::Citizen.to_string(), "SA Citizen");
        assert_eq!(Citizenship::PermanentResident.to_string(), "Permanent resident");
        assert_eq!(Gender::Male.to_string(), "Male");
    }

    #[test]
    fn undecoded_has_everything_invalid() {
        let c = IdComponents::undecoded(4);
        assert_eq!(c.length, 4);
        assert!(!c.date.is_valid());
        assert!(!c.gender.is_known());
        assert!(!c.citizenship.is_known());
        assert!(!c.checksum_valid);
        assert!(!c.valid);
    }

    #[test]
    fn serialized_field_names() {
        let json = serde_json::to_value(IdComponents::undecoded(0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "length": 0,
                "date": "Invalid",
                "gender": "Invalid",
                "citizenship": "Invalid",
                "checksumCorrect": false,
                "valid": false,
            })
        );
    }

    #[test]
    fn citizenship_serializes_with_label() {
        let json = serde_json::to_string(&Citizenship::PermanentResident).unwrap();
        assert_eq!(json, "\"Permanent resident\"");
        let back: Citizenship = serde_json::from_str("\"SA Citizen\"").unwrap();
        assert_eq!(back, Citizenship::Citizen);
    }
}
