//! # Check Digit
//!
//! The thirteenth digit of an ID number is a Luhn check digit over the first
//! twelve. Counting from the end, every second digit (offsets 1, 3, ..., 11)
//! is doubled, with 9 subtracted when the double exceeds 9. The number is
//! valid when the sum of all thirteen resulting digits is a multiple of 10.

/// Number of digits in a complete ID number.
pub const ID_LENGTH: usize = 13;

/// Parse exactly thirteen ASCII digits.
pub fn parse_digits(value: &str) -> Option<[u8; ID_LENGTH]> {
    let bytes = value.as_bytes();
    if bytes.len() != ID_LENGTH {
        return None;
    }
    let mut digits = [0u8; ID_LENGTH];
    for (slot, byte) in digits.iter_mut().zip(bytes) {
        if !byte.is_ascii_digit() {
            return None;
        }
        *slot = byte - b'0';
    }
    Some(digits)
}

/// Apply the doubling step, leaving undoubled positions untouched.
pub fn weighted_digits(digits: &[u8; ID_LENGTH]) -> [u8; ID_LENGTH] {
    let mut weighted = *digits;
    for offset in (1..ID_LENGTH).step_by(2) {
        let idx = ID_LENGTH - 1 - offset;
        let doubled = weighted[idx] * 2;
        weighted[idx] = if doubled > 9 { doubled - 9 } else { doubled };
    }
    weighted
}

/// Sum of the weighted digits.
pub fn luhn_sum(digits: &[u8; ID_LENGTH]) -> u32 {
    weighted_digits(digits).iter().map(|&d| u32::from(d)).sum()
}

/// Whether `value` is thirteen digits with a correct check digit.
///
/// Anything that is not exactly thirteen ASCII digits is invalid.
pub fn checksum_valid(value: &str) -> bool {
    parse_digits(value).is_some_and(|digits| luhn_sum(&digits) % 10 == 0)
}

/// The check digit that completes a twelve-digit prefix.
pub fn expected_check_digit(prefix: &[u8; ID_LENGTH - 1]) -> u8 {
    let mut digits = [0u8; ID_LENGTH];
    digits[..ID_LENGTH - 1].copy_from_slice(prefix);
    // The final position is never doubled, so it adds to the sum unchanged.
    let remainder = luhn_sum(&digits) % 10;
    ((10 - remainder) % 10) as u8
}
