use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SortError};

/// Inclusive upper bound of each decoding bin; bin `k` decodes to digit `k`.
///
/// Written out literally rather than computed as `0.1 * k` so that the
/// boundaries are exactly the decimal literals `0.1, 0.2, ..., 1.0`.
const BIN_UPPER_BOUNDS: [f64; 10] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// A single decimal digit, guaranteed to be in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const MAX: Digit = Digit(9);

    pub fn new(value: u8) -> Result<Digit> {
        if value <= 9 {
            Ok(Digit(value))
        } else {
            Err(SortError::InvalidDigit(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = SortError;

    fn try_from(value: u8) -> Result<Digit> {
        Digit::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a digit onto `[0, 1]` as `d / 9`.
pub fn normalize_digit(digit: Digit) -> f64 {
    digit.0 as f64 / 9.0
}

/// Decodes a raw value back into the digit whose bin contains it.
///
/// `[0, 0.1]` decodes to 0 and `(0.1k, 0.1(k + 1)]` decodes to `k` for
/// `k` in `1..=9`, so 0.15 is 1 and 1.0 is 9. Values below zero decode to 0
/// and values above 1 saturate to 9. NaN decodes to 0.
pub fn denormalize_digit(value: f64) -> Digit {
    if value.is_nan() {
        return Digit(0);
    }
    BIN_UPPER_BOUNDS
        .iter()
        .position(|&upper| value <= upper)
        .map(|k| Digit(k as u8))
        .unwrap_or(Digit::MAX)
}

/// Decimal expansion of `n`, most-significant digit first, no padding.
pub fn digits_of(n: u64) -> Vec<Digit> {
    n.to_string().bytes().map(|b| Digit(b - b'0')).collect()
}

pub fn normalize_digits(digits: &[Digit]) -> Vec<f64> {
    digits.iter().copied().map(normalize_digit).collect()
}

pub fn denormalize_vector(values: &[f64]) -> Vec<Digit> {
    values.iter().copied().map(denormalize_digit).collect()
}

/// Renders digits as `"1,4,5"`.
pub fn digits_to_string(digits: &[Digit]) -> String {
    digits
        .iter()
        .map(Digit::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
