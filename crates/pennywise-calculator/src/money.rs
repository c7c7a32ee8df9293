//! Currency arithmetic and presentation helpers.
//!
//! The engine accepts plain `f64` currency units at its boundary and works in
//! [`Cents`] internally. Parsing of user-typed text and currency formatting
//! live here too so every caller renders amounts the same way.

use crate::error::ParseAmountError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Hundredths per currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

/// Rounds to two decimal places, halves away from zero.
///
/// For the non-negative amounts the engine accepts this is the same as
/// rounding half up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A fixed-point amount in hundredths of a currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cents(pub i64);

impl Cents {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Converts currency units to cents, rounding like [`round2`].
    ///
    /// The float to integer cast saturates, and NaN maps to zero; callers
    /// validate amounts before converting.
    pub fn from_amount(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Back to currency units.
    pub fn to_amount(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// `self * numerator / denominator`, rounded half up to a whole cent.
    ///
    /// Returns `None` for a zero denominator or when any operand is
    /// negative. The intermediate product is computed in 128 bits so it
    /// cannot overflow for any pair of `i64` amounts.
    pub fn scale(self, numerator: Self, denominator: Self) -> Option<Self> {
        if denominator.0 <= 0 || numerator.0 < 0 || self.0 < 0 {
            return None;
        }
        let product = i128::from(self.0) * i128::from(numerator.0);
        let denominator = i128::from(denominator.0);
        let rounded = (2 * product + denominator) / (2 * denominator);
        i64::try_from(rounded).ok().map(Self)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = CENTS_PER_UNIT.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per_unit, abs % per_unit)
    }
}

/// Reads a user-typed amount.
///
/// Everything except digits, `,`, `.` and `-` is dropped first, so currency
/// symbols and spaces are ignored. When both separators appear, the one
/// typed last is the decimal separator and the other groups thousands. A
/// single separator of either kind is a decimal separator; a separator
/// repeated several times groups thousands (`1.234.567`). Blank input reads
/// as zero, matching an untouched form field.
pub fn parse_amount(input: &str) -> Result<f64, ParseAmountError> {
    if input.trim().is_empty() {
        return Ok(0.0);
    }

    let cleaned: String =
        input.chars().filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-')).collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(ParseAmountError::NoDigits { input: input.to_string() });
    }

    let malformed = || ParseAmountError::Malformed { input: input.to_string() };

    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    if body.contains('-') {
        return Err(malformed());
    }

    let decimal = match (body.rfind(','), body.rfind('.')) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(_), None) if body.matches(',').count() == 1 => Some(','),
        (None, Some(_)) if body.matches('.').count() == 1 => Some('.'),
        _ => None,
    };

    let mut normalized = String::with_capacity(body.len() + 1);
    if negative {
        normalized.push('-');
    }
    for c in body.chars() {
        match c {
            ',' | '.' if Some(c) == decimal => normalized.push('.'),
            ',' | '.' => {}
            digit => normalized.push(digit),
        }
    }

    normalized.parse::<f64>().map_err(|_| malformed())
}

/// How amounts are rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Prefix such as `R$`.
    pub symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self { symbol: "R$".to_string(), decimal_separator: ',', thousands_separator: '.' }
    }
}

impl CurrencyFormat {
    /// Renders `value` rounded to the cent, e.g. `R$ 1.234,56`.
    pub fn format_currency(&self, value: f64) -> String {
        let cents = Cents::from_amount(value);
        let abs = cents.0.unsigned_abs();
        let per_unit = CENTS_PER_UNIT.unsigned_abs();
        let units = group_thousands(abs / per_unit, self.thousands_separator);
        let sign = if cents.is_negative() { "-" } else { "" };
        let body = format!("{units}{}{:02}", self.decimal_separator, abs % per_unit);
        if self.symbol.is_empty() { format!("{sign}{body}") } else { format!("{sign}{} {body}", self.symbol) }
    }

    /// Renders a percentage with a fixed number of decimals, e.g. `50,0%`.
    pub fn format_percentage(&self, value: f64, decimals: usize) -> String {
        let fixed = format!("{value:.decimals$}");
        format!("{}%", fixed.replace('.', &self.decimal_separator.to_string()))
    }
}

fn group_thousands(mut units: u64, separator: char) -> String {
    let mut groups = Vec::new();
    loop {
        let group = units % 1000;
        units /= 1000;
        if units == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(&separator.to_string())
}
