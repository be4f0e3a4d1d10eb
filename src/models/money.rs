//! Money type for representing expense amounts
//!
//! Amounts are fixed-point decimals with eight fractional digits held in an
//! `i128`. Parsed input keeps its precision up to that scale; rounding to
//! cents happens only when an amount is formatted for display. Regression
//! math converts to `f64` at the edges.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Fractional digits kept internally
pub const SCALE: u32 = 8;

/// Largest magnitude `parse` accepts, in whole currency units
pub const MAX_UNITS: i128 = 1_000_000_000_000_000;

const ONE: i128 = 10_i128.pow(SCALE);
const ONE_CENT: i128 = ONE / 100;

/// Currency symbols stripped from the front of parsed amounts
const CURRENCY_SYMBOLS: [char; 4] = ['$', '₹', '€', '£'];

/// A signed monetary amount in units of 10^-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i128);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents as i128 * ONE_CENT)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount rounded half away from zero to whole cents
    pub const fn cents(&self) -> i128 {
        let q = self.0 / ONE_CENT;
        let r = self.0 % ONE_CENT;
        if r.abs() * 2 >= ONE_CENT {
            q + self.0.signum()
        } else {
            q
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Amount as a floating point number of whole units
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / ONE as f64
    }

    /// Convert a floating point number of units at the internal scale
    ///
    /// Non-finite input saturates (NaN maps to zero).
    pub fn from_f64_rounded(value: f64) -> Self {
        Self((value * ONE as f64).round() as i128)
    }

    /// Parse an amount from user or file input
    ///
    /// Accepts an optional sign, an optional leading currency symbol, a
    /// decimal number and an optional exponent: "10.50", "-10.50",
    /// "$10.50", "+3", ".5", "1.004", "1e3", "2.5E-1". Digits beyond the
    /// internal scale are rounded half away from zero. Magnitudes above
    /// [`MAX_UNITS`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = s.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix(&CURRENCY_SYMBOLS[..]).unwrap_or(s);

        let (mantissa, exponent) = match s.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (mantissa, parse_exponent(exponent).ok_or_else(invalid)?),
            None => (s, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let digits = format!("{}{}", whole, fraction);
        let digits = digits.trim_start_matches('0');
        // Anything longer cannot fit below MAX_UNITS at the internal scale
        if digits.len() > 38 {
            return Err(MoneyParseError::OutOfRange(original.to_string()));
        }
        let significand: i128 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| invalid())?
        };

        let shift = SCALE as i32 + exponent - fraction.len() as i32;
        let magnitude = if shift >= 0 {
            10_i128
                .checked_pow(shift as u32)
                .and_then(|factor| significand.checked_mul(factor))
        } else {
            Some(divide_rounded(significand, shift.unsigned_abs()))
        }
        .filter(|value| *value <= MAX_UNITS * ONE)
        .ok_or_else(|| MoneyParseError::OutOfRange(original.to_string()))?;

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Format rounded to cents with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        format!("{}{}{}.{:02}", sign, symbol, cents / 100, cents % 100)
    }
}

fn parse_exponent(s: &str) -> Option<i32> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let exponent: i32 = s.parse().ok()?;
    (-64..=64).contains(&exponent).then_some(exponent)
}

/// `value / 10^places`, rounded half away from zero; `value` is non-negative
fn divide_rounded(value: i128, places: u32) -> i128 {
    let Some(divisor) = 10_i128.checked_pow(places) else {
        return 0;
    };
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder >= divisor - remainder {
        quotient + 1
    } else {
        quotient
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Exact decimal with at least two fractional digits, as written to the
/// CSV files
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let one = ONE as u128;

        let fraction = format!("{:0width$}", magnitude % one, width = SCALE as usize);
        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < 2 {
            fraction.push('0');
        }

        f.pad(&format!("{}{}.{}", sign, magnitude / one, fraction))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Money::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the bounds of the representation
    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
