//! Money type for representing won amounts
//!
//! Korean won has no minor unit in everyday use, so amounts are whole
//! numbers stored as i64. Provides arithmetic, parsing and ko-KR style
//! formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest magnitude accepted from a fractional representation (2^53),
/// beyond which an f64 no longer holds every integer exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Largest integer an f64 holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// A monetary amount in whole won
///
/// Entry amounts are always positive; totals and balances may be negative.
/// Arithmetic saturates at the i64 bounds rather than overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Won(i64);

impl Won {
    /// Create an amount from whole won
    ///
    /// # Examples
    /// ```
    /// use household_ledger::models::Won;
    /// let amount = Won::new(15_000);
    /// assert_eq!(amount.value(), 15_000);
    /// ```
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Largest amount a single entry may carry
    pub const MAX_ENTRY: Won = Won(MAX_SAFE_INTEGER);

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in won
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse an amount from user input
    ///
    /// Accepts "15000", "+15000", "-500", "₩15000" and integral decimal
    /// forms such as "15000.0" or "1.5e4". Fractional won are rejected.
    pub fn parse(s: &str) -> Result<Self, WonParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WonParseError::Empty);
        }

        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let rest = rest.strip_prefix('₩').unwrap_or(rest).trim_start();

        // One sign only; the numeric parsers would accept a second
        if rest.starts_with('+') || rest.starts_with('-') {
            return Err(WonParseError::InvalidFormat(s.to_string()));
        }

        let magnitude = match rest.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                let float: f64 = rest
                    .parse()
                    .map_err(|_| WonParseError::InvalidFormat(s.to_string()))?;
                if !float.is_finite() || float.abs() > MAX_EXACT_FLOAT {
                    return Err(WonParseError::InvalidFormat(s.to_string()));
                }
                if float.fract() != 0.0 {
                    return Err(WonParseError::Fractional(s.to_string()));
                }
                float as i64
            }
        };

        if negative {
            magnitude
                .checked_neg()
                .map(Self)
                .ok_or_else(|| WonParseError::InvalidFormat(s.to_string()))
        } else {
            Ok(Self(magnitude))
        }
    }

    /// Plain decimal rendering without symbol or separators, as used in CSV
    pub fn to_plain_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for Won {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.is_negative() {
            write!(f, "-₩{}", grouped)
        } else {
            write!(f, "₩{}", grouped)
        }
    }
}

impl From<i64> for Won {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Won {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Won {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Won {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Won {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Won {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Won {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Won::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Won> for Won {
    fn sum<I: Iterator<Item = &'a Won>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WonParseError {
    Empty,
    InvalidFormat(String),
    Fractional(String),
}

impl fmt::Display for WonParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WonParseError::Empty => write!(f, "Amount is empty"),
            WonParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            WonParseError::Fractional(s) => write!(f, "Amount must be whole won: {}", s),
        }
    }
}

impl std::error::Error for WonParseError {}
