//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains no digits at all.
    #[error("phone number must contain digits")]
    NoDigits,
}

/// A customer phone number, kept as entered (`010-1234-5678`).
///
/// Formatting characters are preserved for display; [`Phone::digits`] gives
/// the normalized form used for guest identity.
///
/// ```
/// use mr_daebak_core::Phone;
///
/// let phone = Phone::parse("010-1234-5678").unwrap();
/// assert_eq!(phone.digits(), "01012345678");
/// assert_eq!(phone.trailing_digits(8), "12345678");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains no ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }
        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return Err(PhoneError::NoDigits);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns only the ASCII digits, in order.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// Returns the last `n` digits (or all of them when there are fewer).
    #[must_use]
    pub fn trailing_digits(&self, n: usize) -> String {
        let digits = self.digits();
        let start = digits.len().saturating_sub(n);
        digits.get(start..).unwrap_or_default().to_owned()
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
