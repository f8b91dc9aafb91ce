//! Integer money in Korean won.
//!
//! Won has no minor unit, so amounts are whole numbers and all catalog prices
//! and surcharges are exact.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// An amount of Korean won.
///
/// Arithmetic saturates instead of wrapping; catalog values are far below the
/// limit, so saturation only guards against nonsense input.
///
/// ```
/// use mr_daebak_core::Won;
///
/// let base = Won::new(79_000);
/// let extras = Won::new(3_000).times(2);
/// assert_eq!(base + extras, Won::new(85_000));
/// assert_eq!((base + extras).to_string(), "85,000원");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Won(u64);

impl Won {
    /// Zero won.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a whole number of won.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying number of won.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Multiply a unit price by a count.
    #[must_use]
    pub const fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(count as u64))
    }
}

impl Add for Won {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Won {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{grouped}원")
    }
}
