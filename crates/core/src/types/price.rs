//! Type-safe price representation using decimal arithmetic.
//!
//! Prices come from the catalog API as decimal numbers and are displayed
//! the way the storefront always has: a dollar sign, thousands separators,
//! and no trailing zero cents (`$1,299` rather than `$1299.00`).

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative monetary amount.
///
/// Uses `rust_decimal` to avoid floating-point drift when summing cart
/// totals. Currency is implicit (the store quotes everything in USD).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for a given quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let amount = self.0.normalize();
        let text = amount.abs().to_string();
        let (int_part, frac_part) = text
            .split_once('.')
            .map_or((text.as_str(), None), |(i, fr)| (i, Some(fr)));

        let sign = if amount.is_sign_negative() { "-" } else { "" };
        write!(f, "{sign}${}", group_thousands(int_part))?;
        if let Some(frac) = frac_part {
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}

/// Insert `,` separators into a bare digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == offset % 3 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from(1_299).to_string(), "$1,299");
        assert_eq!(Price::from(999).to_string(), "$999");
        assert_eq!(Price::from(1_250_000).to_string(), "$1,250,000");
        assert_eq!(Price::ZERO.to_string(), "$0");
    }

    #[test]
    fn test_display_keeps_nonzero_cents() {
        assert_eq!(Price::new(dec!(1299.50)).to_string(), "$1,299.5");
        assert_eq!(Price::new(dec!(19.99)).to_string(), "$19.99");
        // Trailing zeros are normalized away
        assert_eq!(Price::new(dec!(120.00)).to_string(), "$120");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::new(dec!(120));
        assert_eq!(unit.times(3), Price::new(dec!(360)));
        let total: Price = [unit, unit.times(2)].into_iter().sum();
        assert_eq!(total, Price::new(dec!(360)));
    }

    #[test]
    fn test_serde_transparent() {
        let p: Price = serde_json::from_str("\"120\"").expect("deserialize");
        assert_eq!(p, Price::from(120));
    }
}
