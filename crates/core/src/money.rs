//! Money in the smallest currency unit.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_object::ValueObject;

/// Non-negative amount in cents.
///
/// Serialized as a bare integer number of cents.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("malformed amount: {0:?}")]
    Malformed(String),

    #[error("too many decimal places in {0:?} (at most 2)")]
    Precision(String),

    #[error("amount out of range: {0:?}")]
    Overflow(String),
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `self × quantity`, or `None` when the result does not fit.
    pub fn checked_times(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(u64::from(quantity)).map(Money)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Sum of `amounts`, or `None` on overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    /// Share of `self` expressed in basis points, rounded half up to the cent.
    pub fn basis_points(self, bps: u32) -> Money {
        let scaled = u128::from(self.0) * u128::from(bps) + 5_000;
        Money(u64::try_from(scaled / 10_000).unwrap_or(u64::MAX))
    }
}

/// Saturating. Used for reporting aggregates; record totals go through the
/// checked operations.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Accepts `"15"`, `"8.5"`, `"5.99"`. No sign, no currency symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyError::Empty);
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(MoneyError::Malformed(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(MoneyError::Precision(s.to_string()));
        }

        let overflow = || MoneyError::Overflow(s.to_string());
        let whole: u64 = whole.parse().map_err(|_| overflow())?;
        let frac_cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| overflow())? * 10,
            _ => frac.parse().map_err(|_| overflow())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Money)
            .ok_or_else(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_common_price_shapes() {
        assert_eq!("5.99".parse::<Money>().unwrap(), Money::from_cents(599));
        assert_eq!("8.5".parse::<Money>().unwrap(), Money::from_cents(850));
        assert_eq!("15".parse::<Money>().unwrap(), Money::from_cents(1500));
        assert_eq!(" 0.07 ".parse::<Money>().unwrap(), Money::from_cents(7));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!("".parse::<Money>(), Err(MoneyError::Empty));
        assert!(matches!("-1".parse::<Money>(), Err(MoneyError::Malformed(_))));
        assert!(matches!(".5".parse::<Money>(), Err(MoneyError::Malformed(_))));
        assert!(matches!("1.2.3".parse::<Money>(), Err(MoneyError::Malformed(_))));
        assert!(matches!("1.999".parse::<Money>(), Err(MoneyError::Precision(_))));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(MoneyError::Overflow(_))
        ));
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(2048).to_string(), "20.48");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn ten_percent_rounds_half_up() {
        assert_eq!(Money::from_cents(2048).basis_points(1_000), Money::from_cents(205));
        assert_eq!(Money::from_cents(2044).basis_points(1_000), Money::from_cents(204));
        assert_eq!(Money::from_cents(5).basis_points(1_000), Money::from_cents(1));
    }

    #[test]
    fn serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(599)).unwrap();
        assert_eq!(json, "599");
    }

    #[test]
    fn checked_operations_report_overflow() {
        let half = Money::from_cents(u64::MAX / 2 + 1);
        assert_eq!(half.checked_times(2), None);
        assert_eq!(half.checked_add(half), None);
        assert_eq!(Money::checked_sum([half, half]), None);

        assert_eq!(Money::from_cents(599).checked_times(2), Some(Money::from_cents(1198)));
        assert_eq!(
            Money::checked_sum([Money::from_cents(1198), Money::from_cents(850)]),
            Some(Money::from_cents(2048))
        );
        assert_eq!(Money::checked_sum([]), Some(Money::ZERO));
    }

    proptest! {
        #[test]
        fn display_parses_back(cents in 0u64..10_000_000_000u64) {
            let money = Money::from_cents(cents);
            prop_assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
        }
    }
}
