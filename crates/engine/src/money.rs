use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Currency;

/// Minor units per major unit in the persisted representation.
const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount represented as **integer minor units** (cents).
///
/// Use this type for **all** monetary values (transaction amounts, totals)
/// to avoid floating-point drift. Sums and the net balance may be negative;
/// transaction amounts never are.
///
/// On disk the amount is a decimal number of major units, so `1050` is
/// stored as `10.5`:
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(10_50);
/// assert_eq!(amount.minor(), 1050);
/// assert_eq!(amount.to_string(), "10.50");
/// assert_eq!(amount.format(Currency::Brl), "R$ 10,50");
/// assert_eq!(serde_json::to_string(&amount).unwrap(), "10.5");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a single transaction may carry (fifteen digits of
    /// minor units). Up to this bound the decimal major-unit number written
    /// to storage reloads to exactly the same minor units.
    pub const MAX_AMOUNT: Money = Money(999_999_999_999_999);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Converts a decimal number of major units, rounding to the nearest
    /// minor unit. Returns `None` for NaN, infinities and out of range values.
    #[must_use]
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * MINOR_PER_MAJOR as f64).round();
        if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as i64))
    }

    /// Returns the amount as a decimal number of major units.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Renders the amount as localized currency text.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        currency.format_minor(self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_major = MINOR_PER_MAJOR.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per_major, abs % per_major)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major(value)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_major_units() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn from_major_rounds_float_noise() {
        assert_eq!(Money::from_major(0.1 + 0.2), Some(Money::new(30)));
        assert_eq!(Money::from_major(19.99), Some(Money::new(1999)));
        assert_eq!(Money::from_major(-2.5), Some(Money::new(-250)));
        assert_eq!(Money::from_major(f64::NAN), None);
        assert_eq!(Money::from_major(f64::INFINITY), None);
        assert_eq!(Money::from_major(1e30), None);
    }

    #[test]
    fn serde_uses_decimal_major_units() {
        assert_eq!(serde_json::to_string(&Money::new(1000)).unwrap(), "10.0");
        assert_eq!(serde_json::to_string(&Money::new(1999)).unwrap(), "19.99");
        let parsed: Money = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, Money::new(1000));
        let parsed: Money = serde_json::from_str("0.07").unwrap();
        assert_eq!(parsed, Money::new(7));
    }

    #[test]
    fn max_amount_survives_major_unit_round_trip() {
        for minor in [
            Money::MAX_AMOUNT.minor(),
            Money::MAX_AMOUNT.minor() - 1,
            703_687_441_776_639,
            123_456_789_012_345,
        ] {
            let amount = Money::new(minor);
            let json = serde_json::to_string(&amount).unwrap();
            let parsed: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, amount, "{json}");
        }
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
        assert_eq!(Money::new(i64::MIN).checked_sub(Money::new(1)), None);
        assert_eq!(
            Money::new(5).checked_sub(Money::new(7)),
            Some(Money::new(-2))
        );
    }

    #[test]
    fn sums_fold_from_zero() {
        let total: Money = [Money::new(1), Money::new(2), Money::new(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::new(6));
        let empty: Money = std::iter::empty().sum();
        assert_eq!(empty, Money::ZERO);
    }
}
