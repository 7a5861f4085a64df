//! The exact-decimal money type used for balances and transaction amounts.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with exact decimal arithmetic.
///
/// Amounts are stored in the database as canonical decimal text (e.g.
/// `"-12.30"`) and decoded back into a [Amount] exactly once when a row is
/// read. Summing amounts does not accumulate binary rounding error, so a
/// balance derived from thousands of transactions is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// An amount of zero.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Create an amount from integer `units` scaled down by `scale` decimal
    /// places, e.g. `Amount::new(30_00, 2)` is 30.00.
    pub fn new(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    /// Whether the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether the amount is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(text).map(Amount)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>, rusqlite::Error> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        Decimal::from_str(text)
            .map(Amount)
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod amount_tests {
    use std::str::FromStr;

    use super::Amount;

    #[test]
    fn repeated_sums_are_exact() {
        let ten_cents = Amount::new(10, 2);

        let total: Amount = std::iter::repeat_n(ten_cents, 10).sum();

        assert_eq!(total, Amount::new(100, 2));
    }

    #[test]
    fn debit_below_zero_is_representable() {
        let balance = Amount::new(50_00, 2) - Amount::new(80_00, 2);

        assert!(balance.is_negative());
        assert_eq!(balance, Amount::from_str("-30.00").unwrap());
    }

    #[test]
    fn zero_is_neither_positive_nor_negative() {
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
    }

    #[test]
    fn parses_plain_decimal_text() {
        let amount = Amount::from_str("1234.56").unwrap();

        assert_eq!(amount, Amount::new(1_234_56, 2));
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(Amount::from_str("12.3.4").is_err());
    }
}
