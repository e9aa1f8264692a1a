use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

/// Money type with 2 decimal places precision for currency amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(2))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(2)))
    }

    /// create from integer amount (whole currency units)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64) -> Self {
        Money((Decimal::from(amount) / Decimal::from(100)).round_dp(2))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative()
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// calculate percentage (e.g., 5% of 100)
    pub fn percentage(&self, rate: Decimal) -> Self {
        Money((self.0 * rate / Decimal::from(100)).round_dp(2))
    }

    /// paid ratio against a required amount, as a rounded whole percentage.
    /// zero required amount reports 0 rather than dividing.
    pub fn percent_of(&self, required: Money) -> u32 {
        if required.is_zero() {
            return 0;
        }
        let pct = (self.0 / required.0 * Decimal::from(100))
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        pct.to_u32().unwrap_or(0)
    }

    /// display with thousands grouping, e.g. "1,500,000"
    pub fn grouped(&self) -> String {
        let s = self.0.round_dp(0).abs().to_string();
        let mut out = String::with_capacity(s.len() + s.len() / 3);
        for (i, c) in s.chars().enumerate() {
            if i > 0 && (s.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        if self.is_negative() {
            out.insert(0, '-');
        }
        out
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(2))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(2);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(2))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(2);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(2))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(2))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// rate type for discount percentages and ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_decimal(dec!(100.125));
        assert_eq!(m.to_string(), "100.13"); // rounded to 2 places
    }

    #[test]
    fn test_minor_units() {
        let m = Money::from_minor(150_050);
        assert_eq!(m, Money::from_decimal(dec!(1500.50)));
    }

    #[test]
    fn test_percentage_helper() {
        let fee = Money::from_major(500_000);
        assert_eq!(fee.percentage(dec!(20)), Money::from_major(100_000));
        assert_eq!(fee.percentage(dec!(2.5)), Money::from_major(12_500));
    }

    #[test]
    fn test_rate_constructors_agree() {
        assert_eq!(Rate::from_percentage(20), Rate::from_decimal(dec!(0.2)));
        assert_eq!(Rate::from_percentage(20).as_percentage(), dec!(20));
    }

    #[test]
    fn test_percent_of() {
        let paid = Money::from_major(200_000);
        let required = Money::from_major(500_000);
        assert_eq!(paid.percent_of(required), 40);

        // no division by zero on an unconfigured fee
        assert_eq!(paid.percent_of(Money::ZERO), 0);

        // overpayment reports the true ratio
        let over = Money::from_major(600_000);
        assert_eq!(over.percent_of(required), 120);
    }

    #[test]
    fn test_percent_of_rounds() {
        let paid = Money::from_major(1);
        let required = Money::from_major(3);
        assert_eq!(paid.percent_of(required), 33);
    }

    #[test]
    fn test_grouped_display() {
        assert_eq!(Money::from_major(500_000).grouped(), "500,000");
        assert_eq!(Money::from_major(1_250_000).grouped(), "1,250,000");
        assert_eq!(Money::from_major(999).grouped(), "999");
        assert_eq!(Money::from_major(-42_000).grouped(), "-42,000");
    }

    #[test]
    fn test_clamping_helpers() {
        let deficit = Money::from_major(300) - Money::from_major(500);
        assert!(deficit.is_negative());
        assert_eq!(deficit.max(Money::ZERO), Money::ZERO);
    }
}
