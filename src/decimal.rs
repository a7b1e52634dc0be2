use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// number of decimal places carried by every amount
pub const CENT_SCALE: u32 = 2;

/// quantize a decimal to cents, rounding half away from zero
fn quantize(d: Decimal) -> Decimal {
    let mut rounded = d.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENT_SCALE);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Money type with cent precision.
///
/// Every arithmetic result is re-quantized to cents, so a chain of additions and
/// subtractions rounds after each step rather than once at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::from_parts(0, 0, 0, false, CENT_SCALE));
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, CENT_SCALE));

    /// quantize an arbitrary decimal to cents
    pub fn from_decimal(d: Decimal) -> Self {
        Money(quantize(d))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(quantize(Decimal::from_str(s.trim())?)))
    }

    /// create from whole dollars
    pub fn from_major(amount: i64) -> Self {
        Money(quantize(Decimal::from(amount)))
    }

    /// create from cents
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CENT_SCALE))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// amount expressed in whole cents; `None` when it does not fit an `i64`
    pub fn to_cents(&self) -> Option<i64> {
        // always at scale 2, so the mantissa is the cent count
        i64::try_from(self.0.mantissa()).ok()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(|d| Money(quantize(d)))
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(|d| Money(quantize(d)))
    }

    /// sum that reports overflow instead of panicking
    pub fn checked_sum<I: IntoIterator<Item = Money>>(iter: I) -> Option<Self> {
        iter.into_iter().try_fold(Money::ZERO, Money::checked_add)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly above zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly below zero; a signed zero is not negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
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

impl From<Money> for Decimal {
    fn from(m: Money) -> Self {
        m.0
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

/// panics past `Decimal::MAX`; see [`Money::checked_add`]
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(quantize(self.0 + other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = quantize(self.0 + other.0);
    }
}

/// panics past `Decimal::MIN`; see [`Money::checked_sub`]
impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(quantize(self.0 - other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = quantize(self.0 - other.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(quantize(-self.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}
