use std::fmt;
use std::ops::*;

/// Lowest price any asset may reach.
pub const MIN_PRICE: f64 = 0.01;
/// Highest price any asset may reach.
pub const MAX_PRICE: f64 = 100.0;

/// Price of one unit of an asset, always inside [MIN_PRICE, MAX_PRICE].
#[derive(Debug, PartialEq, PartialOrd, Copy, Clone)]
pub struct Price(f64);

/// An amount of cash, or the worth of a portfolio.
#[derive(Debug, PartialEq, PartialOrd, Copy, Clone, Default)]
pub struct Value(pub f64);

/// Number of units held of one asset.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Default)]
pub struct Quantity(pub u64);

impl Price {
    pub const ONE: Self = Self(1.0);

    /// Builds a price, pulling out-of-range values back into bounds.
    #[inline(always)]
    pub fn new(raw: f64) -> Self {
        Self(Self::clamp(raw))
    }

    #[inline(always)]
    pub fn clamp(raw: f64) -> f64 {
        if raw < MIN_PRICE {
            MIN_PRICE
        } else if raw > MAX_PRICE {
            MAX_PRICE
        } else {
            raw
        }
    }

    /// Applies a multiplicative move and re-clamps the result.
    #[inline(always)]
    pub fn scale(self, multiplier: f64) -> Self {
        Self::new(self.0 * multiplier)
    }

    #[inline(always)]
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Value {
    pub const ZERO: Self = Self(0.0);

    #[inline(always)]
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Quantity {
    pub const ZERO: Self = Self(0);

    #[inline(always)]
    pub fn get(&self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub fn increment(&mut self) {
        self.0 += 1;
    }

    /// Removes one unit. Returns false and leaves the quantity untouched when nothing is held.
    #[inline(always)]
    pub fn decrement(&mut self) -> bool {
        match self.0.checked_sub(1) {
            Some(rest) => {
                self.0 = rest;
                true
            }
            None => false,
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ONE
    }
}

impl Mul<Quantity> for Price {
    type Output = Value;
    #[inline(always)]
    fn mul(self, rhs: Quantity) -> Value {
        Value(self.0 * rhs.0 as f64)
    }
}

impl Mul<f64> for Value {
    type Output = Value;
    #[inline(always)]
    fn mul(self, rhs: f64) -> Value {
        Value(self.0 * rhs)
    }
}

impl Add<Value> for Value {
    type Output = Value;
    #[inline(always)]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl Sub<Value> for Value {
    type Output = Value;
    #[inline(always)]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl AddAssign<Price> for Value {
    #[inline(always)]
    fn add_assign(&mut self, other: Price) {
        *self = Self(self.0 + other.0);
    }
}

impl SubAssign<Price> for Value {
    #[inline(always)]
    fn sub_assign(&mut self, other: Price) {
        *self = Self(self.0 - other.0);
    }
}

impl PartialEq<Price> for Value {
    fn eq(&self, other: &Price) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd<Price> for Value {
    fn partial_cmp(&self, other: &Price) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl std::iter::Sum for Value {
    fn sum<I: Iterator<Item = Value>>(iter: I) -> Value {
        iter.fold(Value::ZERO, |acc, v| acc + v)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

#[test]
fn test_price_clamp() {
    assert_eq!(Price::clamp(0.001), MIN_PRICE);
    assert_eq!(Price::clamp(-5.0), MIN_PRICE);
    assert_eq!(Price::clamp(250.0), MAX_PRICE);
    assert_eq!(Price::clamp(0.01), 0.01);
    assert_eq!(Price::clamp(100.0), 100.0);
    assert_eq!(Price::clamp(42.5), 42.5);
}

#[test]
fn test_price_scale_stays_in_bounds() {
    let mut price = Price::ONE;
    for _ in 0..100 {
        price = price.scale(0.5);
    }
    assert_eq!(price.get(), MIN_PRICE);
    for _ in 0..100 {
        price = price.scale(1.49);
    }
    assert_eq!(price.get(), MAX_PRICE);
}

#[test]
fn test_quantity_never_goes_negative() {
    let mut held = Quantity::ZERO;
    assert!(!held.decrement());
    assert_eq!(held, Quantity::ZERO);
    held.increment();
    held.increment();
    assert!(held.decrement());
    assert_eq!(held, Quantity(1));
}

#[test]
fn test_worth_arithmetic() {
    let worth = Price::new(2.5) * Quantity(4) + Value(10.0);
    assert_eq!(worth, Value(20.0));
    let mut cash = Value(3.0);
    cash -= Price::new(1.0);
    cash += Price::new(0.5);
    assert_eq!(cash, Value(2.5));
}
