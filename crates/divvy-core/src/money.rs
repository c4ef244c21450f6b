//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    Amounts, exact shares and percentages are all exact decimals.       │
//! │    Rounding happens in exactly one place: round_currency().            │
//! │                                                                         │
//! │  THE SPLIT PROBLEM (kept on purpose)                                    │
//! │    10.00 split 3 ways = 3.33 each (×3 = 9.99)  → 0.01 drift            │
//! │    The remainder is NOT redistributed. Each share is rounded on its    │
//! │    own, so a split can drift by up to n × 0.005 from the total.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use divvy_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let total = Money::new(Decimal::new(1000, 2)); // 10.00
//! let share = total.split_evenly(3);
//! assert_eq!(share.to_string(), "3.33");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of decimal places in the currency's minor unit.
pub const CURRENCY_SCALE: u32 = 2;

/// Worst-case error introduced by rounding a single share (half a minor unit).
///
/// An expense split among `n` people can drift from its total by at most
/// `n × ROUNDING_DRIFT_PER_SHARE`.
pub const ROUNDING_DRIFT_PER_SHARE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Largest accepted expense amount or EXACT share (one trillion).
///
/// Keeps every owed amount, and any realistic sum of them, far inside
/// `Decimal`'s 96-bit range so ledger arithmetic cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest accepted PERCENTAGE share value (one hundred times the amount).
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

// =============================================================================
// Money Type
// =============================================================================

/// A signed monetary value.
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 arithmetic, arbitrary scale up to 28 digits
/// - **Signed**: balances are negative for people who owe money
/// - **Transparent serde**: serialized as a decimal string (`"30.00"`)
///
/// ## Where Money is Used
/// ```text
/// Expense.amount ──► compute_splits ──► Split.amount_owed
///       │                                      │
///       ▼                                      ▼
///   payer +amount                      participant -amount_owed
///       └──────────► compute_balances ◄────────┘
///                          │
///                          ▼
///               compute_settlements ──► Settlement.amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount as-is (no rounding).
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds to the currency's minor unit using round-half-up.
    ///
    /// ## Rounding Mode
    /// Half-up means a midpoint rounds away from zero:
    /// `0.125 → 0.13`, `-0.125 → -0.13`. The result always carries
    /// exactly two decimal places.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::new(Decimal::new(33335, 3)); // 33.335
    /// assert_eq!(m.round_currency().to_string(), "33.34");
    /// ```
    pub fn round_currency(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(CURRENCY_SCALE);
        Money(rounded)
    }

    /// One participant's share when splitting this amount `parts` ways.
    ///
    /// `round(amount / parts, 2, HALF_UP)`. The remainder is not
    /// redistributed, so `share × parts` may differ from the amount.
    ///
    /// ## Panics
    /// Never for `parts > 0`; callers guarantee a non-empty participant list.
    pub fn split_evenly(&self, parts: usize) -> Money {
        debug_assert!(parts > 0, "split_evenly requires at least one part");
        Money(self.0 / Decimal::from(parts)).round_currency()
    }

    /// Applies a percentage: `round(amount × pct / 100, 2, HALF_UP)`.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let total = Money::new(Decimal::new(9999, 2)); // 99.99
    /// let part = total.percentage(Decimal::new(3333, 2)); // 33.33%
    /// assert_eq!(part.to_string(), "33.33");
    /// ```
    pub fn percentage(&self, pct: Decimal) -> Money {
        Money(self.0 * pct / Decimal::ONE_HUNDRED).round_currency()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(Money::new(dec!(0.125)).round_currency().amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(0.124)).round_currency().amount(), dec!(0.12));
        assert_eq!(Money::new(dec!(-0.125)).round_currency().amount(), dec!(-0.13));
        assert_eq!(Money::new(dec!(30)).round_currency().to_string(), "30.00");
    }

    #[test]
    fn test_split_evenly() {
        assert_eq!(Money::new(dec!(90.00)).split_evenly(3).amount(), dec!(30.00));
        assert_eq!(Money::new(dec!(100.00)).split_evenly(3).amount(), dec!(33.33));
        assert_eq!(Money::new(dec!(0.05)).split_evenly(2).amount(), dec!(0.03));
    }

    /// $10.00 / 3 × 3 loses a cent; the loss is documented, not corrected.
    #[test]
    fn test_split_drift_documented() {
        let total = Money::new(dec!(10.00));
        let share = total.split_evenly(3);
        let reconstructed: Money = [share, share, share].iter().sum();

        assert_eq!(reconstructed.amount(), dec!(9.99));
        assert_eq!((total - reconstructed).amount(), dec!(0.01));
        assert!((total - reconstructed).abs().amount() <= ROUNDING_DRIFT_PER_SHARE * dec!(3));
    }

    #[test]
    fn test_percentage() {
        let total = Money::new(dec!(200.00));
        assert_eq!(total.percentage(dec!(25)).amount(), dec!(50.00));
        assert_eq!(Money::new(dec!(10.00)).percentage(dec!(33.335)).amount(), dec!(3.33));
        assert_eq!(Money::new(dec!(0.50)).percentage(dec!(25)).amount(), dec!(0.13));
    }

    #[test]
    fn test_arithmetic_and_checks() {
        let a = Money::new(dec!(10.50));
        let b = Money::new(dec!(4.25));

        assert_eq!((a + b).amount(), dec!(14.75));
        assert_eq!((b - a).amount(), dec!(-6.25));
        assert_eq!((-a).amount(), dec!(-10.50));
        assert_eq!(a.min(b), b);

        assert!(Money::zero().is_zero());
        assert!(a.is_positive());
        assert!((b - a).is_negative());
        assert_eq!((b - a).abs().amount(), dec!(6.25));
    }

    #[test]
    fn test_serde_is_transparent() {
        let m = Money::new(dec!(30.00));
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"30.00\"");

        let from_number: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(from_number.amount(), dec!(12.5));
    }

    #[test]
    fn test_drift_constant() {
        assert_eq!(ROUNDING_DRIFT_PER_SHARE, dec!(0.005));
    }

    #[test]
    fn test_bounds_leave_headroom() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));
        assert_eq!(MAX_PERCENTAGE, dec!(10000));

        // Worst single share, then a million of them summed.
        let worst = Money::new(MAX_AMOUNT).percentage(MAX_PERCENTAGE);
        assert_eq!(worst.amount(), dec!(100000000000000));
        assert!(worst.amount().checked_mul(dec!(1000000)).is_some());
    }
}
