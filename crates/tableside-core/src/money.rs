//! # Money Module
//!
//! Two integer money types, so no floating point ever touches a bill.
//!
//! ## Why Two Types?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES vs. AMOUNTS DUE                                                 │
//! │                                                                         │
//! │  Menu prices may carry sub-cent precision (0.125 per gram, 1.005 ...)   │
//! │  A guest pays in whole cents.                                           │
//! │                                                                         │
//! │  PreciseMoney  (1/10000 unit)   unit prices, line totals, table total   │
//! │        │                                                                │
//! │        │ round_to_cents()  ← round half to even, once per guest         │
//! │        ▼                                                                │
//! │  Money         (1/100 unit)     guest totals, cash tendered, change     │
//! │                                                                         │
//! │  Rounding per guest means Σ guest_total may differ from the table       │
//! │  total by a cent or two. That is expected and pinned by tests.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tableside_core::money::{Money, PreciseMoney};
//!
//! let coffee = PreciseMoney::from_units(15_000); // 1.5000
//! let line = coffee.multiply_quantity(2);        // 3.0000
//! assert_eq!(line.round_to_cents(), Money::from_cents(300));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps, callers check signs
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Display** prints `12.34` without a currency symbol; the symbol is
///   deployment configuration, not a property of the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use tableside_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Widens to the precise representation without loss.
    #[inline]
    pub const fn to_precise(&self) -> PreciseMoney {
        PreciseMoney(self.0 * PreciseMoney::UNITS_PER_CENT)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.major().abs(), self.minor());
        // Honour width/alignment so receipts can right-align amounts.
        f.pad(&text)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Precise Money Type
// =============================================================================

/// A monetary value in ten-thousandths of the currency unit.
///
/// Unit prices are entered with up to four decimals, so every line total
/// (`quantity × unit_price`) and every sum of line totals is exact here.
/// Only [`PreciseMoney::round_to_cents`] ever loses precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreciseMoney(i64);

impl PreciseMoney {
    /// Number of precise units in one currency unit.
    pub const SCALE: i64 = 10_000;

    /// Number of precise units in one cent.
    pub const UNITS_PER_CENT: i64 = Self::SCALE / 100;

    /// Creates a value from ten-thousandths of the currency unit.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        PreciseMoney(units)
    }

    /// Returns the raw ten-thousandths.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        PreciseMoney(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tableside_core::money::PreciseMoney;
    ///
    /// let unit = PreciseMoney::from_units(30_000); // 3.0000
    /// assert_eq!(unit.multiply_quantity(2).units(), 60_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        PreciseMoney(self.0 * qty)
    }

    /// Rounds to whole cents using round half to even (Bankers Rounding).
    ///
    /// ## Bankers Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Exactly half a cent goes to the EVEN neighbour:                   │
    /// │    0.0050 → 0.00    0.0150 → 0.02    0.1250 → 0.12                 │
    /// │    0.1350 → 0.14   -0.0150 → -0.02                                 │
    /// │  Anything else goes to the nearest cent:                           │
    /// │    0.1251 → 0.13    0.1249 → 0.12                                  │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub const fn round_to_cents(&self) -> Money {
        // Floor division keeps the remainder in 0..UNITS_PER_CENT for
        // negative values too, so the tie check is sign-independent.
        let cents = self.0.div_euclid(Self::UNITS_PER_CENT);
        let remainder = self.0.rem_euclid(Self::UNITS_PER_CENT);
        let half = Self::UNITS_PER_CENT / 2;

        let rounded = if remainder > half {
            cents + 1
        } else if remainder < half {
            cents
        } else if cents % 2 == 0 {
            cents
        } else {
            cents + 1
        };
        Money::from_cents(rounded)
    }
}

/// Full-precision display, e.g. `1.2345`.
impl fmt::Display for PreciseMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let text = format!("{}{}.{:04}", sign, abs / Self::SCALE, abs % Self::SCALE);
        f.pad(&text)
    }
}

impl Default for PreciseMoney {
    fn default() -> Self {
        PreciseMoney::zero()
    }
}

impl From<Money> for PreciseMoney {
    fn from(money: Money) -> Self {
        money.to_precise()
    }
}

impl Add for PreciseMoney {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        PreciseMoney(self.0 + other.0)
    }
}

impl AddAssign for PreciseMoney {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for PreciseMoney {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(PreciseMoney::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
