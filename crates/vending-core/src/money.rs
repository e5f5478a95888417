//! # Money Module
//!
//! Provides the `Money` type for handling rupiah amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RUPIAH HAS NO MINOR UNIT IN PRACTICE                                   │
//! │                                                                         │
//! │  Prices, notes and change are always whole rupiah:                      │
//! │    price 8000, inserted 10000, change 2000                              │
//! │                                                                         │
//! │  OUR SOLUTION: i64 rupiah                                               │
//! │    No floats anywhere, change is exact subtraction                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vending_core::money::Money;
//!
//! let price = Money::from_rupiah(8000);
//! let inserted = Money::from_rupiah(5000) + Money::from_rupiah(5000);
//!
//! assert_eq!(inserted - price, Money::from_rupiah(2000));
//! assert_eq!(price.to_string(), "Rp8.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole rupiah.
///
/// Serialized as a bare JSON number, which is what the data store holds for
/// `price`, `moneyInserted` and `change`.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ────────────────┐                                        │
/// │                                ▼                                        │
/// │  Denomination ──► PurchaseSession.money_inserted ──► change             │
/// │                                │                        │               │
/// │                                ▼                        ▼               │
/// │                     Transaction.moneyInserted   Transaction.change      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let price = Money::from_rupiah(8000);
    /// assert_eq!(price.rupiah(), 8000);
    /// ```
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Returns the value in rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns how much is still missing to reach `target`, or `None` when
    /// this amount already covers it.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let inserted = Money::from_rupiah(5000);
    /// let price = Money::from_rupiah(8000);
    ///
    /// assert_eq!(inserted.shortfall_to(price), Some(Money::from_rupiah(3000)));
    /// assert_eq!(price.shortfall_to(inserted), None);
    /// ```
    pub fn shortfall_to(&self, target: Money) -> Option<Money> {
        if self.0 < target.0 {
            Some(Money(target.0 - self.0))
        } else {
            None
        }
    }

    /// Returns the digits of the absolute value grouped in threes with `.`,
    /// the Indonesian convention (`1234567` → `1.234.567`).
    pub fn grouped_digits(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }

        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `Rp8.000`; negative amounts as `-Rp3.000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp{}", sign, self.grouped_digits())
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
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
