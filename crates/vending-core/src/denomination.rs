//! # Denominations
//!
//! The fixed set of notes the machine accepts. One insertion adds exactly
//! one note; any other amount is rejected before it reaches the session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PurchaseError;
use crate::money::Money;

/// A banknote accepted by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Denomination {
    Rp2000,
    Rp5000,
    Rp10000,
    Rp20000,
    Rp50000,
}

impl Denomination {
    /// Every accepted note, smallest first. This is the order the pay screen
    /// lists them in.
    pub const ALL: [Denomination; 5] = [
        Denomination::Rp2000,
        Denomination::Rp5000,
        Denomination::Rp10000,
        Denomination::Rp20000,
        Denomination::Rp50000,
    ];

    /// Face value of the note.
    pub const fn value(&self) -> Money {
        Money::from_rupiah(self.rupiah())
    }

    pub const fn rupiah(&self) -> i64 {
        match self {
            Denomination::Rp2000 => 2000,
            Denomination::Rp5000 => 5000,
            Denomination::Rp10000 => 10000,
            Denomination::Rp20000 => 20000,
            Denomination::Rp50000 => 50000,
        }
    }
}

impl TryFrom<i64> for Denomination {
    type Error = PurchaseError;

    fn try_from(amount: i64) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.rupiah() == amount)
            .ok_or(PurchaseError::InvalidDenomination(amount))
    }
}

impl From<Denomination> for i64 {
    fn from(d: Denomination) -> Self {
        d.rupiah()
    }
}

impl std::str::FromStr for Denomination {
    type Err = PurchaseError;

    /// Accepts `5000`, `5.000` and `Rp5.000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .trim()
            .trim_start_matches("Rp")
            .chars()
            .filter(|c| *c != '.')
            .collect();

        let amount = cleaned
            .parse::<i64>()
            .map_err(|_| PurchaseError::InvalidDenomination(0))?;

        Denomination::try_from(amount)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
