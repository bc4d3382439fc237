//! Integer venue units.
//!
//! The venue quotes prices in minor currency units (cents) and volumes in
//! whole lots. Both are carried as unsigned integers on the wire; arithmetic
//! that can go negative or fractional (spreads, mid prices, mu) is done in
//! `rust_decimal` via [`Price::to_decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Price in minor currency units.
///
/// A zero price means "no level" in a book snapshot.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(pub u64);

impl Price {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Exact decimal view, for spread and mid-price arithmetic.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Round down to a multiple of `tick_size`.
    #[inline]
    pub fn round_down_to_tick(&self, tick_size: u64) -> Self {
        if tick_size == 0 {
            return *self;
        }
        Self(self.0 / tick_size * tick_size)
    }

    /// Add `ticks` ticks of `tick_size`.
    #[inline]
    pub fn plus_ticks(&self, ticks: u64, tick_size: u64) -> Self {
        Self(self.0.saturating_add(ticks.saturating_mul(tick_size)))
    }

    /// Subtract `ticks` ticks of `tick_size`, saturating at zero.
    #[inline]
    pub fn minus_ticks(&self, ticks: u64, tick_size: u64) -> Self {
        Self(self.0.saturating_sub(ticks.saturating_mul(tick_size)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<u64> for Price {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Volume in lots.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Volume(pub u64);

impl Volume {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Signed lot count, for position arithmetic.
    #[inline]
    pub fn as_signed(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }

    /// Number of whole lots of `lot_size` contained in this volume.
    #[inline]
    pub fn whole_lots(&self, lot_size: u64) -> u64 {
        if lot_size == 0 {
            return 0;
        }
        self.0 / lot_size
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Volume {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Saturates at `u64::MAX`.
impl Add for Volume {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}
