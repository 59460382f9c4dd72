//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store currency.
///
/// All amounts come from the static price table; there is no dynamic pricing
/// or currency conversion. A zero price means "not yet fully configured",
/// never "free" - the wizard surfaces it, the review step gates on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// ISO 4217 code of the store currency.
    pub const CURRENCY: &'static str = "LKR";

    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// A price of `amount` whole currency units.
    #[must_use]
    pub fn from_major(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is zero (i.e. unresolved in the price table).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply a unit price by a line-item count.
    #[must_use]
    pub fn times(&self, count: u32) -> Self {
        Self(self.0 * Decimal::from(count))
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Two decimal places, e.g. "150.00".
        write!(f, "{:.2}", self.0)
    }
}
