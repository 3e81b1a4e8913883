//! Prices

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A unit price in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new price from minor units.
    pub const fn new(value: u64) -> Self {
        Price { value }
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn price_round_trips_through_u64() {
        let price = Price::from(2_50_u64);

        assert_eq!(u64::from(price), 250);
    }
}
