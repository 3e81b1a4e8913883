//! Cart lines

use crate::{prices::Price, pricing::PricingError};

/// One priced line of a cart: a captured unit price and a quantity.
///
/// The unit price is the snapshot taken when the product was added to the
/// cart, not the product's live price.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PricedLine {
    unit_price: Price,
    quantity: u32,
}

impl PricedLine {
    /// Creates a new line with the given captured unit price and quantity.
    pub const fn new(unit_price: Price, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }

    /// Returns the captured unit price.
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Returns the quantity.
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The line total: `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product exceeds `u64`.
    pub fn line_total(&self) -> Result<u64, PricingError> {
        (*self.unit_price)
            .checked_mul(u64::from(self.quantity))
            .ok_or(PricingError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() -> TestResult {
        let line = PricedLine::new(Price::new(250), 3);

        assert_eq!(line.line_total()?, 750);

        Ok(())
    }

    #[test]
    fn zero_quantity_line_totals_zero() -> TestResult {
        let line = PricedLine::new(Price::new(9_99), 0);

        assert_eq!(line.line_total()?, 0);

        Ok(())
    }

    #[test]
    fn line_total_overflow_is_an_error() {
        let line = PricedLine::new(Price::new(u64::MAX), 2);

        assert!(matches!(line.line_total(), Err(PricingError::Overflow)));
    }
}
