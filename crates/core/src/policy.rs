//! Pricing policies
//!
//! Tax and shipping rules for the storefront. The defaults encode the
//! production rules: 15% VAT, a flat R50.00 delivery fee waived for empty
//! carts and for orders strictly over R500.00.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::pricing::PricingError;

/// Default VAT rate: 15%.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Default flat delivery fee in minor units: R50.00.
pub const DEFAULT_SHIPPING_FEE: u64 = 50_00;

/// Subtotal above which delivery is free, in minor units: R500.00.
pub const DEFAULT_FREE_SHIPPING_OVER: u64 = 500_00;

/// Percentage tax applied to the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    rate: Decimal,
}

impl TaxPolicy {
    /// Creates a tax policy with the given fractional rate (`0.15` = 15%).
    pub const fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    /// Returns the fractional tax rate.
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Tax owed on a subtotal, rounded half-up to the nearest minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product exceeds what a
    /// `Decimal` or `u64` can represent.
    pub fn tax_on(&self, subtotal: u64) -> Result<u64, PricingError> {
        Decimal::from(subtotal)
            .checked_mul(self.rate)
            .map(|tax| tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|tax| tax.to_u64())
            .ok_or(PricingError::Overflow)
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}

/// Flat-fee delivery with a free-above threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    flat_fee: u64,
    free_over: u64,
}

impl ShippingPolicy {
    /// Creates a shipping policy with the given flat fee and free threshold,
    /// both in minor units.
    pub const fn new(flat_fee: u64, free_over: u64) -> Self {
        Self {
            flat_fee,
            free_over,
        }
    }

    /// Delivery charged on a subtotal.
    ///
    /// Free for an empty cart (subtotal 0) and for subtotals strictly above
    /// the threshold; the flat fee otherwise.
    pub const fn shipping_on(&self, subtotal: u64) -> u64 {
        if subtotal == 0 || subtotal > self.free_over {
            0
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SHIPPING_FEE, DEFAULT_FREE_SHIPPING_OVER)
    }
}

/// The combined pricing rules applied at cart and checkout time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Tax rule.
    pub tax: TaxPolicy,

    /// Delivery rule.
    pub shipping: ShippingPolicy,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_tax_rate_is_fifteen_percent() {
        assert_eq!(TaxPolicy::default().rate(), Decimal::new(15, 2));
    }

    #[test]
    fn tax_on_rounds_half_up() -> TestResult {
        // 15% of 110 minor units is 16.5; half-up gives 17.
        assert_eq!(TaxPolicy::default().tax_on(110)?, 17);

        // 15% of 90 is 13.5; half-up gives 14.
        assert_eq!(TaxPolicy::default().tax_on(90)?, 14);

        // 15% of 100 is exactly 15.
        assert_eq!(TaxPolicy::default().tax_on(100)?, 15);

        Ok(())
    }

    #[test]
    fn tax_on_zero_is_zero() -> TestResult {
        assert_eq!(TaxPolicy::default().tax_on(0)?, 0);

        Ok(())
    }

    #[test]
    fn shipping_is_free_for_empty_cart() {
        assert_eq!(ShippingPolicy::default().shipping_on(0), 0);
    }

    #[test]
    fn shipping_is_flat_fee_under_threshold() {
        assert_eq!(ShippingPolicy::default().shipping_on(499_99), 50_00);
    }

    #[test]
    fn shipping_at_exactly_the_threshold_is_charged() {
        // The threshold is strict: R500.00 exactly still pays delivery.
        assert_eq!(ShippingPolicy::default().shipping_on(500_00), 50_00);
    }

    #[test]
    fn shipping_is_free_above_threshold() {
        assert_eq!(ShippingPolicy::default().shipping_on(500_01), 0);
    }
}
