//! Cart totals

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{lines::PricedLine, policy::PricingPolicy};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A sum or product exceeded the representable range.
    #[error("monetary amount overflowed")]
    Overflow,
}

/// The priced breakdown of a cart, all in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Σ(unit price × quantity) over all lines.
    pub subtotal: u64,

    /// Tax on the subtotal.
    pub tax: u64,

    /// Delivery charge.
    pub shipping: u64,

    /// `subtotal + tax + shipping`.
    pub grand_total: u64,
}

impl CartTotals {
    /// The all-zero totals of an empty cart.
    pub const ZERO: CartTotals = CartTotals {
        subtotal: 0,
        tax: 0,
        shipping: 0,
        grand_total: 0,
    };
}

/// Calculates the subtotal of a list of cart lines.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any line total or the running sum
/// exceeds `u64`.
pub fn subtotal(lines: &[PricedLine]) -> Result<u64, PricingError> {
    lines.iter().try_fold(0_u64, |acc, line| {
        acc.checked_add(line.line_total()?)
            .ok_or(PricingError::Overflow)
    })
}

/// Prices a cart under the given policy.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any intermediate amount exceeds
/// `u64`.
pub fn price_cart(lines: &[PricedLine], policy: &PricingPolicy) -> Result<CartTotals, PricingError> {
    let subtotal = subtotal(lines)?;
    let tax = policy.tax.tax_on(subtotal)?;
    let shipping = policy.shipping.shipping_on(subtotal);

    let grand_total = subtotal
        .checked_add(tax)
        .and_then(|sum| sum.checked_add(shipping))
        .ok_or(PricingError::Overflow)?;

    Ok(CartTotals {
        subtotal,
        tax,
        shipping,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::prices::Price;

    use super::*;

    fn line(unit_price: u64, quantity: u32) -> PricedLine {
        PricedLine::new(Price::new(unit_price), quantity)
    }

    #[test]
    fn empty_cart_prices_to_zero() -> TestResult {
        let totals = price_cart(&[], &PricingPolicy::default())?;

        assert_eq!(totals, CartTotals::ZERO);

        Ok(())
    }

    #[test]
    fn small_cart_pays_flat_shipping() -> TestResult {
        // Two lines: 2 × R30.00 + 1 × R40.00 = R100.00 subtotal.
        let totals = price_cart(&[line(30_00, 2), line(40_00, 1)], &PricingPolicy::default())?;

        assert_eq!(totals.subtotal, 100_00);
        assert_eq!(totals.tax, 15_00);
        assert_eq!(totals.shipping, 50_00);
        assert_eq!(totals.grand_total, 165_00);

        Ok(())
    }

    #[test]
    fn large_cart_ships_free() -> TestResult {
        // 3 × R200.00 = R600.00, over the free-delivery threshold.
        let totals = price_cart(&[line(200_00, 3)], &PricingPolicy::default())?;

        assert_eq!(totals.subtotal, 600_00);
        assert_eq!(totals.tax, 90_00);
        assert_eq!(totals.shipping, 0);
        assert_eq!(totals.grand_total, 690_00);

        Ok(())
    }

    #[test]
    fn cart_at_the_threshold_still_pays_shipping() -> TestResult {
        let totals = price_cart(&[line(500_00, 1)], &PricingPolicy::default())?;

        assert_eq!(totals.shipping, 50_00);
        assert_eq!(totals.grand_total, 500_00 + 75_00 + 50_00);

        Ok(())
    }

    #[test]
    fn grand_total_is_sum_of_parts() -> TestResult {
        let totals = price_cart(&[line(12_34, 7), line(1, 13)], &PricingPolicy::default())?;

        assert_eq!(
            totals.grand_total,
            totals.subtotal + totals.tax + totals.shipping
        );

        Ok(())
    }

    #[test]
    fn tax_rounds_per_cart_not_per_line() -> TestResult {
        // Subtotal 111 minor units: 15% = 16.65, rounded once to 17.
        let totals = price_cart(&[line(37, 3)], &PricingPolicy::default())?;

        assert_eq!(totals.subtotal, 111);
        assert_eq!(totals.tax, 17);

        Ok(())
    }

    #[test]
    fn subtotal_overflow_is_an_error() {
        let lines = [line(u64::MAX, 1), line(1, 1)];

        assert!(matches!(subtotal(&lines), Err(PricingError::Overflow)));
    }
}
