//! Receipt

use std::num::TryFromIntError;

use rusty_money::{Money, iso};
use smallvec::SmallVec;
use tabled::{Table, Tabled, settings::Style};
use thiserror::Error;

use crate::pricing::CartTotals;

/// Errors raised while rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// An amount was too large to format as money.
    #[error("amount too large to format")]
    AmountTooLarge(#[from] TryFromIntError),
}

/// One named line on a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    /// Product name as displayed to the shopper.
    pub name: String,

    /// Quantity purchased.
    pub quantity: u32,

    /// Captured unit price in minor units.
    pub unit_price: u64,

    /// `unit_price × quantity` in minor units.
    pub line_total: u64,
}

/// Final receipt for a priced cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: SmallVec<[ReceiptLine; 8]>,
    totals: CartTotals,
}

#[derive(Tabled)]
struct ReceiptRow {
    #[tabled(rename = "Item")]
    item: String,

    #[tabled(rename = "Qty")]
    quantity: u32,

    #[tabled(rename = "Unit")]
    unit_price: String,

    #[tabled(rename = "Total")]
    line_total: String,
}

impl Receipt {
    /// Creates a receipt from named lines and their computed totals.
    pub fn new(lines: impl IntoIterator<Item = ReceiptLine>, totals: CartTotals) -> Self {
        Self {
            lines: lines.into_iter().collect(),
            totals,
        }
    }

    /// The priced breakdown this receipt presents.
    pub const fn totals(&self) -> CartTotals {
        self.totals
    }

    /// The number of lines on the receipt.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the receipt has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the receipt as a text table with a totals block.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if an amount cannot be formatted.
    pub fn render(&self) -> Result<String, ReceiptError> {
        let rows = self
            .lines
            .iter()
            .map(|line| {
                Ok(ReceiptRow {
                    item: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: format_zar(line.unit_price)?,
                    line_total: format_zar(line.line_total)?,
                })
            })
            .collect::<Result<Vec<_>, ReceiptError>>()?;

        let mut table = Table::new(rows);
        table.with(Style::sharp());

        let mut out = table.to_string();

        out.push('\n');
        out.push_str(&format!("Subtotal: {}\n", format_zar(self.totals.subtotal)?));
        out.push_str(&format!("VAT:      {}\n", format_zar(self.totals.tax)?));
        out.push_str(&format!("Delivery: {}\n", format_zar(self.totals.shipping)?));
        out.push_str(&format!(
            "Total:    {}\n",
            format_zar(self.totals.grand_total)?
        ));

        Ok(out)
    }
}

/// Formats a minor-unit amount as South African Rand.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the amount exceeds `i64`.
pub fn format_zar(amount: u64) -> Result<String, ReceiptError> {
    let minor = i64::try_from(amount)?;

    Ok(Money::from_minor(minor, iso::ZAR).to_string())
}
