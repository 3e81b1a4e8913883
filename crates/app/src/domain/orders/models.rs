//! Order Models

use jiff::Timestamp;

use trolley::pricing::CartTotals;

use crate::{
    domain::{carts::models::CartOwner, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// A placed order: the priced, stock-reserved snapshot of a cart at
/// checkout time. Payment capture happens downstream against this record.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub owner: CartOwner,
    pub lines: Vec<OrderLine>,
    pub totals: CartTotals,
    pub placed_at: Timestamp,
}

/// One line of a placed order. Name, SKU, and price are copied at checkout
/// so later catalog edits cannot rewrite order history.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub sku: String,
    pub unit_price: u64,
    pub quantity: u32,
}
