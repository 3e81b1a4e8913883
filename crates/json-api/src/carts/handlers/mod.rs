//! Cart Handlers

pub(crate) mod clear;
pub(crate) mod get;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley::pricing::CartTotals;
use trolley_app::domain::carts::models::{Cart, CartItem};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The lines in the cart
    pub items: Vec<CartItemResponse>,

    /// The priced breakdown of the cart
    pub totals: CartTotalsResponse,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            totals: cart.totals.into(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The product in this line
    pub product_uuid: Uuid,

    /// Product display name
    pub name: String,

    /// Product SKU
    pub sku: String,

    /// Captured unit price in minor units
    pub unit_price: u64,

    /// Quantity in the cart
    pub quantity: u32,

    /// When the line was first added
    pub created_at: String,

    /// When the line last changed
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into_uuid(),
            name: item.name,
            sku: item.sku,
            unit_price: item.unit_price,
            quantity: item.quantity,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Cart Totals Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartTotalsResponse {
    /// Σ(unit price × quantity) in minor units
    pub subtotal: u64,

    /// Tax on the subtotal
    pub tax: u64,

    /// Delivery charge
    pub shipping: u64,

    /// subtotal + tax + shipping
    pub grand_total: u64,
}

impl From<CartTotals> for CartTotalsResponse {
    fn from(totals: CartTotals) -> Self {
        Self {
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            grand_total: totals.grand_total,
        }
    }
}

