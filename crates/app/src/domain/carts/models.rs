//! Cart Models

use jiff::Timestamp;
use uuid::Uuid;

use trolley::pricing::CartTotals;

use crate::{
    auth::models::{SessionUuid, UserUuid},
    domain::products::models::ProductUuid,
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// The single owner of a cart: an authenticated user or a guest session.
///
/// Exactly one of the two — the type rules out the "both set" state the
/// storage schema also forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOwner {
    User(UserUuid),
    Session(SessionUuid),
}

impl CartOwner {
    /// The user UUID bind for owner-keyed queries.
    #[must_use]
    pub fn user_uuid(&self) -> Option<Uuid> {
        match self {
            Self::User(user) => Some(user.into_uuid()),
            Self::Session(_) => None,
        }
    }

    /// The session UUID bind for owner-keyed queries.
    #[must_use]
    pub fn session_uuid(&self) -> Option<Uuid> {
        match self {
            Self::User(_) => None,
            Self::Session(session) => Some(session.into_uuid()),
        }
    }
}

/// Cart Record
///
/// The persisted cart row. Lines and totals live on [`Cart`], the view the
/// service returns.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: CartOwner,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A shopper's cart: its lines plus the priced breakdown.
///
/// An owner with no cart row reads as an empty cart with zero totals.
#[derive(Debug, Clone)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl Cart {
    /// The empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            totals: CartTotals::ZERO,
        }
    }
}

/// CartItem Model
///
/// `unit_price` is the snapshot captured when the product was first added,
/// not the product's live price.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub sku: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
