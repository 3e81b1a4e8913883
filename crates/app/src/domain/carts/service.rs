//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use trolley::{lines::PricedLine, policy::PricingPolicy, prices::Price, pricing::price_cart};

use crate::{
    auth::models::{SessionUuid, UserUuid},
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItem, CartOwner, CartRecord, CartUuid, NewCartItem},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::models::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    policy: PricingPolicy,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_policy(db, PricingPolicy::default())
    }

    #[must_use]
    pub fn with_policy(db: Db, policy: PricingPolicy) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            policy,
        }
    }

    /// Resolve the owner's cart under a row lock, creating it when absent.
    ///
    /// Losing the creation race to a concurrent request is fine: the insert
    /// yields nothing and the winner's row is read back under the lock.
    async fn find_or_create_cart(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        owner: CartOwner,
    ) -> Result<CartRecord, CartsServiceError> {
        if let Some(cart) = self.carts_repository.find_cart_for_update(tx, owner).await? {
            return Ok(cart);
        }

        if let Some(created) = self
            .carts_repository
            .create_cart(tx, CartUuid::new(), owner)
            .await?
        {
            return Ok(created);
        }

        self.carts_repository
            .find_cart_for_update(tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    fn price_items(&self, items: &[CartItem]) -> Result<Cart, CartsServiceError> {
        let lines: Vec<PricedLine> = items
            .iter()
            .map(|item| PricedLine::new(Price::new(item.unit_price), item.quantity))
            .collect();

        let totals = price_cart(&lines, &self.policy)?;

        Ok(Cart {
            items: items.to_vec(),
            totals,
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, owner: CartOwner) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.find_cart(&mut tx, owner).await? else {
            return Ok(Cart::empty());
        };

        let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        self.price_items(&items)
    }

    async fn add_item(
        &self,
        owner: CartOwner,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.find_or_create_cart(&mut tx, owner).await?;

        let upserted = self
            .items_repository
            .upsert_cart_item(&mut tx, cart.uuid, item.product_uuid, item.quantity)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(upserted)
    }

    async fn set_item_quantity(
        &self,
        owner: CartOwner,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        if quantity == 0 {
            return self.remove_item(owner, product).await;
        }

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart_for_update(&mut tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .set_cart_item_quantity(&mut tx, cart.uuid, product, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn remove_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart_for_update(&mut tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, owner: CartOwner) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self
            .carts_repository
            .find_cart_for_update(&mut tx, owner)
            .await?
        else {
            // Nothing to clear.
            return Ok(());
        };

        self.carts_repository.delete_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn merge_session_cart(
        &self,
        session: SessionUuid,
        user: UserUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        // Guest cart first: absent or already merged means there is nothing
        // to do, which is what makes repeating a merge harmless.
        let Some(guest_cart) = self
            .carts_repository
            .find_cart_for_update(&mut tx, CartOwner::Session(session))
            .await?
        else {
            return Ok(());
        };

        let user_cart = self
            .find_or_create_cart(&mut tx, CartOwner::User(user))
            .await?;

        let guest_items = self
            .items_repository
            .get_cart_items(&mut tx, guest_cart.uuid)
            .await?;

        for item in &guest_items {
            // Quantities sum on conflict; the user cart's captured price wins.
            self.items_repository
                .merge_cart_item(
                    &mut tx,
                    user_cart.uuid,
                    item.product_uuid,
                    item.unit_price,
                    item.quantity,
                )
                .await?;
        }

        self.carts_repository
            .delete_cart(&mut tx, guest_cart.uuid)
            .await?;

        tx.commit().await?;

        debug!(
            lines = guest_items.len(),
            %session,
            %user,
            "merged guest cart into user cart"
        );

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the owner's cart with priced totals.
    ///
    /// An owner with no cart row gets an empty cart with zero totals.
    async fn get_cart(&self, owner: CartOwner) -> Result<Cart, CartsServiceError>;

    /// Add a product to the owner's cart, creating the cart lazily.
    ///
    /// Adding a product already in the cart sums the quantities into the one
    /// existing line; its captured price is not refreshed.
    async fn add_item(
        &self,
        owner: CartOwner,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError>;

    /// Replace a line's quantity; zero removes the line.
    async fn set_item_quantity(
        &self,
        owner: CartOwner,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError>;

    /// Remove a line from the owner's cart.
    async fn remove_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Delete the owner's cart and all its lines.
    async fn clear_cart(&self, owner: CartOwner) -> Result<(), CartsServiceError>;

    /// Fold a guest session's cart into a user's cart.
    ///
    /// Runs in one transaction: guest lines are upserted into the user cart
    /// (created if absent) with quantities summed, then the guest cart is
    /// hard-deleted. A missing guest cart is a no-op, so re-running a merge
    /// changes nothing.
    async fn merge_session_cart(
        &self,
        session: SessionUuid,
        user: UserUuid,
    ) -> Result<(), CartsServiceError>;
}
