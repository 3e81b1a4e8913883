//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use trolley::{lines::PricedLine, policy::PricingPolicy, prices::Price, pricing::price_cart};

use crate::{
    database::Db,
    domain::{
        carts::{
            models::CartOwner,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderLine, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    policy: PricingPolicy,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_policy(db, PricingPolicy::default())
    }

    #[must_use]
    pub fn with_policy(db: Db, policy: PricingPolicy) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            policy,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, owner: CartOwner) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart_for_update(&mut tx, owner)
            .await?
            .ok_or(OrdersServiceError::EmptyCart)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let priced: Vec<PricedLine> = items
            .iter()
            .map(|item| PricedLine::new(Price::new(item.unit_price), item.quantity))
            .collect();

        let totals = price_cart(&priced, &self.policy)?;

        // Reserve stock line by line; any shortfall rolls the whole
        // transaction back, so no partial decrement survives.
        for item in &items {
            let adjusted = self
                .products_repository
                .adjust_stock(&mut tx, item.product_uuid, -i64::from(item.quantity))
                .await?;

            if adjusted.is_none() {
                return Err(OrdersServiceError::InsufficientStock);
            }
        }

        let order_uuid = OrderUuid::new();

        let placed_at = self
            .orders_repository
            .create_order(&mut tx, order_uuid, owner, totals)
            .await?;

        let lines: Vec<OrderLine> = items
            .into_iter()
            .map(|item| OrderLine {
                product_uuid: item.product_uuid,
                name: item.name,
                sku: item.sku,
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect();

        for line in &lines {
            self.orders_repository
                .create_order_line(&mut tx, order_uuid, line)
                .await?;
        }

        self.carts_repository.delete_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(
            order = %order_uuid,
            lines = lines.len(),
            grand_total = totals.grand_total,
            "order placed"
        );

        Ok(Order {
            uuid: order_uuid,
            owner,
            lines,
            totals,
            placed_at,
        })
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders_repository.get_order(&mut tx, order).await?;

        let lines = self
            .orders_repository
            .get_order_lines(&mut tx, order.uuid)
            .await?;

        tx.commit().await?;

        order.lines = lines;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Checks out the owner's cart into a placed order.
    ///
    /// One transaction: price the lines, decrement stock, write the order
    /// snapshot, delete the cart. Shortfalls and failures roll back whole.
    async fn place_order(&self, owner: CartOwner) -> Result<Order, OrdersServiceError>;

    /// Retrieve a placed order with its lines.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;
}
