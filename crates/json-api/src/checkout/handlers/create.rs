//! Place Order Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::orders::models::{Order, OrderLine};

use crate::{
    carts::handlers::CartTotalsResponse, checkout::errors::into_status_error, extensions::*,
    observability, state::State,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Order UUID
    pub uuid: Uuid,

    /// Snapshot of the purchased lines
    pub lines: Vec<OrderLineResponse>,

    /// The priced breakdown captured at checkout
    pub totals: CartTotalsResponse,

    /// When the order was placed
    pub placed_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            lines: order.lines.into_iter().map(Into::into).collect(),
            totals: order.totals.into(),
            placed_at: order.placed_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// The purchased product
    pub product_uuid: Uuid,

    /// Product name at checkout time
    pub name: String,

    /// Product SKU at checkout time
    pub sku: String,

    /// Captured unit price in minor units
    pub unit_price: u64,

    /// Quantity purchased
    pub quantity: u32,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product_uuid: line.product_uuid.into_uuid(),
            name: line.name,
            sku: line.sku,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Place Order Handler
///
/// Checks out the caller's cart: prices it, reserves stock, and returns the
/// order snapshot that payment capture runs against.
#[endpoint(
    tags("checkout"),
    summary = "Place order from my cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::CONFLICT, description = "Cart empty or not enough stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = state
        .app
        .orders
        .place_order(identity.cart_owner())
        .await
        .map_err(into_status_error)?;

    observability::observe_order_placed();

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use trolley::pricing::CartTotals;
    use trolley_app::domain::{
        carts::models::CartOwner,
        orders::{MockOrdersService, OrdersServiceError, models::OrderUuid},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, state_with_orders, user_service};

    use super::*;

    fn make_order(owner: CartOwner) -> Order {
        Order {
            uuid: OrderUuid::new(),
            owner,
            lines: vec![OrderLine {
                product_uuid: ProductUuid::new(),
                name: "Rooibos tea".to_string(),
                sku: "TEA-R".to_string(),
                unit_price: 50_00,
                quantity: 2,
            }],
            totals: CartTotals {
                subtotal: 100_00,
                tax: 15_00,
                shipping: 50_00,
                grand_total: 165_00,
            },
            placed_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(orders: MockOrdersService) -> Service {
        user_service(
            state_with_orders(orders),
            Router::with_path("checkout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_checkout_returns_201_with_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(|owner| *owner == CartOwner::User(TEST_USER_UUID))
            .return_once(|owner| Ok(make_order(owner)));

        let mut res = TestClient::post("http://example.com/checkout")
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.lines.len(), 1);
        assert_eq!(body.totals.grand_total, 165_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/checkout")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_stock_shortfall_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::InsufficientStock));

        let res = TestClient::post("http://example.com/checkout")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
