//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use trolley_app::domain::carts::models::CartOwner;

use crate::{
    checkout::{errors::into_status_error, handlers::create::OrderResponse},
    extensions::*,
    state::State,
};

/// Get Order Handler
///
/// Returns one of the caller's placed orders. Orders belonging to anyone
/// else read as not found.
#[endpoint(
    tags("checkout"),
    summary = "Get a placed order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let owned = match order.owner {
        CartOwner::User(user) => identity.user == Some(user),
        CartOwner::Session(session) => identity.session == session,
    };

    if !owned {
        return Err(StatusError::not_found());
    }

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use trolley::pricing::CartTotals;
    use trolley_app::{
        auth::models::UserUuid,
        domain::orders::{
            MockOrdersService, OrdersServiceError,
            models::{Order, OrderUuid},
        },
    };

    use crate::test_helpers::{TEST_USER_UUID, state_with_orders, user_service};

    use super::*;

    fn make_order(uuid: OrderUuid, owner: CartOwner) -> Order {
        Order {
            uuid,
            owner,
            lines: Vec::new(),
            totals: CartTotals::ZERO,
            placed_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(orders: MockOrdersService) -> Service {
        user_service(
            state_with_orders(orders),
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_own_order_returns_200() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |o| *o == uuid)
            .return_once(move |_| Ok(make_order(uuid, CartOwner::User(TEST_USER_UUID))));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_someone_elses_order_returns_404() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(make_order(uuid, CartOwner::User(UserUuid::new()))));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
