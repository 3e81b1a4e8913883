//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, handlers::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart with priced totals. A shopper who has not
/// added anything yet gets an empty cart, not a 404.
#[endpoint(
    tags("cart"),
    summary = "Get my cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(identity.cart_owner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use trolley::pricing::CartTotals;
    use trolley_app::domain::{
        carts::{CartsServiceError, MockCartsService, models::Cart, models::CartOwner},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{
        TEST_SESSION_UUID, TEST_USER_UUID, guest_service, make_cart_item, state_with_carts,
        user_service,
    };

    use super::*;

    #[tokio::test]
    async fn test_get_cart_returns_items_and_totals() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|owner| *owner == CartOwner::Session(TEST_SESSION_UUID))
            .return_once(move |_| {
                Ok(Cart {
                    items: vec![make_cart_item(product, 2)],
                    totals: CartTotals {
                        subtotal: 99_98,
                        tax: 15_00,
                        shipping: 50_00,
                        grand_total: 164_98,
                    },
                })
            });

        let service = guest_service(
            state_with_carts(carts),
            Router::with_path("cart").get(handler),
        );

        let mut res = TestClient::get("http://example.com/cart").send(&service).await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.totals.subtotal, 99_98);
        assert_eq!(body.totals.grand_total, 164_98);

        Ok(())
    }

    #[tokio::test]
    async fn test_logged_in_shopper_reads_user_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|owner| *owner == CartOwner::User(TEST_USER_UUID))
            .return_once(|_| Ok(Cart::empty()));

        let service = user_service(
            state_with_carts(carts),
            Router::with_path("cart").get(handler),
        );

        let res = TestClient::get("http://example.com/cart").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_pricing_error_returns_500() -> TestResult {
        use trolley::pricing::PricingError;

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::Pricing(PricingError::Overflow)));

        let service = guest_service(
            state_with_carts(carts),
            Router::with_path("cart").get(handler),
        );

        let res = TestClient::get("http://example.com/cart").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
