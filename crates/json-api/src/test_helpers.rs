//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use trolley_app::{
    auth::{MockAuthService, models::Identity, models::SessionUuid, models::UserUuid},
    context::AppContext,
    domain::{
        carts::MockCartsService, categories::MockCategoriesService, orders::MockOrdersService,
        products::MockProductsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_SESSION_UUID: SessionUuid = SessionUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));

/// Injects a guest identity, as the auth middleware would after a valid
/// anonymous bearer token.
#[salvo::handler]
pub(crate) async fn inject_guest(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        session: TEST_SESSION_UUID,
        user: None,
    });
    ctrl.call_next(req, depot, res).await;
}

/// Injects a logged-in identity.
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        session: TEST_SESSION_UUID,
        user: Some(TEST_USER_UUID),
    });
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_start_session().never();
    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_authenticate().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_set_item_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();
    carts.expect_merge_session_cart().never();

    carts
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_create_category().never();
    categories.expect_delete_category().never();

    categories
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();

    orders
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_adjust_stock().never();

    products
}

pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) carts: MockCartsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) orders: MockOrdersService,
    pub(crate) products: MockProductsService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            auth: strict_auth_mock(),
            carts: strict_carts_mock(),
            categories: strict_categories_mock(),
            orders: strict_orders_mock(),
            products: strict_products_mock(),
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            auth: Arc::new(self.auth),
            carts: Arc::new(self.carts),
            categories: Arc::new(self.categories),
            orders: Arc::new(self.orders),
            products: Arc::new(self.products),
        }))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    Mocks {
        carts,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_categories(categories: MockCategoriesService) -> Arc<State> {
    Mocks {
        categories,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Mocks {
        orders,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Mocks {
        products,
        ..Mocks::default()
    }
    .into_state()
}

/// A service with a guest identity already injected.
pub(crate) fn guest_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_guest)
            .push(route),
    )
}

/// A service with a logged-in identity already injected.
pub(crate) fn user_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service with state but no identity, for open routes.
pub(crate) fn open_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn make_product(
    product: trolley_app::domain::products::models::ProductUuid,
    price: u64,
    stock: u32,
) -> trolley_app::domain::products::models::Product {
    trolley_app::domain::products::models::Product {
        uuid: product,
        name: "Rooibos tea".to_string(),
        sku: "TEA-R".to_string(),
        price,
        stock,
        category_uuid: None,
        created_at: jiff::Timestamp::UNIX_EPOCH,
        updated_at: jiff::Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart_item(
    product: trolley_app::domain::products::models::ProductUuid,
    quantity: u32,
) -> trolley_app::domain::carts::models::CartItem {
    trolley_app::domain::carts::models::CartItem {
        product_uuid: product,
        name: "Rooibos tea".to_string(),
        sku: "TEA-R".to_string(),
        unit_price: 49_99,
        quantity,
        created_at: jiff::Timestamp::UNIX_EPOCH,
        updated_at: jiff::Timestamp::UNIX_EPOCH,
    }
}
