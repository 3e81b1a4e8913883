//! Test Helpers

use crate::{
    auth::{AuthService, AuthServiceError, models::NewUser, models::UserUuid},
    domain::{
        carts::{
            CartsService, CartsServiceError,
            models::{CartItem, CartOwner, NewCartItem},
        },
        categories::{
            CategoriesService, CategoriesServiceError,
            models::{CategoryUuid, NewCategory},
        },
        products::{
            ProductsService, ProductsServiceError,
            models::{NewProduct, Product, ProductUpdate, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    product: ProductUuid,
    name: &str,
    sku: &str,
    price: u64,
    stock: u32,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: product,
            name: name.to_string(),
            sku: sku.to_string(),
            price,
            stock,
            category_uuid: None,
        })
        .await
}

pub(crate) async fn set_price(
    ctx: &TestContext,
    product: ProductUuid,
    name: &str,
    sku: &str,
    price: u64,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .update_product(
            product,
            ProductUpdate {
                name: name.to_string(),
                sku: sku.to_string(),
                price,
                category_uuid: None,
            },
        )
        .await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
    slug: &str,
) -> Result<CategoryUuid, CategoriesServiceError> {
    let category = ctx
        .categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            slug: slug.to_string(),
        })
        .await?;

    Ok(category.uuid)
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    owner: CartOwner,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartItem, CartsServiceError> {
    ctx.carts
        .add_item(
            owner,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}

pub(crate) async fn register_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserUuid, AuthServiceError> {
    let user = ctx
        .auth
        .register(NewUser {
            email: email.to_string(),
            password: "correct-horse".to_string(),
        })
        .await?;

    Ok(user.uuid)
}
