//! App Router

use salvo::Router;

use crate::{auth, carts, categories, checkout, products};

pub fn app_router() -> Router {
    Router::new()
        // Open storefront surface: browsing and session bootstrap need no
        // bearer token.
        .push(Router::with_path("sessions").post(auth::handlers::session::handler))
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .push(Router::with_path("{product}").get(products::handlers::get::handler)),
        )
        .push(Router::with_path("categories").get(categories::handlers::index::handler))
        // Everything else carries a session.
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("auth")
                        .push(Router::with_path("register").post(auth::handlers::register::handler))
                        .push(Router::with_path("login").post(auth::handlers::login::handler)),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::handlers::get::handler)
                        .delete(carts::handlers::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::handlers::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::items::handlers::update::handler)
                                        .delete(carts::items::handlers::delete::handler),
                                ),
                        ),
                )
                .push(Router::with_path("checkout").post(checkout::handlers::create::handler))
                .push(
                    Router::with_path("orders/{order}").get(checkout::handlers::get::handler),
                )
                .push(
                    Router::with_path("products")
                        .post(products::handlers::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::handlers::update::handler)
                                .delete(products::handlers::delete::handler)
                                .push(
                                    Router::with_path("stock")
                                        .put(products::handlers::stock::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("categories")
                        .post(categories::handlers::create::handler)
                        .push(
                            Router::with_path("{category}")
                                .delete(categories::handlers::delete::handler),
                        ),
                ),
        )
}
