//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    auth::{handlers::register::UserResponse, into_status_error},
    extensions::*,
    observability,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Handler
///
/// Verifies credentials, binds the bearer session to the account, and folds
/// the guest cart into the user's cart.
#[endpoint(
    tags("auth"),
    summary = "Log in",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let request = json.into_inner();

    let user = state
        .app
        .auth
        .login(identity.session, &request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    // The login is already durable; a merge failure must not undo it.
    // The guest cart stays keyed to the session and a later login retries.
    if let Err(merge_error) = state
        .app
        .carts
        .merge_session_cart(identity.session, user.uuid)
        .await
    {
        error!("failed to merge guest cart at login: {merge_error}");
    } else {
        observability::observe_cart_merged();
    }

    Ok(Json(UserResponse {
        uuid: user.uuid.into_uuid(),
        email: user.email,
    }))
}
