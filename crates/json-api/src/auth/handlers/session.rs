//! Start Session Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Session Started Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionStartedResponse {
    /// Opaque bearer token; shown exactly once.
    pub token: String,

    /// Session UUID
    pub session_uuid: Uuid,
}

/// Start Session Handler
///
/// Issues a fresh guest session token. The raw token is not recoverable
/// later; callers must store it.
#[endpoint(
    tags("auth"),
    summary = "Start a guest session",
    responses(
        (status_code = StatusCode::CREATED, description = "Session started"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionStartedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .start_session()
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionStartedResponse {
        token: issued.token,
        session_uuid: issued.session.uuid.into_uuid(),
    }))
}
