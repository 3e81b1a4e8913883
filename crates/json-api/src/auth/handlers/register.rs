//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::auth::models::NewUser;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            email: request.email,
            password: request.password,
        }
    }
}

/// User Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// User UUID
    pub uuid: Uuid,

    /// Account email
    pub email: String,
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register a shopper account",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Account already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(UserResponse {
        uuid: user.uuid.into_uuid(),
        email: user.email,
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use trolley_app::auth::{
        AuthServiceError, MockAuthService,
        models::{User, UserUuid},
    };

    use crate::test_helpers::{guest_service, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        guest_service(
            state_with_auth(auth),
            Router::with_path("auth/register").post(handler),
        )
    }

    #[tokio::test]
    async fn test_register_success_returns_201() -> TestResult {
        let uuid = UserUuid::new();

        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|new| new.email == "shopper@example.com")
            .return_once(move |new| {
                Ok(User {
                    uuid,
                    email: new.email,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "email": "shopper@example.com", "password": "hunter2" }))
            .send(&make_service(auth))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.email, "shopper@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_returns_409() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "email": "shopper@example.com", "password": "hunter2" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
