//! Push device registration handler.
//!
//! ```text
//! POST /api/v1/notifications/register-token {"token":"...","platform":"web"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DeviceTokenRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for registering a push device token.
///
/// The token is always stored for the authenticated doctor; a `kd_dokter`
/// naming anyone else is rejected with 400. `timestamp` is accepted
/// for compatibility with existing clients and ignored; the server records
/// its own time.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterTokenRequest {
    #[serde(default)]
    pub token: String,
    pub user_id: Option<String>,
    pub kd_dokter: Option<String>,
    pub device_type: Option<String>,
    pub user_agent: Option<String>,
    #[schema(example = "web")]
    pub platform: Option<String>,
    pub timestamp: Option<String>,
}

impl From<RegisterTokenRequest> for DeviceTokenRequest {
    fn from(value: RegisterTokenRequest) -> Self {
        Self {
            token: value.token,
            user_id: value.user_id,
            doctor_code: value.kd_dokter,
            device_type: value.device_type,
            user_agent: value.user_agent,
            platform: value.platform,
        }
    }
}

/// Register or refresh a push device token.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/register-token",
    request_body = RegisterTokenRequest,
    responses(
        (status = 204, description = "Token registered"),
        (status = 400, description = "Blank token", body = ErrorSchema),
        (status = 401, description = "Missing, malformed or expired token", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "registerDeviceToken",
    security(("BearerToken" = []))
)]
#[post("/notifications/register-token")]
pub async fn register_token(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterTokenRequest>,
) -> ApiResult<HttpResponse> {
    state
        .device_tokens
        .register(&session.doctor().code, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::domain::Error;
    use crate::domain::ports::MockDeviceTokenCommand;
    use crate::inbound::http::test_utils::{TestHarness, bearer, sari};

    #[actix_web::test]
    async fn registration_is_forwarded_for_caller() {
        let mut tokens = MockDeviceTokenCommand::new();
        tokens
            .expect_register()
            .withf(|caller, request| {
                caller.as_str() == "D01"
                    && request.token == "fcm-abc"
                    && request.doctor_code.is_none()
                    && request.platform.as_deref() == Some("web")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let harness = TestHarness::default().with_device_tokens(tokens);
        let token = harness.issue_token(&sari());
        let app = test::init_service(harness.app().service(register_token)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/notifications/register-token")
                .insert_header((AUTHORIZATION, bearer(&token)))
                .set_json(json!({
                    "token": "fcm-abc",
                    "platform": "web",
                    "timestamp": "2026-02-27T09:00:00Z"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn validation_errors_surface_as_bad_request() {
        let mut tokens = MockDeviceTokenCommand::new();
        tokens.expect_register().returning(|_, _| {
            Err(Error::invalid_request("token must not be empty")
                .with_details(json!({ "field": "token" })))
        });
        let harness = TestHarness::default().with_device_tokens(tokens);
        let token = harness.issue_token(&sari());
        let app = test::init_service(harness.app().service(register_token)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/notifications/register-token")
                .insert_header((AUTHORIZATION, bearer(&token)))
                .set_json(json!({ "platform": "web" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "token");
    }

    #[actix_web::test]
    async fn registration_requires_token() {
        let mut tokens = MockDeviceTokenCommand::new();
        tokens.expect_register().never();
        let harness = TestHarness::default().with_device_tokens(tokens);
        let app = test::init_service(harness.app().service(register_token)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/notifications/register-token")
                .set_json(json!({ "token": "fcm-abc" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
