//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/auth/login {"id_user":"D01","password":"..."}
//! GET  /api/v1/auth/validate   (Authorization: Bearer <token>)
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, IssuedToken, LoginCredentials, LoginValidationError, SessionClaims};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "D01")]
    pub id_user: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.id_user, &value.password)
    }
}

/// Issued session token and the identity it carries.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub id_user: String,
    #[schema(example = "D01")]
    pub kd_dokter: String,
    pub nm_dokter: String,
    /// Expiry, seconds since the Unix epoch.
    pub expires_at: i64,
}

impl From<IssuedToken> for LoginResponse {
    fn from(value: IssuedToken) -> Self {
        let IssuedToken { token, claims } = value;
        Self {
            token,
            id_user: claims.id_user,
            kd_dokter: claims.kd_dokter,
            nm_dokter: claims.nm_dokter,
            expires_at: claims.exp,
        }
    }
}

/// Claims echoed back by `GET /api/v1/auth/validate`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionClaimsResponse {
    pub id_user: String,
    pub kd_dokter: String,
    pub nm_dokter: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<&SessionClaims> for SessionClaimsResponse {
    fn from(value: &SessionClaims) -> Self {
        Self {
            id_user: value.id_user.clone(),
            kd_dokter: value.kd_dokter.clone(),
            nm_dokter: value.nm_dokter.clone(),
            issued_at: value.iat,
            expires_at: value.exp,
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUserId => Error::invalid_request("id_user must not be empty")
            .with_details(json!({ "field": "id_user", "code": "empty_id_user" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Verify credentials and issue a session token.
///
/// Unknown identifiers and wrong passwords fail identically.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_login_validation_error)?;
    let issued = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse::from(issued)))
}

/// Confirm the presented token is valid and echo its claims.
#[utoipa::path(
    get,
    path = "/api/v1/auth/validate",
    responses(
        (status = 200, description = "Token is valid", body = SessionClaimsResponse),
        (status = 401, description = "Missing, malformed or expired token", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "validateToken",
    security(("BearerToken" = []))
)]
#[get("/auth/validate")]
pub async fn validate(session: SessionContext) -> web::Json<SessionClaimsResponse> {
    info!(kd_dokter = %session.doctor().code, "token validated");
    web::Json(SessionClaimsResponse::from(session.claims()))
}
