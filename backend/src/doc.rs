//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the error
//! schema wrappers from [`crate::inbound::http::schemas`], and the bearer
//! token security scheme. The document backs Swagger UI in debug builds and
//! is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::auth::{LoginRequest, LoginResponse, SessionClaimsResponse};
use crate::inbound::http::notifications::RegisterTokenRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::{
    AdmissionResponse, DoctorInfoResponse, DoctorProfileResponse, RosterResponse, SummaryResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Session token issued by POST /api/v1/auth/login."))
            .build();
        components.add_security_scheme("BearerToken", SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Ward rounds API",
        description = "Inpatient rosters, documentation progress and push registration for attending doctors."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::validate,
        crate::inbound::http::ranap::list_admissions,
        crate::inbound::http::ranap::get_admission,
        crate::inbound::http::ranap::get_profile,
        crate::inbound::http::notifications::register_token,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        LoginResponse,
        SessionClaimsResponse,
        AdmissionResponse,
        DoctorInfoResponse,
        SummaryResponse,
        RosterResponse,
        DoctorProfileResponse,
        RegisterTokenRequest
    )),
    tags(
        (name = "auth", description = "Login and session validation"),
        (name = "ranap", description = "Inpatient roster and doctor profile"),
        (name = "notifications", description = "Push device registration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
