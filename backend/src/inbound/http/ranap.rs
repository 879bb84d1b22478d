//! Inpatient roster API handlers.
//!
//! ```text
//! GET /api/v1/ranap/pasien?filter=pending
//! GET /api/v1/ranap/pasien/2026/02/27/000009
//! GET /api/v1/ranap/profile
//! ```
//!
//! Admission numbers contain `/`, so the detail route captures the rest of
//! the path.

use actix_web::{get, web};
use tracing::debug;

use crate::domain::{Error, StatusFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::ranap_dto::{
    AdmissionPath, AdmissionResponse, DoctorProfileResponse, RosterParams, RosterResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// List the caller's active admissions with documentation status.
///
/// `filter` accepts `all`, `done`, `pending` and `new`, plus the legacy
/// values `sudah_cppt`, `belum_cppt` and `pasien_baru`; anything else lists
/// everything. The summary always covers the whole roster.
#[utoipa::path(
    get,
    path = "/api/v1/ranap/pasien",
    params(("filter" = Option<String>, Query, description = "Documentation status filter")),
    responses(
        (status = 200, description = "Roster", body = RosterResponse),
        (status = 401, description = "Missing, malformed or expired token", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["ranap"],
    operation_id = "listAdmissions",
    security(("BearerToken" = []))
)]
#[get("/ranap/pasien")]
pub async fn list_admissions(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<RosterParams>,
) -> ApiResult<web::Json<RosterResponse>> {
    let filter = StatusFilter::parse_lenient(params.filter.as_deref());
    debug!(kd_dokter = %session.doctor().code, ?filter, "roster requested");
    let view = state.roster.roster(session.doctor(), filter).await?;
    Ok(web::Json(RosterResponse::from(view)))
}

/// Show one admission from the caller's roster.
///
/// Admissions that are discharged, unknown, or under another doctor all
/// answer 404.
#[utoipa::path(
    get,
    path = "/api/v1/ranap/pasien/{no_rawat}",
    params(("no_rawat" = String, Path, description = "Admission number, may contain `/`")),
    responses(
        (status = 200, description = "Admission detail", body = AdmissionResponse),
        (status = 400, description = "Missing admission number", body = ErrorSchema),
        (status = 401, description = "Missing, malformed or expired token", body = ErrorSchema),
        (status = 404, description = "Not on the caller's roster", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["ranap"],
    operation_id = "getAdmission",
    security(("BearerToken" = []))
)]
#[get("/ranap/pasien/{no_rawat:.*}")]
pub async fn get_admission(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AdmissionPath>,
) -> ApiResult<web::Json<AdmissionResponse>> {
    let admission_no = path.no_rawat.trim_matches('/');
    if admission_no.is_empty() {
        return Err(Error::invalid_request("no_rawat must not be empty")
            .with_details(serde_json::json!({ "field": "no_rawat" })));
    }
    let view = state.roster.admission(session.doctor(), admission_no).await?;
    Ok(web::Json(AdmissionResponse::from(view)))
}

/// Profile of the authenticated doctor.
#[utoipa::path(
    get,
    path = "/api/v1/ranap/profile",
    responses(
        (status = 200, description = "Doctor profile", body = DoctorProfileResponse),
        (status = 401, description = "Missing, malformed or expired token", body = ErrorSchema),
        (status = 404, description = "Doctor not found", body = ErrorSchema)
    ),
    tags = ["ranap"],
    operation_id = "getDoctorProfile",
    security(("BearerToken" = []))
)]
#[get("/ranap/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DoctorProfileResponse>> {
    let profile = state.profile.profile(&session.doctor().code).await?;
    Ok(web::Json(DoctorProfileResponse::from(profile)))
}
