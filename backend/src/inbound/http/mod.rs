//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{Scope, web};

use crate::domain::Error;

pub mod auth;
pub mod error;
pub mod health;
pub mod notifications;
pub mod ranap;
mod ranap_dto;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use ranap_dto::{
    AdmissionResponse, DoctorInfoResponse, DoctorProfileResponse, RosterResponse, SummaryResponse,
};

/// JSON extractor settings: malformed bodies become `invalid_request`
/// payloads instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Query-string extractor settings, mapped to `invalid_request` like
/// [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

/// The `/api/v1` scope with every versioned endpoint registered.
///
/// Handlers expect `web::Data<HttpState>` to be registered on the app.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(json_config())
        .app_data(query_config())
        .service(auth::login)
        .service(auth::validate)
        .service(ranap::list_admissions)
        .service(ranap::get_profile)
        .service(ranap::get_admission)
        .service(notifications::register_token)
}
