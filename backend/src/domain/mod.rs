//! Domain primitives, services and ports.
//!
//! Purpose: keep ward-round rules (credential checks, session tokens,
//! documentation status, roster summaries, notification dispatch) free of
//! HTTP and SQL so they can be tested with in-memory doubles.
//!
//! Public surface:
//! - Error / ErrorCode: error payload shared by every adapter.
//! - TraceId: per-request correlation identifier.
//! - LoginCredentials, SessionTokenService: authentication.
//! - RosterService, DocumentationStatus, RosterSummary: the roster.
//! - NotificationDispatcher, DeviceTokenService: push notifications.

pub mod auth;
pub mod doctor;
mod doctor_profile_service;
pub mod error;
mod login_service;
pub mod notifications;
pub mod ports;
pub mod roster;
pub mod session_token;
pub mod trace_id;

pub use self::auth::{
    CredentialMatch, INVALID_CREDENTIALS, LoginCredentials, LoginValidationError,
    StoredCredential, verify_credentials,
};
pub use self::doctor::{DoctorCode, DoctorIdentity, DoctorProfile, DoctorValidationError};
pub use self::doctor_profile_service::DoctorProfileService;
pub use self::error::{Error, ErrorCode};
pub use self::login_service::CredentialLoginService;
pub use self::notifications::{
    DELIVERED_NOTE, DeviceTokenRegistration, DeviceTokenRequest, DeviceTokenService,
    DispatchReport, NotificationDispatcher, NotificationDispatcherConfig,
    NotificationDispatcherPorts, PushMessage, QueuedNotification,
};
pub use self::roster::{
    AdmissionRecord, AdmissionView, DocumentationStatus, RosterService, RosterSummary,
    RosterView, StatusFilter, sort_roster,
};
pub use self::session_token::{
    IssuedToken, SESSION_LIFETIME, SessionClaims, SessionTokenService, TokenError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use ward_rounds::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("patient not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
