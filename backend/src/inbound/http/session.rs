//! Bearer session extractor keeping token handling out of handlers.
//!
//! Protected handlers take a [`SessionContext`] argument. Extraction reads
//! `Authorization: Bearer <token>`, validates the token against the
//! [`HttpState`] session validator, and fails with `401 Unauthorized` when the
//! header is missing, malformed, badly signed, or expired.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{DoctorIdentity, Error, SessionClaims};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Authenticated caller of a protected route.
#[derive(Debug, Clone)]
pub struct SessionContext {
    claims: SessionClaims,
    doctor: DoctorIdentity,
}

impl SessionContext {
    /// Verified claims of the bearer token.
    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    /// Doctor identity carried by the token.
    pub fn doctor(&self) -> &DoctorIdentity {
        &self.doctor
    }

    fn authenticate(state: &HttpState, headers: &HeaderMap) -> Result<Self, Error> {
        let token = bearer_token(headers)?;
        let claims = state.sessions.validate(token).map_err(|err| {
            debug!(reason = %err, "bearer token rejected");
            Error::from(err)
        })?;
        let doctor = claims.doctor()?;
        Ok(Self { claims, doctor })
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(Error::unauthorized("malformed authorization header"));
    }
    Ok(token)
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<HttpState>>() {
            Some(state) => Self::authenticate(state, req.headers()),
            None => Err(Error::internal("session validation is not configured")),
        };
        ready(result)
    }
}
