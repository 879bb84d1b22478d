//! Signed session tokens.
//!
//! Tokens are compact HS256 JWTs (`header.claims.signature`, base64url
//! without padding). They carry the doctor identity so protected handlers
//! never touch the credential store, and expire a fixed 30 minutes after
//! issue. There is no refresh.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::{DoctorCode, DoctorIdentity, Error};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Lifetime of every issued token.
pub const SESSION_LIFETIME: TimeDelta = TimeDelta::minutes(30);

/// Reasons a presented token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token algorithm is not supported")]
    UnsupportedAlgorithm,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for Error {
    fn from(value: TokenError) -> Self {
        Error::unauthorized(value.to_string())
    }
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Login identifier the token was issued for.
    pub id_user: String,
    pub kd_dokter: String,
    pub nm_dokter: String,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry time, seconds since the Unix epoch.
    pub exp: i64,
}

impl SessionClaims {
    /// Doctor code carried by the token.
    pub fn doctor_code(&self) -> Result<DoctorCode, TokenError> {
        DoctorCode::new(&self.kd_dokter).map_err(|_| TokenError::Malformed)
    }

    /// Doctor code and display name carried by the token.
    pub fn doctor(&self) -> Result<DoctorIdentity, TokenError> {
        Ok(DoctorIdentity {
            code: self.doctor_code()?,
            name: self.nm_dokter.clone(),
        })
    }

    /// Expiry as a timestamp; `None` when `exp` is out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

/// A freshly issued token and the claims it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Issues and validates session tokens.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use ward_rounds::domain::{DoctorCode, DoctorIdentity, SessionTokenService};
///
/// let service = SessionTokenService::new("change-me", Arc::new(mockable::DefaultClock));
/// let doctor = DoctorIdentity {
///     code: DoctorCode::new("D01").unwrap(),
///     name: "dr. Sari".into(),
/// };
/// let issued = service.issue("D01", &doctor).unwrap();
/// let claims = service.validate(&issued.token).unwrap();
/// assert_eq!(claims.kd_dokter, "D01");
/// ```
#[derive(Clone)]
pub struct SessionTokenService {
    secret: Arc<Zeroizing<Vec<u8>>>,
    clock: Arc<dyn Clock>,
}

impl SessionTokenService {
    /// Create a service signing with `secret` (HS256).
    ///
    /// `clock` supplies `iat` on issue and the reference time on validation.
    pub fn new(secret: impl AsRef<[u8]>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Arc::new(Zeroizing::new(secret.as_ref().to_vec())),
            clock,
        }
    }

    fn mac(&self) -> Result<HmacSha256, Error> {
        HmacSha256::new_from_slice(self.secret.as_slice())
            .map_err(|err| Error::internal(format!("invalid signing key: {err}")))
    }

    /// Issue a token for `doctor`, valid for [`SESSION_LIFETIME`].
    pub fn issue(&self, user_id: &str, doctor: &DoctorIdentity) -> Result<IssuedToken, Error> {
        let now = self.clock.utc();
        let claims = SessionClaims {
            id_user: user_id.to_owned(),
            kd_dokter: doctor.code.to_string(),
            nm_dokter: doctor.name.clone(),
            iat: now.timestamp(),
            exp: (now + SESSION_LIFETIME).timestamp(),
        };
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: Some("JWT".to_owned()),
        };
        let header = serde_json::to_vec(&header)
            .map_err(|err| Error::internal(format!("encode token header: {err}")))?;
        let payload = serde_json::to_vec(&claims)
            .map_err(|err| Error::internal(format!("encode token claims: {err}")))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{signing_input}.{signature}"),
            claims,
        })
    }

    /// Verify `token` and return its claims.
    ///
    /// A token is accepted only when the signature verifies, the header names
    /// HS256, the claims decode, and the current time is before `exp`.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;
        let signing_input = token
            .rsplit_once('.')
            .map_or("", |(signing_input, _)| signing_input);
        let mut mac = self.mac().map_err(|_| TokenError::BadSignature)?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims: SessionClaims = decode_segment(payload)?;
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MutableClock;
    use rstest::{fixture, rstest};

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0)
            .single()
            .expect("valid time")
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::new(issued_at()))
    }

    fn doctor() -> DoctorIdentity {
        DoctorIdentity {
            code: DoctorCode::new("D01").expect("doctor code"),
            name: "dr. Sari Wulandari, Sp.PD".to_owned(),
        }
    }

    fn service(clock: Arc<MutableClock>) -> SessionTokenService {
        SessionTokenService::new("test-secret", clock)
    }

    #[rstest]
    fn issued_claims_span_thirty_minutes(clock: Arc<MutableClock>) {
        let issued = service(clock).issue("D01", &doctor()).expect("issue");
        assert_eq!(issued.claims.iat, issued_at().timestamp());
        assert_eq!(issued.claims.exp - issued.claims.iat, 30 * 60);
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[rstest]
    #[case(29 * 60, true)]
    #[case(30 * 60 - 1, true)]
    #[case(30 * 60, false)]
    #[case(31 * 60, false)]
    fn validity_ends_at_expiry(
        clock: Arc<MutableClock>,
        #[case] elapsed_seconds: i64,
        #[case] valid: bool,
    ) {
        let tokens = service(clock.clone());
        let issued = tokens.issue("D01", &doctor()).expect("issue");
        clock.advance_seconds(elapsed_seconds);
        let outcome = tokens.validate(&issued.token);
        if valid {
            let claims = outcome.expect("token still valid");
            assert_eq!(claims, issued.claims);
        } else {
            assert_eq!(outcome, Err(TokenError::Expired));
        }
    }

    #[rstest]
    fn rejects_tokens_signed_with_another_secret(clock: Arc<MutableClock>) {
        let foreign = SessionTokenService::new("other-secret", clock.clone());
        let issued = foreign.issue("D01", &doctor()).expect("issue");
        assert_eq!(
            service(clock).validate(&issued.token),
            Err(TokenError::BadSignature)
        );
    }

    #[rstest]
    fn rejects_tampered_claims(clock: Arc<MutableClock>) {
        let tokens = service(clock);
        let issued = tokens.issue("D01", &doctor()).expect("issue");
        let mut forged = issued.claims.clone();
        forged.kd_dokter = "D02".to_owned();
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).expect("encode claims"));
        let parts: Vec<&str> = issued.token.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert_eq!(tokens.validate(&tampered), Err(TokenError::BadSignature));
    }

    #[rstest]
    fn rejects_unsigned_algorithm(clock: Arc<MutableClock>) {
        let tokens = service(clock);
        let issued = tokens.issue("D01", &doctor()).expect("issue");
        let none_header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let parts: Vec<&str> = issued.token.split('.').collect();
        let downgraded = format!("{}.{}.", none_header, parts[1]);
        assert_eq!(
            tokens.validate(&downgraded),
            Err(TokenError::UnsupportedAlgorithm)
        );
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    #[case("!!!.???.***")]
    fn rejects_malformed_tokens(clock: Arc<MutableClock>, #[case] token: &str) {
        assert_eq!(service(clock).validate(token), Err(TokenError::Malformed));
    }

    #[test]
    fn token_errors_map_to_unauthorized() {
        let error: Error = TokenError::Expired.into();
        assert_eq!(error.code(), crate::domain::ErrorCode::Unauthorized);
        assert_eq!(error.message(), "token has expired");
    }
}
