//! Login credentials and the credential verifier.
//!
//! Stored credentials are decrypted by the persistence adapter; the password
//! comparison itself happens here, in constant time, so it can be tested
//! without a database and never depends on an opaque SQL predicate.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::DoctorIdentity;

/// Message shared by every credential rejection.
///
/// Unknown identifiers and wrong passwords are indistinguishable to callers.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Validation failures raised while parsing a login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// `id_user` was missing or blank once trimmed.
    EmptyUserId,
    /// `password` was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUserId => write!(f, "id_user must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `user_id` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use ward_rounds::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" D01 ", "s3cret").unwrap();
/// assert_eq!(creds.user_id(), "D01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    user_id: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login inputs.
    pub fn try_from_parts(user_id: &str, password: &str) -> Result<Self, LoginValidationError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(LoginValidationError::EmptyUserId);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            user_id: user_id.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed login identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Password exactly as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Decrypted credential row joined with the doctor it belongs to.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    /// Decrypted login identifier.
    pub user_id: String,
    /// Decrypted password.
    pub password: Zeroizing<String>,
    /// Doctor the login maps to.
    pub doctor: DoctorIdentity,
}

/// Outcome of comparing submitted credentials with the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialMatch {
    /// Identifier and password both matched.
    Matched(DoctorIdentity),
    /// No row, or the password differed.
    Rejected,
}

/// Compare submitted credentials against an optional stored row.
///
/// The identifier must match exactly and the password is compared in
/// constant time. A missing row and a wrong password produce the same
/// [`CredentialMatch::Rejected`].
pub fn verify_credentials(
    submitted: &LoginCredentials,
    stored: Option<&StoredCredential>,
) -> CredentialMatch {
    let Some(stored) = stored else {
        return CredentialMatch::Rejected;
    };
    let id_matches = stored.user_id.as_bytes().ct_eq(submitted.user_id().as_bytes());
    let password_matches = stored
        .password
        .as_bytes()
        .ct_eq(submitted.password().as_bytes());
    if bool::from(id_matches & password_matches) {
        CredentialMatch::Matched(stored.doctor.clone())
    } else {
        CredentialMatch::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DoctorCode;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    fn stored(user_id: &str, password: &str) -> StoredCredential {
        StoredCredential {
            user_id: user_id.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            doctor: DoctorIdentity {
                code: DoctorCode::new("D01").expect("doctor code"),
                name: "dr. Sari Wulandari, Sp.PD".to_owned(),
            },
        }
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUserId)]
    #[case("   ", "pw", LoginValidationError::EmptyUserId)]
    #[case("D01", "", LoginValidationError::EmptyPassword)]
    fn rejects_blank_inputs(
        #[case] user_id: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(user_id, password)
            .expect_err("blank inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("D01", " pw ").expect("valid");
        assert_eq!(creds.password(), " pw ");
    }

    #[given("a doctor with stored credentials")]
    fn a_doctor_with_stored_credentials() -> StoredCredential {
        stored("D01", "rahasia")
    }

    #[when("the doctor logs in with")]
    fn the_doctor_logs_in_with(
        stored: Option<&StoredCredential>,
        user_id: &str,
        password: &str,
    ) -> CredentialMatch {
        let creds = LoginCredentials::try_from_parts(user_id, password).expect("valid shape");
        verify_credentials(&creds, stored)
    }

    #[then("the login is rejected")]
    fn the_login_is_rejected(outcome: &CredentialMatch) {
        assert_eq!(outcome, &CredentialMatch::Rejected);
    }

    #[test]
    fn exact_match_yields_the_doctor() {
        let row = a_doctor_with_stored_credentials();
        let outcome = the_doctor_logs_in_with(Some(&row), "D01", "rahasia");
        match outcome {
            CredentialMatch::Matched(doctor) => assert_eq!(doctor.code.as_str(), "D01"),
            CredentialMatch::Rejected => panic!("exact credentials must match"),
        }
    }

    #[rstest]
    #[case("D01", "Rahasia")]
    #[case("D01", "rahasia ")]
    #[case("D011", "rahasia")]
    fn any_mismatch_is_rejected(#[case] user_id: &str, #[case] password: &str) {
        let row = a_doctor_with_stored_credentials();
        let outcome = the_doctor_logs_in_with(Some(&row), user_id, password);
        the_login_is_rejected(&outcome);
    }

    #[test]
    fn unknown_identifier_and_wrong_password_are_indistinguishable() {
        let row = a_doctor_with_stored_credentials();
        let wrong_password = the_doctor_logs_in_with(Some(&row), "D01", "salah");
        let unknown = the_doctor_logs_in_with(None, "D99", "rahasia");
        assert_eq!(wrong_password, unknown);
    }
}
