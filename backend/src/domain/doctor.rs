//! Doctor identity and profile.
//!
//! Doctors are reference data owned by the hospital information system; this
//! service only reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised by [`DoctorCode::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorValidationError {
    EmptyCode,
}

impl fmt::Display for DoctorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "doctor code must not be empty"),
        }
    }
}

impl std::error::Error for DoctorValidationError {}

/// Doctor code (`kd_dokter`).
///
/// ## Invariants
/// - Trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DoctorCode(String);

impl DoctorCode {
    /// Validate and construct a [`DoctorCode`].
    ///
    /// # Examples
    /// ```
    /// use ward_rounds::domain::DoctorCode;
    ///
    /// assert_eq!(DoctorCode::new(" D01 ").unwrap().as_str(), "D01");
    /// assert!(DoctorCode::new("  ").is_err());
    /// ```
    pub fn new(code: impl AsRef<str>) -> Result<Self, DoctorValidationError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(DoctorValidationError::EmptyCode);
        }
        Ok(Self(code.to_owned()))
    }

    /// Code as stored in `dokter.kd_dokter`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DoctorCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DoctorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DoctorCode {
    type Error = DoctorValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DoctorCode> for String {
    fn from(value: DoctorCode) -> Self {
        value.0
    }
}

/// The doctor a session acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorIdentity {
    pub code: DoctorCode,
    pub name: String,
}

/// Contact and specialty details for a doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorProfile {
    pub code: DoctorCode,
    pub name: String,
    /// Empty when the hospital record has no phone number.
    pub phone: String,
    /// Specialty name; empty when the doctor has no specialty assigned.
    pub specialty: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn rejects_blank_codes(#[case] raw: &str) {
        assert_eq!(DoctorCode::new(raw), Err(DoctorValidationError::EmptyCode));
    }

    #[test]
    fn deserialises_through_validation() {
        let err = serde_json::from_str::<DoctorCode>("\" \"").expect_err("blank code");
        assert!(err.to_string().contains("doctor code must not be empty"));
        let code: DoctorCode = serde_json::from_str("\"D01\"").expect("valid code");
        assert_eq!(code.as_str(), "D01");
    }
}
