//! Read-side port for a doctor's active admissions.
//!
//! Adapters return raw records with same-day documentation aggregates;
//! classification and ordering live in the domain so they do not depend on
//! database clocks or collations.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{AdmissionRecord, DoctorCode};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading admissions.
    pub enum AdmissionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            ServiceUnavailable: "admission read connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            InternalError: "admission read query failed: {message}",
    }
}

/// Port for reading undischarged admissions assigned to a doctor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdmissionRepository: Send + Sync {
    /// All undischarged admissions where `doctor` is the doctor of record.
    ///
    /// `notes_today` counts the doctor's own notes dated `today`. Ordering is
    /// unspecified.
    async fn active_for_doctor(
        &self,
        doctor: &DoctorCode,
        today: NaiveDate,
    ) -> Result<Vec<AdmissionRecord>, AdmissionRepositoryError>;

    /// A single undischarged admission, only when `doctor` is its doctor of
    /// record.
    async fn find_for_doctor(
        &self,
        doctor: &DoctorCode,
        admission_no: &str,
        today: NaiveDate,
    ) -> Result<Option<AdmissionRecord>, AdmissionRepositoryError>;
}
