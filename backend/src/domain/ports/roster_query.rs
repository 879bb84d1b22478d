//! Driving port for roster reads.
use async_trait::async_trait;

use crate::domain::{AdmissionView, DoctorIdentity, Error, RosterView, StatusFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// The doctor's classified roster for today, filtered by `filter`.
    ///
    /// The summary always covers the unfiltered roster.
    async fn roster(
        &self,
        doctor: &DoctorIdentity,
        filter: StatusFilter,
    ) -> Result<RosterView, Error>;

    /// One admission from the doctor's roster.
    ///
    /// Admissions that are discharged, unknown, or assigned to another doctor
    /// are all reported as `not_found`.
    async fn admission(
        &self,
        doctor: &DoctorIdentity,
        admission_no: &str,
    ) -> Result<AdmissionView, Error>;
}
