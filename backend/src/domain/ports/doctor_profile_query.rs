//! Driving port for the signed-in doctor's profile.
use async_trait::async_trait;

use crate::domain::{DoctorCode, DoctorProfile, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorProfileQuery: Send + Sync {
    /// Load a profile, failing with `not_found` when the doctor is unknown.
    async fn profile(&self, code: &DoctorCode) -> Result<DoctorProfile, Error>;
}
