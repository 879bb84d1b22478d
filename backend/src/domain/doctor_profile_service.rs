//! Doctor profile lookups.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DoctorProfileQuery, DoctorRepository};
use crate::domain::{DoctorCode, DoctorProfile, Error};

/// Serves the signed-in doctor's profile from the doctor repository.
#[derive(Clone)]
pub struct DoctorProfileService {
    doctors: Arc<dyn DoctorRepository>,
}

impl DoctorProfileService {
    /// Create the service over the doctor repository.
    pub fn new(doctors: Arc<dyn DoctorRepository>) -> Self {
        Self { doctors }
    }
}

#[async_trait]
impl DoctorProfileQuery for DoctorProfileService {
    async fn profile(&self, code: &DoctorCode) -> Result<DoctorProfile, Error> {
        self.doctors
            .find_profile(code)
            .await?
            .ok_or_else(|| Error::not_found("doctor not found"))
    }
}
