//! Port abstraction for doctor reference data.
use async_trait::async_trait;

use crate::domain::{DoctorCode, DoctorProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by doctor repository adapters.
    pub enum DoctorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            ServiceUnavailable: "doctor repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            InternalError: "doctor repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Fetch a doctor's profile, with specialty name resolved.
    async fn find_profile(
        &self,
        code: &DoctorCode,
    ) -> Result<Option<DoctorProfile>, DoctorRepositoryError>;
}
