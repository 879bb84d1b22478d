//! Port abstraction for push device token persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::DeviceTokenRegistration;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by device token adapters.
    pub enum DeviceTokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            ServiceUnavailable: "device token repository connection failed: {message}",
        /// Upsert failed during execution.
        Query { message: String } =>
            InternalError: "device token repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceTokenRepository: Send + Sync {
    /// Insert the token or refresh its owner and device fields.
    ///
    /// The stored row ends up active with `last_used` set to `now`.
    async fn upsert(
        &self,
        registration: &DeviceTokenRegistration,
        now: DateTime<Utc>,
    ) -> Result<(), DeviceTokenRepositoryError>;
}
