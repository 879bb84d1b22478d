//! Driving port for push device token registration.
use async_trait::async_trait;

use crate::domain::{DeviceTokenRequest, DoctorCode, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceTokenCommand: Send + Sync {
    /// Register or refresh a device token on behalf of `caller`.
    async fn register(&self, caller: &DoctorCode, request: DeviceTokenRequest)
    -> Result<(), Error>;
}
