//! Device token registration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::{DeviceTokenRegistration, DeviceTokenRequest};
use crate::domain::ports::{DeviceTokenCommand, DeviceTokenRepository};
use crate::domain::{DoctorCode, Error};

/// Validates registrations and upserts them through the token repository.
#[derive(Clone)]
pub struct DeviceTokenService {
    tokens: Arc<dyn DeviceTokenRepository>,
    clock: Arc<dyn Clock>,
}

impl DeviceTokenService {
    /// Create the service. Registrations are stamped with `clock` time.
    pub fn new(tokens: Arc<dyn DeviceTokenRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { tokens, clock }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn registration(
    caller: &DoctorCode,
    request: DeviceTokenRequest,
) -> Result<DeviceTokenRegistration, Error> {
    let token = request.token.trim();
    if token.is_empty() {
        return Err(Error::invalid_request("token must not be empty")
            .with_details(json!({ "field": "token" })));
    }
    // A token always belongs to the authenticated doctor; `kd_dokter` may only restate it.
    if let Some(code) = non_blank(request.doctor_code) {
        let claimed = DoctorCode::new(code).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "kd_dokter" }))
        })?;
        if &claimed != caller {
            return Err(
                Error::invalid_request("kd_dokter must match the authenticated doctor")
                    .with_details(json!({ "field": "kd_dokter" })),
            );
        }
    }
    let doctor_code = caller.clone();
    Ok(DeviceTokenRegistration {
        token: token.to_owned(),
        user_id: non_blank(request.user_id),
        doctor_code,
        device_type: non_blank(request.device_type),
        user_agent: non_blank(request.user_agent),
        platform: non_blank(request.platform),
    })
}

#[async_trait]
impl DeviceTokenCommand for DeviceTokenService {
    async fn register(&self, caller: &DoctorCode, request: DeviceTokenRequest) -> Result<(), Error> {
        let registration = registration(caller, request)?;
        self.tokens.upsert(&registration, self.clock.utc()).await?;
        info!(
            kd_dokter = %registration.doctor_code,
            platform = registration.platform.as_deref().unwrap_or("unknown"),
            "device token registered"
        );
        Ok(())
    }
}
