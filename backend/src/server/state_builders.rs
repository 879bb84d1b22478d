//! Builders wiring Diesel adapters and the push sender into domain services.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;
use zeroize::Zeroizing;

use ward_rounds::config::{SettingsError, WardSettings};
use ward_rounds::domain::{
    CredentialLoginService, DeviceTokenService, DoctorProfileService, NotificationDispatcher,
    NotificationDispatcherConfig, NotificationDispatcherPorts, RosterService, SessionTokenService,
};
use ward_rounds::inbound::http::state::{HttpState, HttpStatePorts};
use ward_rounds::outbound::persistence::{
    CredentialKeys, DbPool, DieselAdmissionRepository, DieselCredentialRepository,
    DieselDeviceTokenRepository, DieselDoctorRepository, DieselNotificationQueueRepository,
    PoolError,
};
use ward_rounds::outbound::push::{DEFAULT_PUSH_TIMEOUT, PushHttpIdentity, PushHttpSender};

/// Problems that stop the service from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("database pool: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to build push client: {0}")]
    PushClient(#[from] reqwest::Error),
}

/// Build the HTTP state from a connected pool and loaded settings.
///
/// # Errors
///
/// Returns [`StartupError::Settings`] when the session secret is missing.
pub fn build_http_state(
    pool: &DbPool,
    settings: &WardSettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, StartupError> {
    let sessions = SessionTokenService::new(settings.jwt_secret()?, clock.clone());
    let keys = CredentialKeys::new(
        settings.credential_id_key(),
        settings.credential_password_key(),
    );
    let credentials = Arc::new(DieselCredentialRepository::new(pool.clone(), keys));
    let doctors = Arc::new(DieselDoctorRepository::new(pool.clone()));
    let admissions = Arc::new(DieselAdmissionRepository::new(pool.clone()));
    let device_tokens = Arc::new(DieselDeviceTokenRepository::new(pool.clone()));

    let ports = HttpStatePorts {
        login: Arc::new(CredentialLoginService::new(credentials, sessions.clone())),
        roster: Arc::new(RosterService::new(admissions, doctors.clone(), clock.clone())),
        profile: Arc::new(DoctorProfileService::new(doctors)),
        device_tokens: Arc::new(DeviceTokenService::new(device_tokens, clock)),
    };
    Ok(HttpState::new(ports, sessions))
}

/// Build the notification dispatcher, or `None` when push credentials are
/// not configured.
///
/// # Errors
///
/// Returns an error when push URLs are invalid or the HTTP client cannot be
/// built.
pub fn build_dispatcher(
    pool: &DbPool,
    settings: &WardSettings,
    clock: Arc<dyn Clock>,
) -> Result<Option<NotificationDispatcher>, StartupError> {
    let Some(push) = settings.push()? else {
        warn!("push credentials not configured; notification dispatch disabled");
        return Ok(None);
    };
    let sender = PushHttpSender::new(
        push.endpoint,
        DEFAULT_PUSH_TIMEOUT,
        PushHttpIdentity {
            app_id: push.app_id,
            api_key: Zeroizing::new(push.api_key),
            frontend: push.frontend,
        },
    )?;
    let ports = NotificationDispatcherPorts {
        queue: Arc::new(DieselNotificationQueueRepository::new(pool.clone())),
        sender: Arc::new(sender),
    };
    let config = NotificationDispatcherConfig {
        interval: settings.dispatch_interval(),
        batch_size: settings.dispatch_batch_size(),
    };
    Ok(Some(NotificationDispatcher::new(ports, clock, config)))
}

/// Wall clock used outside tests.
pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(DefaultClock)
}
