//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::SessionTokenService;
use crate::domain::ports::{DeviceTokenCommand, DoctorProfileQuery, LoginService, RosterQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub roster: Arc<dyn RosterQuery>,
    pub profile: Arc<dyn DoctorProfileQuery>,
    pub device_tokens: Arc<dyn DeviceTokenCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub roster: Arc<dyn RosterQuery>,
    pub profile: Arc<dyn DoctorProfileQuery>,
    pub device_tokens: Arc<dyn DeviceTokenCommand>,
    /// Validates bearer tokens on protected routes.
    pub sessions: SessionTokenService,
}

impl HttpState {
    /// Construct state from the ports bundle and the token validator.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use ward_rounds::domain::{
    ///     CredentialLoginService, DeviceTokenService, DoctorProfileService, RosterService,
    ///     SessionTokenService,
    /// };
    /// use ward_rounds::inbound::http::state::{HttpState, HttpStatePorts};
    /// # fn build(
    /// #     login: CredentialLoginService,
    /// #     roster: RosterService,
    /// #     profile: DoctorProfileService,
    /// #     device_tokens: DeviceTokenService,
    /// #     sessions: SessionTokenService,
    /// # ) -> HttpState {
    /// let ports = HttpStatePorts {
    ///     login: Arc::new(login),
    ///     roster: Arc::new(roster),
    ///     profile: Arc::new(profile),
    ///     device_tokens: Arc::new(device_tokens),
    /// };
    /// HttpState::new(ports, sessions)
    /// # }
    /// ```
    pub fn new(ports: HttpStatePorts, sessions: SessionTokenService) -> Self {
        let HttpStatePorts {
            login,
            roster,
            profile,
            device_tokens,
        } = ports;
        Self {
            login,
            roster,
            profile,
            device_tokens,
            sessions,
        }
    }
}
