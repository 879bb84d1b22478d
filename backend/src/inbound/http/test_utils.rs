//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::ports::{
    DeviceTokenCommand, DoctorProfileQuery, LoginService, MockDeviceTokenCommand,
    MockDoctorProfileQuery, MockLoginService, MockRosterQuery, RosterQuery,
};
use crate::domain::{DoctorCode, DoctorIdentity, SessionTokenService};
use crate::test_support::MutableClock;

use super::state::{HttpState, HttpStatePorts};

pub const TEST_SECRET: &str = "ward-rounds-test-secret";

/// 2026-02-27 09:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 27, 9, 0, 0)
        .single()
        .expect("valid fixed instant")
}

/// Doctor D01, the caller in most handler tests.
pub fn sari() -> DoctorIdentity {
    DoctorIdentity {
        code: DoctorCode::new("D01").expect("valid code"),
        name: "dr. Sari Wulandari, Sp.PD".to_owned(),
    }
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// HTTP state with mock ports and a token validator on a movable clock.
///
/// Ports default to mocks without expectations; any unexpected call panics.
pub struct TestHarness {
    pub clock: Arc<MutableClock>,
    pub sessions: SessionTokenService,
    ports: HttpStatePorts,
}

impl Default for TestHarness {
    fn default() -> Self {
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let sessions = SessionTokenService::new(TEST_SECRET, clock.clone());
        Self {
            clock,
            sessions,
            ports: HttpStatePorts {
                login: Arc::new(MockLoginService::new()),
                roster: Arc::new(MockRosterQuery::new()),
                profile: Arc::new(MockDoctorProfileQuery::new()),
                device_tokens: Arc::new(MockDeviceTokenCommand::new()),
            },
        }
    }
}

impl TestHarness {
    pub fn with_login(mut self, login: impl LoginService + 'static) -> Self {
        self.ports.login = Arc::new(login);
        self
    }

    pub fn with_roster(mut self, roster: impl RosterQuery + 'static) -> Self {
        self.ports.roster = Arc::new(roster);
        self
    }

    pub fn with_profile(mut self, profile: impl DoctorProfileQuery + 'static) -> Self {
        self.ports.profile = Arc::new(profile);
        self
    }

    pub fn with_device_tokens(mut self, tokens: impl DeviceTokenCommand + 'static) -> Self {
        self.ports.device_tokens = Arc::new(tokens);
        self
    }

    /// Issue a token for `doctor` at the harness clock's current instant.
    pub fn issue_token(&self, doctor: &DoctorIdentity) -> String {
        self.sessions
            .issue(doctor.code.as_str(), doctor)
            .expect("token issues")
            .token
    }

    /// Handler state signed with the harness session key.
    pub fn state(&self) -> HttpState {
        HttpState::new(self.ports.clone(), self.sessions.clone())
    }

    /// Application with the harness state registered.
    pub fn app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new().app_data(web::Data::new(self.state()))
    }
}
