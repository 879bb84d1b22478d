//! Credential-backed implementation of the login driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{CredentialRepository, LoginService};
use crate::domain::{
    CredentialMatch, Error, INVALID_CREDENTIALS, IssuedToken, LoginCredentials,
    SessionTokenService, verify_credentials,
};

/// Verifies credentials against the credential store, then issues a token.
#[derive(Clone)]
pub struct CredentialLoginService {
    credentials: Arc<dyn CredentialRepository>,
    tokens: SessionTokenService,
}

impl CredentialLoginService {
    /// Create the service from the credential store and token issuer.
    pub fn new(credentials: Arc<dyn CredentialRepository>, tokens: SessionTokenService) -> Self {
        Self {
            credentials,
            tokens,
        }
    }
}

#[async_trait]
impl LoginService for CredentialLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let stored = self
            .credentials
            .find_by_user_id(credentials.user_id())
            .await?;

        match verify_credentials(credentials, stored.as_ref()) {
            CredentialMatch::Matched(doctor) => {
                let issued = self.tokens.issue(credentials.user_id(), &doctor)?;
                info!(kd_dokter = %doctor.code, "doctor signed in");
                Ok(issued)
            }
            CredentialMatch::Rejected => {
                debug!("credential check rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}
