//! Driving port for login.
//!
//! Inbound adapters call it to exchange credentials for a session token
//! without knowing how credentials are stored, which keeps HTTP handler
//! tests free of persistence.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue a session token.
    ///
    /// Every credential mismatch yields the same `unauthorized` error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;
}
