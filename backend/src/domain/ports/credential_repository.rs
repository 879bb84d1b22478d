//! Driven port for reading stored login credentials.
use async_trait::async_trait;

use crate::domain::StoredCredential;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            ServiceUnavailable: "credential store connection failed: {message}",
        /// Lookup failed during execution or row decoding.
        Query { message: String } =>
            InternalError: "credential lookup failed: {message}",
    }
}

/// Port for looking up credentials by login identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find the decrypted credential row for `user_id`, joined with its
    /// doctor.
    ///
    /// Returns `Ok(None)` when no credential matches or the identifier has no
    /// doctor record.
    async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<StoredCredential>, CredentialRepositoryError>;
}
