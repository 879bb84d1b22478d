//! Driven port for the external push provider.
use async_trait::async_trait;

use crate::domain::PushMessage;

use super::define_port_error;

define_port_error! {
    /// Delivery failures reported by push provider adapters.
    pub enum PushDeliveryError {
        /// Request could not be sent or the response never arrived.
        Transport { message: String } =>
            ServiceUnavailable: "push transport failed: {message}",
        /// Provider answered with a status other than 200.
        Status { status: u16, body: String } =>
            ServiceUnavailable: "push provider returned status {status}: {body}",
        /// Response body could not be read.
        Body { message: String } =>
            ServiceUnavailable: "push provider response unreadable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushNotificationSender: Send + Sync {
    /// Deliver one message. `Ok` means the provider answered 200.
    async fn send(&self, message: &PushMessage) -> Result<(), PushDeliveryError>;
}
