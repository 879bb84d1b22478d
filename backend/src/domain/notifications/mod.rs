//! Push notifications: queued clinical reminders and device registration.

mod device_tokens;
mod dispatcher;

pub use device_tokens::DeviceTokenService;
pub use dispatcher::{
    DispatchReport, NotificationDispatcher, NotificationDispatcherConfig,
    NotificationDispatcherPorts,
};

use super::DoctorCode;

/// Note stored on an entry the provider accepted.
pub const DELIVERED_NOTE: &str = "delivered to push provider";

/// Row of the pending-notification queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedNotification {
    pub id: i64,
    /// Recipient doctor code, used as the provider's external user id.
    pub doctor_code: String,
    pub title: String,
    pub body: String,
    /// Admission the notification is about.
    pub admission_no: String,
}

/// Provider-independent message handed to the push sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    pub recipient: String,
    pub title: String,
    pub body: String,
    pub admission_no: String,
}

impl From<&QueuedNotification> for PushMessage {
    fn from(value: &QueuedNotification) -> Self {
        Self {
            recipient: value.doctor_code.clone(),
            title: value.title.clone(),
            body: value.body.clone(),
            admission_no: value.admission_no.clone(),
        }
    }
}

/// Device token registration as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceTokenRequest {
    pub token: String,
    pub user_id: Option<String>,
    /// Owner doctor; the caller when absent.
    pub doctor_code: Option<String>,
    pub device_type: Option<String>,
    pub user_agent: Option<String>,
    pub platform: Option<String>,
}

/// Validated registration ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTokenRegistration {
    /// Non-empty provider token; unique across devices.
    pub token: String,
    pub user_id: Option<String>,
    pub doctor_code: DoctorCode,
    pub device_type: Option<String>,
    pub user_agent: Option<String>,
    pub platform: Option<String>,
}
