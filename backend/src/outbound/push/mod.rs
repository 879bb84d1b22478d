//! Push provider outbound adapters.
//!
//! A thin HTTP implementation of the `PushNotificationSender` port against a
//! OneSignal-compatible notifications endpoint.

mod dto;
mod http_sender;

pub use http_sender::{DEFAULT_PUSH_TIMEOUT, PushHttpIdentity, PushHttpSender};
