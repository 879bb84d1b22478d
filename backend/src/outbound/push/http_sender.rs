//! Reqwest-backed push provider adapter.
//!
//! This adapter owns transport details only: payload serialisation, timeout,
//! authorisation and HTTP status mapping. Only a 200 answer counts as
//! delivered.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::PushPayloadDto;
use crate::domain::PushMessage;
use crate::domain::ports::{PushDeliveryError, PushNotificationSender};

/// Default request timeout for provider calls.
pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider credentials and the frontend the notifications link back to.
pub struct PushHttpIdentity {
    /// Provider application id.
    pub app_id: String,
    /// REST API key, sent as `Authorization: Basic <key>`.
    pub api_key: Zeroizing<String>,
    /// Base URL of the ward-rounds frontend.
    pub frontend: Url,
}

/// Push sender that performs HTTP POST requests against one endpoint.
pub struct PushHttpSender {
    client: Client,
    endpoint: Url,
    identity: PushHttpIdentity,
}

impl PushHttpSender {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        identity: PushHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint, identity))
    }

    fn with_client(client: Client, endpoint: Url, identity: PushHttpIdentity) -> Self {
        Self {
            client,
            endpoint,
            identity,
        }
    }
}

#[async_trait]
impl PushNotificationSender for PushHttpSender {
    async fn send(&self, message: &PushMessage) -> Result<(), PushDeliveryError> {
        let payload =
            PushPayloadDto::from_message(&self.identity.app_id, &self.identity.frontend, message);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", self.identity.api_key.as_str()),
            )
            .json(&payload)
            .send()
            .await
            .map_err(|error| PushDeliveryError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| PushDeliveryError::body(error.to_string()))?;
        if status != StatusCode::OK {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PushDeliveryError {
    PushDeliveryError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
