// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::future::Future;

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::error::PushError;
use crate::message::{PushMessage, PushReceipt, PushRequestBody};

/// Default push service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://onesignal.com/api/v1";

/// Default segment that broadcasts are addressed to.
pub const DEFAULT_SEGMENT: &str = "Subscribed Users";

/// Credentials and addressing for the push service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushConfig {
    pub app_id: String,
    pub api_key: String,
    /// Base URL of the service API, without a trailing slash.
    pub base_url: String,
    /// Segment targeted by broadcasts.
    pub segment: String,
}

impl PushConfig {
    /// Creates a configuration with the default endpoint and segment.
    #[must_use]
    pub fn new(app_id: String, api_key: String) -> Self {
        Self {
            app_id,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            segment: DEFAULT_SEGMENT.to_string(),
        }
    }

    /// Builds a configuration only when both credentials are present and
    /// non-blank.
    #[must_use]
    pub fn from_parts(
        app_id: Option<String>,
        api_key: Option<String>,
        base_url: &str,
        segment: &str,
    ) -> Option<Self> {
        let app_id: String = app_id.filter(|v| !v.trim().is_empty())?;
        let api_key: String = api_key.filter(|v| !v.trim().is_empty())?;
        Some(Self {
            app_id,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            segment: segment.to_string(),
        })
    }
}

/// A service that delivers push messages to devices.
///
/// Delivery is best effort. Callers persist the notification first and
/// treat relay failures as non-fatal.
pub trait PushRelay: Send + Sync {
    /// Relays one message.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The relay has no credentials
    /// - The network request fails
    /// - The push service rejects the request
    fn send(
        &self,
        message: &PushMessage,
    ) -> impl Future<Output = Result<PushReceipt, PushError>> + Send;
}

/// Relays messages to the push service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPushRelay {
    client: Client,
    config: PushConfig,
}

impl HttpPushRelay {
    /// Creates a relay for the given configuration.
    #[must_use]
    pub fn new(config: PushConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the relay configuration.
    #[must_use]
    pub const fn config(&self) -> &PushConfig {
        &self.config
    }
}

impl PushRelay for HttpPushRelay {
    async fn send(&self, message: &PushMessage) -> Result<PushReceipt, PushError> {
        let body: PushRequestBody<'_> =
            PushRequestBody::new(&self.config.app_id, &self.config.segment, message);

        debug!(title = %message.title, kind = %message.kind, "Relaying push message");

        let response = self
            .client
            .post(format!("{}/notifications", self.config.base_url))
            .header("Authorization", format!("Basic {}", self.config.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PushError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let receipt: PushReceipt = response
                    .json::<PushReceipt>()
                    .await
                    .map_err(|e| PushError::ResponseParseFailed(e.to_string()))?;
                info!(
                    push_id = ?receipt.id,
                    recipients = ?receipt.recipients,
                    "Push message relayed"
                );
                Ok(receipt)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PushError::Unauthorized),
            status => {
                let body: String = response.text().await.unwrap_or_default();
                Err(PushError::Rejected {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

/// A relay that never sends anything; used when push is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPushRelay;

impl PushRelay for DisabledPushRelay {
    async fn send(&self, message: &PushMessage) -> Result<PushReceipt, PushError> {
        debug!(title = %message.title, "Push disabled; message not relayed");
        Err(PushError::NotConfigured)
    }
}

/// The relay selected at startup.
#[derive(Debug, Clone)]
pub enum PushClient {
    Http(HttpPushRelay),
    Disabled(DisabledPushRelay),
}

impl PushClient {
    /// Selects the HTTP relay when configured, otherwise the disabled relay.
    #[must_use]
    pub fn from_config(config: Option<PushConfig>) -> Self {
        config.map_or(Self::Disabled(DisabledPushRelay), |c| {
            Self::Http(HttpPushRelay::new(c))
        })
    }

    /// Returns true if messages are actually relayed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl PushRelay for PushClient {
    async fn send(&self, message: &PushMessage) -> Result<PushReceipt, PushError> {
        match self {
            Self::Http(relay) => relay.send(message).await,
            Self::Disabled(relay) => relay.send(message).await,
        }
    }
}
