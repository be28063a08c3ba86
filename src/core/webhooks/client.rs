//! HTTP capability used by webhooks
//!
//! Webhooks only need "send a request, get a status back". Keeping this
//! behind a trait lets the host supply its own transport and lets tests count
//! requests without a network.

use super::error::WebhookError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

/// An outbound webhook request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub url: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl WebhookRequest {
    /// A JSON POST to `url`
    pub fn json(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            content_type: "application/json",
            body: body.into(),
        }
    }
}

/// Sends webhook requests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST the request and return the response status code.
    ///
    /// The response body is not read.
    async fn post(&self, request: WebhookRequest) -> Result<u16, WebhookError>;
}

/// [`HttpClient`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests are bounded by `timeout`.
    ///
    /// A zero timeout means no limit.
    pub fn with_timeout(timeout: Duration) -> Result<Self, WebhookError> {
        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout).connect_timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(&self, request: WebhookRequest) -> Result<u16, WebhookError> {
        let response = self
            .client
            .post(&request.url)
            .header(reqwest::header::CONTENT_TYPE, request.content_type)
            .body(request.body)
            .send()
            .await?;

        // Dropping the response releases the connection back to the pool.
        Ok(response.status().as_u16())
    }
}
