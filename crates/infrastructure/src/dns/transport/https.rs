//! DNS-over-HTTPS transport (RFC 8484)
//!
//! Sends DNS queries as HTTP POST requests with `application/dns-message` content type.
//! The request body is the raw DNS wire format message, and the response body
//! contains the raw DNS wire format response.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use doh_proxy_application::ports::DohTransport;
use doh_proxy_domain::{DomainError, UpstreamEndpoint};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Content type for DNS-over-HTTPS bodies (RFC 8484 §6)
const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Shared HTTP client for all upstreams; connections are pooled per host.
#[derive(Clone)]
pub struct HttpsTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpsTransport {
    /// `timeout` bounds each exchange, from connect to the last body byte.
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::IoError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn unavailable(endpoint: &UpstreamEndpoint, reason: impl ToString) -> DomainError {
    DomainError::UpstreamUnavailable {
        endpoint: endpoint.url().to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl DohTransport for HttpsTransport {
    async fn send(
        &self,
        endpoint: &UpstreamEndpoint,
        message_bytes: &[u8],
    ) -> Result<Bytes, DomainError> {
        debug!(
            url = %endpoint,
            message_len = message_bytes.len(),
            "Sending DoH query"
        );

        let response = self
            .client
            .post(endpoint.url())
            .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .body(message_bytes.to_vec())
            .send()
            .await
            .map_err(|e| unavailable(endpoint, e))?;

        // Only 200 carries a DNS message (RFC 8484 §4.2.1)
        let status = response.status();
        if status != StatusCode::OK {
            return Err(unavailable(
                endpoint,
                format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| unavailable(endpoint, format!("failed to read body: {}", e)))?;

        debug!(
            url = %endpoint,
            response_len = body.len(),
            "DoH response received"
        );

        Ok(body)
    }
}
