use async_trait::async_trait;
use bytes::Bytes;
use doh_proxy_domain::{DomainError, UpstreamEndpoint};

/// One DNS-over-HTTPS exchange with a single upstream.
#[async_trait]
pub trait DohTransport: Send + Sync {
    /// POSTs `message_bytes` to `endpoint` and returns the raw response body.
    ///
    /// Network failures, timeouts and non-200 statuses are all reported as
    /// `DomainError::UpstreamUnavailable`.
    async fn send(
        &self,
        endpoint: &UpstreamEndpoint,
        message_bytes: &[u8],
    ) -> Result<Bytes, DomainError>;
}
