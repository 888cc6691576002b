use crate::ports::DohTransport;
use crate::services::UpstreamPool;
use bytes::Bytes;
use doh_proxy_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, error};

/// Sequential failover across the upstream pool.
pub struct Forwarder {
    pool: Arc<UpstreamPool>,
    transport: Arc<dyn DohTransport>,
}

impl Forwarder {
    pub fn new(pool: Arc<UpstreamPool>, transport: Arc<dyn DohTransport>) -> Self {
        Self { pool, transport }
    }

    /// Sends `query` to at most `pool.len()` upstreams, one after another,
    /// and returns the first 200 body untouched.
    pub async fn forward(&self, id: u16, query: &[u8]) -> Result<Bytes, DomainError> {
        let max_attempts = self.pool.len();

        for attempt in 1..=max_attempts {
            let upstream = self.pool.pick()?;
            debug!(id, attempt, max_attempts, upstream = %upstream, "Forwarding query");

            match self.transport.send(&upstream, query).await {
                Ok(body) => {
                    debug!(
                        id,
                        upstream = %upstream,
                        response_len = body.len(),
                        "Upstream answered"
                    );
                    return Ok(body);
                }
                Err(e) => {
                    error!(
                        id,
                        attempt,
                        max_attempts,
                        upstream = %upstream,
                        error = %e,
                        "Upstream attempt failed"
                    );
                }
            }
        }

        Err(DomainError::UpstreamExhausted {
            attempts: max_attempts,
        })
    }
}
