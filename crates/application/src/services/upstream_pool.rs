use doh_proxy_domain::{DomainError, UpstreamEndpoint};
use std::sync::{Mutex, PoisonError};

/// Fixed list of DoH upstreams with a shared round-robin cursor.
///
/// The cursor is global: every pick from any request advances it, including
/// each failover attempt within a single request.
#[derive(Debug)]
pub struct UpstreamPool {
    endpoints: Vec<UpstreamEndpoint>,
    cursor: Mutex<usize>,
}

impl UpstreamPool {
    pub fn new(endpoints: Vec<UpstreamEndpoint>) -> Self {
        Self {
            endpoints,
            cursor: Mutex::new(0),
        }
    }

    /// Returns the endpoint under the cursor and advances it, wrapping.
    pub fn pick(&self) -> Result<UpstreamEndpoint, DomainError> {
        if self.endpoints.is_empty() {
            return Err(DomainError::NoUpstreams);
        }

        // The cursor is a bare index that is valid after every store.
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let endpoint = self.endpoints[*cursor].clone();
        *cursor = (*cursor + 1) % self.endpoints.len();
        Ok(endpoint)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Index the next `pick` will return.
    pub fn cursor(&self) -> usize {
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
