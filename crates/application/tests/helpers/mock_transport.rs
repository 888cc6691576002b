#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use doh_proxy_application::ports::DohTransport;
use doh_proxy_domain::{DomainError, UpstreamEndpoint};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted DoH upstreams keyed by URL. Unscripted URLs behave like an
/// unreachable server.
#[derive(Clone, Default)]
pub struct MockDohTransport {
    outcomes: Arc<Mutex<HashMap<String, Result<Bytes, DomainError>>>>,
    calls: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MockDohTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, body: &[u8]) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(Bytes::copy_from_slice(body)));
    }

    pub fn fail(&self, url: &str, reason: &str) {
        self.outcomes.lock().unwrap().insert(
            url.to_string(),
            Err(DomainError::UpstreamUnavailable {
                endpoint: url.to_string(),
                reason: reason.to_string(),
            }),
        );
    }

    /// URLs in the order they were contacted.
    pub fn called_urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl DohTransport for MockDohTransport {
    async fn send(
        &self,
        endpoint: &UpstreamEndpoint,
        message_bytes: &[u8],
    ) -> Result<Bytes, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.url().to_string(), message_bytes.to_vec()));

        match self.outcomes.lock().unwrap().get(endpoint.url()) {
            Some(outcome) => outcome.clone(),
            None => Err(DomainError::UpstreamUnavailable {
                endpoint: endpoint.url().to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}
