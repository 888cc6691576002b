use crate::services::{Forwarder, PolicyDecision, ResolutionPolicy};
use bytes::Bytes;
use doh_proxy_domain::{DomainError, Message};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Override,
    Blocked,
    Upstream,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Override => "override",
            AnswerSource::Blocked => "blocked",
            AnswerSource::Upstream => "upstream",
        }
    }
}

/// Wire bytes ready to be sent back to the client.
#[derive(Debug, Clone)]
pub struct DnsAnswer {
    pub bytes: Bytes,
    pub source: AnswerSource,
}

pub struct HandleDnsQueryUseCase {
    policy: Arc<ResolutionPolicy>,
    forwarder: Arc<Forwarder>,
}

impl HandleDnsQueryUseCase {
    pub fn new(policy: Arc<ResolutionPolicy>, forwarder: Arc<Forwarder>) -> Self {
        Self { policy, forwarder }
    }

    /// Runs one datagram through the pipeline.
    ///
    /// Returns `None` whenever no reply must be sent: the query did not decode,
    /// or answering it failed. Every failure is logged here and goes no further.
    pub async fn execute(&self, query_bytes: &[u8], client: SocketAddr) -> Option<DnsAnswer> {
        let query = match Message::decode(query_bytes) {
            Ok(query) => query,
            Err(e) => {
                warn!(client = %client, len = query_bytes.len(), error = %e, "Dropping malformed query");
                return None;
            }
        };

        let (domain, record_type) = match query.first_question() {
            Some(q) => (q.name.to_string(), q.record_type.to_string()),
            None => (String::new(), String::from("-")),
        };
        debug!(id = query.id(), domain = %domain, record_type = %record_type, client = %client, "Query received");

        match self.answer(&query, query_bytes).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                error!(
                    id = query.id(),
                    domain = %domain,
                    record_type = %record_type,
                    client = %client,
                    error = %e,
                    "Query failed"
                );
                None
            }
        }
    }

    /// Policy decision then synthesis or forwarding. Forwarded answers are the
    /// upstream body verbatim; only local answers go through the encoder.
    pub async fn answer(&self, query: &Message, raw: &[u8]) -> Result<DnsAnswer, DomainError> {
        match self.policy.decide(query)? {
            PolicyDecision::Override(response) => {
                debug!(id = query.id(), answers = response.answers.len(), "Answered from override");
                Ok(DnsAnswer {
                    bytes: Bytes::from(response.encode()?),
                    source: AnswerSource::Override,
                })
            }
            PolicyDecision::Blocked(response) => {
                if let Some(question) = query.first_question() {
                    warn!(id = query.id(), domain = %question.name, "Blocked query");
                }
                Ok(DnsAnswer {
                    bytes: Bytes::from(response.encode()?),
                    source: AnswerSource::Blocked,
                })
            }
            PolicyDecision::Forward => {
                let bytes = self.forwarder.forward(query.id(), raw).await?;
                Ok(DnsAnswer {
                    bytes,
                    source: AnswerSource::Upstream,
                })
            }
        }
    }
}
