#![allow(dead_code)]

use doh_proxy_application::ports::DohTransport;
use doh_proxy_application::services::{Forwarder, ResolutionPolicy, UpstreamPool};
use doh_proxy_application::use_cases::HandleDnsQueryUseCase;
use doh_proxy_domain::{Message, Question, RecordType, UpstreamEndpoint};
use doh_proxy_infrastructure::dns::DnsServerHandler;
use std::sync::Arc;

pub fn endpoint(url: &str) -> UpstreamEndpoint {
    url.parse().unwrap()
}

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    Message::query(id, Question::new(name, record_type))
        .encode()
        .unwrap()
}

/// Handler with one override (`example.test` -> 203.0.113.5), one blocked
/// name (`blocked.test`) and the given upstreams.
pub fn handler(upstreams: &[String], transport: Arc<dyn DohTransport>) -> DnsServerHandler {
    let policy = ResolutionPolicy::new(
        [("example.test".to_string(), "203.0.113.5".to_string())],
        ["blocked.test".to_string()],
        0,
    );
    let pool = UpstreamPool::new(upstreams.iter().map(|u| endpoint(u)).collect());
    let forwarder = Forwarder::new(Arc::new(pool), transport);
    DnsServerHandler::new(Arc::new(HandleDnsQueryUseCase::new(
        Arc::new(policy),
        Arc::new(forwarder),
    )))
}
