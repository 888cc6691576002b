#![allow(dead_code)]

use doh_proxy_application::services::UpstreamPool;
use doh_proxy_domain::{Message, Question, RecordType, UpstreamEndpoint};
use std::net::SocketAddr;

pub const UPSTREAM_A: &str = "https://a.doh.test/dns-query";
pub const UPSTREAM_B: &str = "https://b.doh.test/dns-query";
pub const UPSTREAM_C: &str = "https://c.doh.test/dns-query";

pub fn client() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

pub fn endpoints(urls: &[&str]) -> Vec<UpstreamEndpoint> {
    urls.iter().map(|u| u.parse().unwrap()).collect()
}

pub fn pool(urls: &[&str]) -> UpstreamPool {
    UpstreamPool::new(endpoints(urls))
}

pub fn query(id: u16, name: &str, record_type: RecordType) -> Message {
    Message::query(id, Question::new(name, record_type))
}

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    query(id, name, record_type).encode().unwrap()
}
