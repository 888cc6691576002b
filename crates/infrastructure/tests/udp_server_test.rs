mod helpers;

use doh_proxy_domain::{Message, RecordType, ResponseCode};
use doh_proxy_infrastructure::dns::{serve_udp, DnsServerHandler, HttpsTransport};
use helpers::{handler, query_bytes, MockDohServer};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

const REPLY_TIMEOUT: Duration = Duration::from_secs(3);

async fn start_proxy(handler: DnsServerHandler, workers: usize) -> (SocketAddr, JoinHandle<()>) {
    let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
    let addr = socket.local_addr().unwrap();
    let task = tokio::spawn(async move {
        let _ = serve_udp(socket, handler, workers).await;
    });
    (addr, task)
}

fn transport() -> Arc<HttpsTransport> {
    Arc::new(HttpsTransport::new(Duration::from_secs(2)).unwrap())
}

async fn exchange(proxy: SocketAddr, query: &[u8]) -> Option<Vec<u8>> {
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.send_to(query, proxy).await.unwrap();

    let mut buf = [0u8; 4096];
    match tokio::time::timeout(REPLY_TIMEOUT, client.recv_from(&mut buf)).await {
        Ok(Ok((n, from))) => {
            assert_eq!(from, proxy);
            Some(buf[..n].to_vec())
        }
        _ => None,
    }
}

#[tokio::test]
async fn test_override_answered_over_udp() {
    let (proxy, task) = start_proxy(handler(&[], transport()), 2).await;

    let reply = exchange(proxy, &query_bytes(0x0101, "example.test", RecordType::A))
        .await
        .expect("override reply");

    let response = Message::decode(&reply).unwrap();
    assert_eq!(response.id(), 0x0101);
    assert_eq!(response.answers.len(), 1);
    assert_eq!(
        response.answers[0].ip_addr(),
        Some("203.0.113.5".parse::<IpAddr>().unwrap())
    );
    task.abort();
}

#[tokio::test]
async fn test_blocked_answered_with_nxdomain() {
    let (proxy, task) = start_proxy(handler(&[], transport()), 1).await;

    let reply = exchange(proxy, &query_bytes(0x0202, "blocked.test", RecordType::AAAA))
        .await
        .expect("blocked reply");

    let response = Message::decode(&reply).unwrap();
    assert_eq!(response.id(), 0x0202);
    assert_eq!(response.header.response_code, ResponseCode::NxDomain);
    task.abort();
}

#[tokio::test]
async fn test_forwarded_through_doh_upstream() {
    let upstream = MockDohServer::start().await;
    let upstreams = vec![upstream.url("/dns-query")];
    let (proxy, task) = start_proxy(handler(&upstreams, transport()), 1).await;
    let query = query_bytes(0x0303, "www.example.org", RecordType::A);

    let reply = exchange(proxy, &query).await.expect("forwarded reply");

    let mut expected = query.clone();
    expected[2] |= 0x80;
    assert_eq!(reply, expected);
    assert_eq!(upstream.hits(), 1);
    task.abort();
}

#[tokio::test]
async fn test_failover_to_healthy_upstream() {
    let upstream = MockDohServer::start().await;
    let upstreams = vec![upstream.url("/error"), upstream.url("/dns-query")];
    let (proxy, task) = start_proxy(handler(&upstreams, transport()), 1).await;

    let reply = exchange(proxy, &query_bytes(0x0404, "www.example.org", RecordType::A))
        .await
        .expect("reply after failover");

    assert_eq!(Message::decode(&reply).unwrap().id(), 0x0404);
    assert_eq!(upstream.hits(), 2);
    task.abort();
}

#[tokio::test]
async fn test_malformed_datagram_gets_no_reply() {
    let (proxy, task) = start_proxy(handler(&[], transport()), 1).await;

    assert!(exchange(proxy, &[0xde, 0xad, 0xbe]).await.is_none());

    // the listener is still serving afterwards
    assert!(exchange(proxy, &query_bytes(5, "example.test", RecordType::A))
        .await
        .is_some());
    task.abort();
}

#[tokio::test]
async fn test_exhausted_upstreams_get_no_reply() {
    let upstream = MockDohServer::start().await;
    let upstreams = vec![upstream.url("/error")];
    let (proxy, task) = start_proxy(handler(&upstreams, transport()), 1).await;

    assert!(exchange(proxy, &query_bytes(6, "www.example.org", RecordType::A))
        .await
        .is_none());
    assert_eq!(upstream.hits(), 1);
    task.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_get_their_own_answers() {
    let (proxy, task) = start_proxy(handler(&[], transport()), 4).await;

    let mut clients = tokio::task::JoinSet::new();
    for id in 0..32u16 {
        clients.spawn(async move {
            let reply = exchange(proxy, &query_bytes(id, "example.test", RecordType::A))
                .await
                .expect("reply");
            (id, Message::decode(&reply).unwrap().id())
        });
    }

    while let Some(result) = clients.join_next().await {
        let (sent, received) = result.unwrap();
        assert_eq!(sent, received);
    }
    task.abort();
}
