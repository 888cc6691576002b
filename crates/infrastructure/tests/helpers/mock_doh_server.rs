#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const DNS_MESSAGE: &str = "application/dns-message";

type Hits = Arc<AtomicUsize>;

/// Local HTTP server speaking just enough RFC 8484 for the tests.
///
/// * `/dns-query` echoes the query back with QR set, after checking the
///   DoH headers (415 / 406 otherwise)
/// * `/error` always answers 500
/// * `/slow` waits two seconds before answering
pub struct MockDohServer {
    addr: SocketAddr,
    hits: Hits,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits: Hits = Arc::new(AtomicUsize::new(0));

        let app = Router::new()
            .route("/dns-query", post(echo_query))
            .route("/error", post(server_error))
            .route("/slow", post(slow_query))
            .with_state(Arc::clone(&hits));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            hits,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn has_dns_message(headers: &HeaderMap, name: header::HeaderName) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == DNS_MESSAGE)
}

async fn echo_query(State(hits): State<Hits>, headers: HeaderMap, body: Bytes) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    if !has_dns_message(&headers, header::CONTENT_TYPE) {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }
    if !has_dns_message(&headers, header::ACCEPT) {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }

    let mut answer = body.to_vec();
    if answer.len() > 2 {
        answer[2] |= 0x80;
    }
    (StatusCode::OK, [(header::CONTENT_TYPE, DNS_MESSAGE)], answer).into_response()
}

async fn server_error(State(hits): State<Hits>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow_query(State(hits): State<Hits>, body: Bytes) -> Vec<u8> {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(2)).await;
    body.to_vec()
}
