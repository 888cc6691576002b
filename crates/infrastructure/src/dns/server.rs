//! UDP front end.
//!
//! Several reader tasks share one bound socket; every datagram read is handed
//! to its own spawned task so a slow upstream never holds up the readers.

use doh_proxy_application::use_cases::HandleDnsQueryUseCase;
use doh_proxy_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Large enough for EDNS(0) clients advertising a 4096-byte payload.
pub const RECV_BUFFER_SIZE: usize = 4096;

#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Answers one datagram. Nothing is sent when the use case yields no answer.
    pub async fn handle_datagram(&self, socket: &UdpSocket, query: &[u8], from: SocketAddr) {
        let Some(answer) = self.use_case.execute(query, from).await else {
            return;
        };

        match socket.send_to(&answer.bytes, from).await {
            Ok(sent) => debug!(
                client = %from,
                len = sent,
                source = answer.source.as_str(),
                "Reply sent"
            ),
            Err(e) => error!(client = %from, error = %e, "Failed to send reply"),
        }
    }
}

/// Runs `workers` reader tasks on `socket` until the socket becomes unusable.
pub async fn serve_udp(
    socket: Arc<UdpSocket>,
    handler: DnsServerHandler,
    workers: usize,
) -> Result<(), DomainError> {
    let workers = workers.max(1);
    let mut join_set = JoinSet::new();

    for worker_id in 0..workers {
        join_set.spawn(run_udp_worker(
            Arc::clone(&socket),
            handler.clone(),
            worker_id,
        ));
    }

    info!(workers, "UDP workers started");

    // Workers only return on a fatal socket error; the others are aborted
    // when the set is dropped.
    match join_set.join_next().await {
        Some(Ok(e)) => Err(DomainError::IoError(e.to_string())),
        Some(Err(e)) => Err(DomainError::IoError(format!("UDP worker failed: {}", e))),
        None => Ok(()),
    }
}

async fn run_udp_worker(
    socket: Arc<UdpSocket>,
    handler: DnsServerHandler,
    worker_id: usize,
) -> io::Error {
    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        match socket.recv_from(&mut recv_buf).await {
            Ok((n, from)) => {
                let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                let handler = handler.clone();
                let socket = Arc::clone(&socket);
                tokio::spawn(async move {
                    handler.handle_datagram(&socket, &owned_buf, from).await;
                });
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if is_fatal(&e) => {
                error!(worker = worker_id, error = %e, "UDP socket closed, stopping worker");
                return e;
            }
            Err(e) => {
                error!(worker = worker_id, error = %e, "UDP recv error");
            }
        }
    }
}

/// Errors after which the socket can never deliver another datagram.
fn is_fatal(e: &io::Error) -> bool {
    if matches!(
        e.kind(),
        io::ErrorKind::NotConnected | io::ErrorKind::BrokenPipe
    ) {
        return true;
    }
    #[cfg(unix)]
    if e.raw_os_error() == Some(libc::EBADF) {
        return true;
    }
    false
}
