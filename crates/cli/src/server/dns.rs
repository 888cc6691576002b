use doh_proxy_infrastructure::dns::{serve_udp, DnsServerHandler};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::info;

const SOCKET_BUFFER_SIZE: usize = 512 * 1024;

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: DnsServerHandler,
    num_workers: usize,
) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    info!(
        bind_address = %socket_addr,
        num_workers,
        "DNS proxy listening on UDP"
    );

    serve_udp(socket, handler, num_workers).await?;
    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
