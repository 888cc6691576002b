pub mod server;
pub mod transport;

pub use server::{serve_udp, DnsServerHandler};
pub use transport::HttpsTransport;
