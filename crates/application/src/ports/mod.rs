mod doh_transport;

pub use doh_transport::DohTransport;
