//! DoH proxy domain layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod upstream;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{Header, Message, Name, Question, MAX_UDP_MESSAGE_SIZE};
pub use dns_record::{RecordType, ResourceRecord, ResponseCode, CLASS_IN};
pub use errors::DomainError;
pub use upstream::UpstreamEndpoint;
