use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Encoded message is {size} bytes, exceeding the {limit} byte limit")]
    EncodeOverflow { size: usize, limit: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No upstream servers configured")]
    NoUpstreams,

    #[error("Upstream {endpoint} unavailable: {reason}")]
    UpstreamUnavailable { endpoint: String, reason: String },

    #[error("All upstream servers failed after {attempts} attempts")]
    UpstreamExhausted { attempts: usize },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMessage(reason.into())
    }
}
