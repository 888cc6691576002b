use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// DoH resolver URLs, tried round-robin.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Per-attempt HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec![
        "https://1.1.1.1/dns-query".to_string(),
        "https://1.0.0.1/dns-query".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    5
}
