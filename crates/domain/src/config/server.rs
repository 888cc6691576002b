use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// UDP listen address, `IP:PORT` (IPv6 in brackets).
    #[serde(default = "default_address")]
    pub address: String,

    /// Reader tasks sharing the socket. 0 means one per available CPU.
    #[serde(default)]
    pub workers: usize,
}

impl ServerConfig {
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            workers: 0,
        }
    }
}

fn default_address() -> String {
    "[::1]:53".to_string()
}
