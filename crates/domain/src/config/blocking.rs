use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Exact names answered with NXDOMAIN.
    #[serde(default)]
    pub domains: Vec<String>,
}
