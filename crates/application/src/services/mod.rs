mod forwarder;
mod resolution_policy;
mod upstream_pool;

pub use forwarder::Forwarder;
pub use resolution_policy::{PolicyDecision, ResolutionPolicy};
pub use upstream_pool::UpstreamPool;
