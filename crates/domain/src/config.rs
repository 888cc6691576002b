mod blocking;
mod errors;
mod logging;
mod resolve;
mod root;
mod server;
mod upstream;

pub use blocking::BlockingConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolve::ResolveConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
