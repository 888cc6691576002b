mod builders;
mod mock_doh_server;

pub use builders::*;
pub use mock_doh_server::MockDohServer;
