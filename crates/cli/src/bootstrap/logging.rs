use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `level` is the default directive; `RUST_LOG` refines it.
pub fn init_logging(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_ansi(!cfg!(windows))
        .init();
}
