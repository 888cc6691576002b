use clap::Parser;
use doh_proxy_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "doh-proxy")]
#[command(version)]
#[command(about = "DNS-over-HTTPS forwarding proxy with local overrides and blocking")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", env = "DOH_PROXY_CONFIG")]
    config: Option<String>,

    /// UDP listen address (IP:PORT)
    #[arg(short = 'a', long, env = "DOH_PROXY_ADDRESS")]
    address: Option<String>,

    /// Upstream DoH URLs, comma-separated or repeated
    #[arg(
        short = 'u',
        long,
        value_name = "URL",
        value_delimiter = ',',
        env = "DOH_PROXY_UPSTREAMS"
    )]
    upstreams: Option<Vec<String>>,

    /// Domains answered with NXDOMAIN, comma-separated or repeated
    #[arg(
        long,
        value_name = "DOMAIN",
        value_delimiter = ',',
        env = "DOH_PROXY_BLOCKLIST"
    )]
    blocklist: Option<Vec<String>>,

    /// Static answer, NAME=IP; may be repeated
    #[arg(
        long,
        value_name = "NAME=IP",
        value_parser = parse_resolve,
        value_delimiter = ',',
        env = "DOH_PROXY_RESOLVE"
    )]
    resolve: Vec<(String, String)>,

    /// UDP reader tasks (0 = one per CPU)
    #[arg(long, env = "DOH_PROXY_WORKERS")]
    workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "DOH_PROXY_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            address: self.address.clone(),
            workers: self.workers,
            upstreams: self.upstreams.clone(),
            blocklist: self.blocklist.clone(),
            resolve: self.resolve.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn parse_resolve(value: &str) -> Result<(String, String), String> {
    let (name, ip) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=IP, got '{}'", value))?;
    let (name, ip) = (name.trim(), ip.trim());
    if name.is_empty() || ip.is_empty() {
        return Err(format!("expected NAME=IP, got '{}'", value));
    }
    Ok((name.to_string(), ip.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config.logging.level);

    info!("Starting DoH proxy v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::report_config(&config, cli.config.as_deref());

    let listen_addr = config.listen_addr()?;
    let workers = config.server.worker_count();

    let dns_services = di::DnsServices::new(&config)?;

    info!(
        address = %listen_addr,
        workers,
        upstreams = dns_services.pool.len(),
        overrides = dns_services.policy.override_count(),
        blocked = dns_services.policy.blocked_count(),
        "Starting DNS proxy"
    );

    server::start_dns_server(listen_addr, dns_services.handler, workers).await?;

    info!("DNS proxy stopped");
    Ok(())
}
