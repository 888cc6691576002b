use doh_proxy_application::services::{Forwarder, ResolutionPolicy, UpstreamPool};
use doh_proxy_application::use_cases::HandleDnsQueryUseCase;
use doh_proxy_domain::Config;
use doh_proxy_infrastructure::dns::{DnsServerHandler, HttpsTransport};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
    pub pool: Arc<UpstreamPool>,
    pub policy: Arc<ResolutionPolicy>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let pool = Arc::new(UpstreamPool::new(config.upstream_endpoints()?));
        let policy = Arc::new(ResolutionPolicy::from_config(config));

        let transport = Arc::new(HttpsTransport::new(Duration::from_secs(
            config.upstream.timeout_secs,
        ))?);
        let forwarder = Arc::new(Forwarder::new(Arc::clone(&pool), transport));

        let use_case = Arc::new(HandleDnsQueryUseCase::new(Arc::clone(&policy), forwarder));

        info!(
            upstreams = ?config.upstream.servers,
            timeout_secs = config.upstream.timeout_secs,
            "DNS services initialized"
        );

        Ok(Self {
            handler: DnsServerHandler::new(use_case),
            pool,
            policy,
        })
    }
}
