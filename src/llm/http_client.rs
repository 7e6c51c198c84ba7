use reqwest::Client;
use std::time::Duration;

/// Shared client for provider calls.
///
/// Only the connect phase is bounded here; the overall deadline belongs to
/// the caller (see `request.timeout_secs`).
pub fn build_provider_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .user_agent(concat!("bandcoach/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}
