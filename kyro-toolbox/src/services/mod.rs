//! Stateless service façade exposing all toolbox operations.
//!
//! Every method on [`ToolboxService`] is an async associated function; no instance is needed.

mod doh;
mod geo;
mod ping;
mod resolver;

use std::net::IpAddr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::{ToolboxError, ToolboxResult};

/// Upper bound for each resolution stage (DoH, then system resolver).
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);
/// Request timeout of the shared HTTP client.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP client for DoH and geo-IP calls.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build configured HTTP client, using defaults: {e}");
            reqwest::Client::new()
        })
});

/// Validate and normalise a hostname input: trims whitespace and a trailing dot.
fn validate_host(host: &str) -> ToolboxResult<String> {
    let host = host.trim().trim_end_matches('.');
    if host.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Host name is required".to_string(),
        ));
    }
    if host.chars().any(char::is_whitespace) {
        return Err(ToolboxError::ValidationError(format!(
            "Invalid host name: {host}"
        )));
    }
    Ok(host.to_string())
}

/// Entry point for all network helper operations.
///
/// ```rust,no_run
/// use kyro_toolbox::ToolboxService;
/// # async fn demo() -> kyro_toolbox::ToolboxResult<()> {
/// let addrs = ToolboxService::resolve_host("https://dns.pub/dns-query", "example.com").await?;
/// # Ok(())
/// # }
/// ```
pub struct ToolboxService;

impl ToolboxService {
    /// Resolve a hostname to its addresses.
    ///
    /// Queries the DoH endpoint first. Any failure of that stage (network, HTTP status,
    /// malformed JSON, missing `Answer`, timeout) falls back to the system resolver.
    /// Each stage is bounded by its own timeout. A DoH answer without A records is
    /// returned as an empty list, not retried through the fallback.
    pub async fn resolve_host(doh_endpoint: &str, host: &str) -> ToolboxResult<Vec<IpAddr>> {
        let host = validate_host(host)?;

        match tokio::time::timeout(
            RESOLVE_TIMEOUT,
            doh::doh_lookup(&HTTP_CLIENT, doh_endpoint, &host),
        )
        .await
        {
            Ok(Ok(addrs)) => return Ok(addrs.into_iter().map(IpAddr::V4).collect()),
            Ok(Err(e)) => log::warn!("{e}; falling back to system resolver for {host}"),
            Err(_) => log::warn!("DoH lookup for {host} timed out; falling back to system resolver"),
        }

        Self::system_lookup(&host).await
    }

    /// Resolve a hostname with the host's system resolver only.
    pub async fn system_lookup(host: &str) -> ToolboxResult<Vec<IpAddr>> {
        let host = validate_host(host)?;
        tokio::time::timeout(RESOLVE_TIMEOUT, resolver::system_lookup(&host))
            .await
            .map_err(|_| ToolboxError::Timeout(format!("System lookup for {host} timed out")))?
    }

    /// Open (and immediately close) a TCP connection. Unbounded; race it against a timeout.
    pub async fn tcp_ping(addr: IpAddr, port: u16) -> ToolboxResult<Duration> {
        ping::tcp_ping(addr, port).await
    }

    /// Send a single ICMP echo. Unbounded; race it against a timeout.
    pub async fn icmp_ping(addr: IpAddr) -> ToolboxResult<Duration> {
        ping::icmp_ping(addr).await
    }

    /// Describe where this host sits: `country_code,region_code,city,asn`.
    ///
    /// Tries `api.ip.sb` first and `myip.mili.one` second.
    pub async fn geo_label() -> ToolboxResult<String> {
        geo::geo_label(&HTTP_CLIENT, &geo::GEO_ENDPOINTS).await
    }
}
