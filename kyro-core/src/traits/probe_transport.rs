//! Probe transport Trait

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use kyro_toolbox::{ToolboxError, ToolboxService};

use crate::types::ProbeMethod;

/// Performs one probe attempt.
///
/// Implementations need not apply a timeout; the prober races every attempt against
/// the configured one and drops the future when it expires.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Round-trip (or connect) time on success.
    async fn attempt(
        &self,
        method: ProbeMethod,
        address: IpAddr,
        port: u16,
    ) -> Result<Duration, ToolboxError>;
}

/// Real TCP connect / ICMP echo.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkTransport;

#[async_trait]
impl ProbeTransport for NetworkTransport {
    async fn attempt(
        &self,
        method: ProbeMethod,
        address: IpAddr,
        port: u16,
    ) -> Result<Duration, ToolboxError> {
        match method {
            ProbeMethod::Tcp => ToolboxService::tcp_ping(address, port).await,
            ProbeMethod::Icmp => ToolboxService::icmp_ping(address).await,
        }
    }
}
