//! 故障转移配置类型

use std::time::Duration;

/// Default DoH endpoint
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.pub/dns-query";
/// Default node label
pub const DEFAULT_NODE: &str = "Unknown";

/// Reachability probe method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    /// TCP connect to the probe port
    #[default]
    Tcp,
    /// One ICMP echo request
    Icmp,
}

/// Effective probe parameters for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Per-attempt timeout
    pub timeout: Duration,
    /// TCP port (ignored for ICMP)
    pub port: u16,
    /// Total attempts per candidate; with `0` no candidate is ever healthy
    pub retries: u32,
    pub method: ProbeMethod,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(1000),
            port: 80,
            retries: 4,
            method: ProbeMethod::Tcp,
        }
    }
}

impl ProbeSettings {
    /// Apply per-domain overrides on top of these settings.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ProbeOverrides) -> Self {
        Self {
            timeout: overrides.timeout.unwrap_or(self.timeout),
            port: overrides.port.unwrap_or(self.port),
            retries: overrides.retries.unwrap_or(self.retries),
            method: overrides.method.unwrap_or(self.method),
        }
    }
}

/// Per-domain probe overrides. `None` falls back to the global value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeOverrides {
    pub timeout: Option<Duration>,
    pub port: Option<u16>,
    pub retries: Option<u32>,
    pub method: Option<ProbeMethod>,
}

/// A managed subdomain and where its candidates live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTarget {
    /// Fully qualified name of the managed record, e.g. `www.example.com`
    pub subdomain: String,
    /// Name holding the candidate records, e.g. `_ha.www.example.com`
    pub failover_alias: String,
    /// Provider zone id
    pub zone_id: String,
    pub overrides: ProbeOverrides,
}

impl DomainTarget {
    /// 创建目标；`failover_alias` 为空时默认为 `_ha.<subdomain>`
    pub fn new(
        subdomain: impl Into<String>,
        failover_alias: Option<&str>,
        zone_id: impl Into<String>,
    ) -> Self {
        let subdomain = subdomain.into();
        let failover_alias = match failover_alias.map(str::trim) {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => format!("_ha.{subdomain}"),
        };
        Self {
            subdomain,
            failover_alias,
            zone_id: zone_id.into(),
            overrides: ProbeOverrides::default(),
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: ProbeOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Immutable engine settings, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverSettings {
    /// Node label written into record annotations
    pub node: String,
    /// DoH endpoint used to resolve alias candidates
    pub doh_endpoint: String,
    /// Interval between passes
    pub check_interval: Duration,
    /// Global probe defaults
    pub probe: ProbeSettings,
    /// Upper bound on concurrently probed candidates of one domain; `1` is sequential
    pub max_parallel_probes: usize,
    pub domains: Vec<DomainTarget>,
}

impl Default for FailoverSettings {
    fn default() -> Self {
        Self {
            node: DEFAULT_NODE.to_string(),
            doh_endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            check_interval: Duration::from_secs(60),
            probe: ProbeSettings::default(),
            max_parallel_probes: 4,
            domains: Vec::new(),
        }
    }
}

impl FailoverSettings {
    /// Probe settings in effect for `target`.
    #[must_use]
    pub fn probe_settings_for(&self, target: &DomainTarget) -> ProbeSettings {
        self.probe.with_overrides(&target.overrides)
    }
}
