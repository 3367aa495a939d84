//! 配置文件加载与校验
//!
//! JSON keys accept both snake_case names and the PascalCase names of older
//! configuration files (`ApiToken`, `CheckInterval`, `UseICMPing`, ...).

use std::path::{Path, PathBuf};
use std::time::Duration;

use kyro_core::types::{
    DEFAULT_DOH_ENDPOINT, DEFAULT_NODE, DomainTarget, FailoverSettings, ProbeMethod,
    ProbeOverrides, ProbeSettings,
};
use serde::{Deserialize, Serialize};

/// File written next to the binary when the configuration cannot be loaded.
pub const EXAMPLE_FILE: &str = "config.example.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(alias = "ApiToken")]
    pub api_token: String,
    #[serde(alias = "Node")]
    pub node: String,
    #[serde(alias = "DoH")]
    pub doh: String,
    /// ms
    #[serde(alias = "CheckInterval")]
    pub check_interval: u64,
    /// ms
    #[serde(alias = "Timeout")]
    pub timeout: u64,
    #[serde(alias = "CheckPort")]
    pub check_port: u16,
    #[serde(alias = "Retries")]
    pub retries: u32,
    /// 0 = debug, 1 = info, 2 = warn, 3 = error
    #[serde(alias = "LogLevel")]
    pub log_level: u8,
    #[serde(alias = "UseICMPing")]
    pub use_icmp: bool,
    pub max_parallel_probes: usize,
    #[serde(alias = "Domains")]
    pub domains: Vec<DomainConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            node: DEFAULT_NODE.to_string(),
            doh: DEFAULT_DOH_ENDPOINT.to_string(),
            check_interval: 60_000,
            timeout: 1000,
            check_port: 80,
            retries: 4,
            log_level: 0,
            use_icmp: false,
            max_parallel_probes: 4,
            domains: Vec::new(),
        }
    }
}

/// One managed subdomain. Unset probe fields inherit the global values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    #[serde(alias = "SubDomain")]
    pub sub_domain: String,
    #[serde(alias = "HADomain", skip_serializing_if = "Option::is_none")]
    pub ha_domain: Option<String>,
    #[serde(alias = "ZoneId")]
    pub zone_id: String,
    #[serde(alias = "Timeout", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(alias = "CheckPort", skip_serializing_if = "Option::is_none")]
    pub check_port: Option<u16>,
    #[serde(alias = "Retries", skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    #[serde(alias = "UseICMPing", skip_serializing_if = "Option::is_none")]
    pub use_icmp: Option<bool>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Configuration written to [`EXAMPLE_FILE`].
    pub fn example() -> Self {
        Self {
            api_token: "your-api-token-here".to_string(),
            domains: vec![DomainConfig {
                sub_domain: "sub.example.com".to_string(),
                zone_id: "zoneid-here".to_string(),
                ..DomainConfig::default()
            }],
            ..Self::default()
        }
    }

    pub fn write_example(path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&Self::example()).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Node label is missing and should be looked up.
    pub fn needs_node_label(&self) -> bool {
        let node = self.node.trim();
        node.is_empty() || node == DEFAULT_NODE
    }

    /// Validate and convert into engine settings.
    ///
    /// Domains without a subdomain are skipped with a warning.
    pub fn into_settings(self) -> Result<FailoverSettings, ConfigError> {
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::Invalid("api_token is required".to_string()));
        }
        if self.check_interval == 0 {
            return Err(ConfigError::Invalid(
                "check_interval must be greater than 0".to_string(),
            ));
        }
        if self.timeout == 0 {
            return Err(ConfigError::Invalid("timeout must be greater than 0".to_string()));
        }
        if self.log_level > 3 {
            return Err(ConfigError::Invalid(format!(
                "log_level must be 0-3, got {}",
                self.log_level
            )));
        }

        if self.retries == 0 {
            tracing::warn!("retries is 0: no probe attempts, every candidate will be unhealthy");
        }

        let mut domains = Vec::with_capacity(self.domains.len());
        for domain in self.domains {
            let sub_domain = domain.sub_domain.trim();
            if sub_domain.is_empty() {
                tracing::warn!("Skipping domain entry without sub_domain");
                continue;
            }
            if domain.zone_id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "zone_id is required for {sub_domain}"
                )));
            }
            if domain.timeout == Some(0) {
                return Err(ConfigError::Invalid(format!(
                    "timeout must be greater than 0 for {sub_domain}"
                )));
            }

            let overrides = ProbeOverrides {
                timeout: domain.timeout.map(Duration::from_millis),
                port: domain.check_port,
                retries: domain.retries,
                method: domain.use_icmp.map(probe_method),
            };
            domains.push(
                DomainTarget::new(
                    sub_domain,
                    domain.ha_domain.as_deref(),
                    domain.zone_id.trim(),
                )
                .with_overrides(overrides),
            );
        }

        if domains.is_empty() {
            return Err(ConfigError::Invalid("no domains configured".to_string()));
        }

        Ok(FailoverSettings {
            node: self.node.trim().to_string(),
            doh_endpoint: self.doh.trim().to_string(),
            check_interval: Duration::from_millis(self.check_interval),
            probe: ProbeSettings {
                timeout: Duration::from_millis(self.timeout),
                port: self.check_port,
                retries: self.retries,
                method: probe_method(self.use_icmp),
            },
            max_parallel_probes: self.max_parallel_probes.max(1),
            domains,
        })
    }
}

fn probe_method(use_icmp: bool) -> ProbeMethod {
    if use_icmp {
        ProbeMethod::Icmp
    } else {
        ProbeMethod::Tcp
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn legacy_pascal_case_keys() {
        let config = AppConfig::parse(
            r#"{
                "ApiToken": "token",
                "Node": "HK",
                "DoH": "https://doh.example/dns-query",
                "CheckInterval": 30000,
                "Timeout": 500,
                "CheckPort": 443,
                "Retries": 2,
                "LogLevel": 1,
                "UseICMPing": true,
                "Domains": [
                    { "SubDomain": "www.example.com", "HADomain": "", "ZoneId": "z1", "CheckPort": 8080 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.api_token, "token");
        assert_eq!(config.check_interval, 30_000);
        assert_eq!(config.log_level, 1);
        assert!(config.use_icmp);
        assert_eq!(config.domains[0].check_port, Some(8080));

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.node, "HK");
        assert_eq!(settings.check_interval, Duration::from_secs(30));
        assert_eq!(settings.probe.method, ProbeMethod::Icmp);
        let target = &settings.domains[0];
        assert_eq!(target.failover_alias, "_ha.www.example.com");
        assert_eq!(settings.probe_settings_for(target).port, 8080);
        assert_eq!(settings.probe_settings_for(target).timeout, Duration::from_millis(500));
    }

    #[test]
    fn defaults_apply_for_missing_keys() {
        let config = AppConfig::parse(
            r#"{ "api_token": "t", "domains": [{ "sub_domain": "a.example.com", "zone_id": "z" }] }"#,
        )
        .unwrap();
        assert!(config.needs_node_label());

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.doh_endpoint, DEFAULT_DOH_ENDPOINT);
        assert_eq!(settings.check_interval, Duration::from_secs(60));
        assert_eq!(settings.probe, ProbeSettings::default());
        assert_eq!(settings.max_parallel_probes, 4);
    }

    #[test]
    fn missing_token_is_rejected() {
        let config = AppConfig::parse(
            r#"{ "domains": [{ "sub_domain": "a.example.com", "zone_id": "z" }] }"#,
        )
        .unwrap();
        assert!(matches!(config.into_settings(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn blank_subdomains_are_skipped() {
        let config = AppConfig {
            api_token: "t".to_string(),
            domains: vec![
                DomainConfig {
                    sub_domain: "  ".to_string(),
                    zone_id: "z".to_string(),
                    ..DomainConfig::default()
                },
                DomainConfig {
                    sub_domain: "b.example.com".to_string(),
                    zone_id: "z".to_string(),
                    ..DomainConfig::default()
                },
            ],
            ..AppConfig::default()
        };

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.domains.len(), 1);
        assert_eq!(settings.domains[0].subdomain, "b.example.com");
    }

    #[test]
    fn no_usable_domain_is_rejected() {
        let config = AppConfig {
            api_token: "t".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.into_settings(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let base = AppConfig::example();
        for config in [
            AppConfig { check_interval: 0, ..base.clone() },
            AppConfig { timeout: 0, ..base.clone() },
            AppConfig { log_level: 4, ..base.clone() },
        ] {
            assert!(matches!(config.into_settings(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            AppConfig::load(&dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn written_example_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXAMPLE_FILE);

        AppConfig::write_example(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::example());
    }

    #[test]
    fn example_is_loadable() {
        let json = serde_json::to_string_pretty(&AppConfig::example()).unwrap();
        let parsed = AppConfig::parse(&json).unwrap();
        assert_eq!(parsed, AppConfig::example());
        assert!(parsed.into_settings().is_ok());
    }
}
