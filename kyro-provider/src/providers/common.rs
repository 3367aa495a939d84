//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::types::DnsRecordType;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client with connect and request timeouts.
///
/// If the TLS backend refuses the configured builder the stock client is used instead.
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}

/// Wire name → record type. Types the engine does not use map to `None`.
pub fn parse_record_type(record_type: &str) -> Option<DnsRecordType> {
    [DnsRecordType::A, DnsRecordType::Cname, DnsRecordType::Txt]
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(record_type))
}

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_types_parse_case_insensitive() {
        assert_eq!(parse_record_type("a"), Some(DnsRecordType::A));
        assert_eq!(parse_record_type("CNAME"), Some(DnsRecordType::Cname));
        assert_eq!(parse_record_type("Txt"), Some(DnsRecordType::Txt));
    }

    #[test]
    fn other_types_are_skipped() {
        for other in ["AAAA", "MX", "NS", "SRV", "CAA", "HTTPS"] {
            assert_eq!(parse_record_type(other), None, "{other}");
        }
    }

    #[test]
    fn normalize_strips_trailing_dot() {
        assert_eq!(normalize_domain_name("www.example.com."), "www.example.com");
        assert_eq!(normalize_domain_name("www.example.com"), "www.example.com");
    }
}
