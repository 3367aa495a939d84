//! Provider 数据类型
//!
//! Only the three record types the failover engine touches are modelled: `A` and
//! `CNAME` for published records, `TXT` for pointer candidates. Anything else a zone
//! holds is dropped while listing.

use serde::{Deserialize, Serialize};

/// 记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    Cname,
    Txt,
}

impl DnsRecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-assigned id, needed for deletion
    pub id: String,
    pub zone_id: String,
    /// FQDN without the trailing dot
    pub name: String,
    pub record_type: DnsRecordType,
    /// IPv4 literal, target host or TXT payload
    pub value: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// 新建记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordRequest {
    pub zone_id: String,
    pub name: String,
    pub record_type: DnsRecordType,
    pub value: String,
    pub ttl: u32,
    pub proxied: bool,
    /// Written as the record comment (`LastUpdate@...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Listing filter for one zone.
///
/// `name` matches the FQDN exactly. Pages start at 1; the default asks for the first
/// page of 100 with no filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQueryParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
}

impl Default for RecordQueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 100,
            name: None,
            record_type: None,
        }
    }
}

impl RecordQueryParams {
    /// First page of the records named `name`.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }
}

/// 单页结果
///
/// `items` may be shorter than the provider's page, or empty, when unsupported record
/// types were dropped; `has_more` is computed from the provider's totals and stays
/// authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    /// Records across all pages, as counted by the provider
    pub total_count: u32,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let seen = u64::from(page) * u64::from(page_size);
        Self {
            items,
            page,
            page_size,
            total_count,
            has_more: seen < u64::from(total_count),
        }
    }
}
