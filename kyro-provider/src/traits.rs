//! Provider trait 与错误映射

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateDnsRecordRequest, DnsRecord, PaginatedResponse, RecordQueryParams};

/// Error as reported in a provider's response envelope.
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Provider-specific code, stringified
    pub code: Option<String>,
    pub message: String,
}

impl RawApiError {
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// What the failing call was about; fills the names in mapped errors.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub zone: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone: Some(zone_id.to_string()),
            ..Self::default()
        }
    }
}

/// 将 Provider 原始错误码映射为 [`ProviderError`]
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Codes the mapper does not classify.
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 故障转移所需的最小 DNS API
///
/// List one name, create a record, delete a record by id. Nothing else is called.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Short backend name used in logs and errors (`"cloudflare"`)
    fn id(&self) -> &'static str;

    /// `Ok(false)` when the API answers but the token is not active.
    async fn validate_credentials(&self) -> Result<bool>;

    /// One page of a zone's records, narrowed by `params`.
    async fn list_records(
        &self,
        zone_id: &str,
        params: &RecordQueryParams,
    ) -> Result<PaginatedResponse<DnsRecord>>;

    /// Returns the record as stored, with its new id.
    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<DnsRecord>;

    async fn delete_record(&self, record_id: &str, zone_id: &str) -> Result<()>;

    /// 获取指定名称的全部记录
    ///
    /// 默认实现逐页调用 `list_records()`，按 Provider 返回顺序拼接。
    /// 只看 `has_more`：过滤掉不支持的类型后，中间页可能为空。
    async fn list_all_records(&self, zone_id: &str, name: &str) -> Result<Vec<DnsRecord>> {
        let mut params = RecordQueryParams::by_name(name);
        let mut records = Vec::new();

        loop {
            let page = self.list_records(zone_id, &params).await?;
            let has_more = page.has_more;
            records.extend(page.items);
            if !has_more {
                break;
            }
            params = params.next_page();
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::DnsRecordType;

    /// Serves `total` records split into pages of `page_size`.
    ///
    /// Pages listed in `dropped` come back empty with the totals untouched, the way a
    /// provider looks when every record on that page has an unsupported type.
    struct PagedProvider {
        total: u32,
        page_size: u32,
        dropped: Vec<u32>,
        calls: Mutex<Vec<u32>>,
    }

    impl PagedProvider {
        fn new(total: u32, page_size: u32) -> Self {
            Self {
                total,
                page_size,
                dropped: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    fn record(i: u32) -> DnsRecord {
        DnsRecord {
            id: format!("rec-{i}"),
            zone_id: "zone".to_string(),
            name: "_ha.www.example.com".to_string(),
            record_type: DnsRecordType::A,
            value: format!("10.0.0.{i}"),
            ttl: 300,
            proxied: false,
            comment: None,
        }
    }

    #[async_trait]
    impl DnsProvider for PagedProvider {
        fn id(&self) -> &'static str {
            "paged"
        }

        async fn validate_credentials(&self) -> Result<bool> {
            Ok(true)
        }

        async fn list_records(
            &self,
            _zone_id: &str,
            params: &RecordQueryParams,
        ) -> Result<PaginatedResponse<DnsRecord>> {
            self.calls.lock().unwrap().push(params.page);
            let start = (params.page - 1) * self.page_size;
            let end = (start + self.page_size).min(self.total);
            let items = if self.dropped.contains(&params.page) {
                Vec::new()
            } else {
                (start..end).map(record).collect()
            };
            Ok(PaginatedResponse::new(
                items,
                params.page,
                self.page_size,
                self.total,
            ))
        }

        async fn create_record(&self, _req: &CreateDnsRecordRequest) -> Result<DnsRecord> {
            unimplemented!()
        }

        async fn delete_record(&self, _record_id: &str, _zone_id: &str) -> Result<()> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn list_all_records_follows_pages_in_order() {
        let provider = PagedProvider::new(5, 2);
        let records = provider
            .list_all_records("zone", "_ha.www.example.com")
            .await
            .unwrap();

        let values: Vec<_> = records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(
            values,
            ["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"]
        );
        assert_eq!(*provider.calls.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn list_all_records_single_empty_page() {
        let provider = PagedProvider::new(0, 100);
        let records = provider.list_all_records("zone", "x").await.unwrap();
        assert!(records.is_empty());
        assert_eq!(*provider.calls.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn list_all_records_reads_past_an_empty_page() {
        let provider = PagedProvider {
            dropped: vec![1],
            ..PagedProvider::new(101, 100)
        };
        let records = provider
            .list_all_records("zone", "_ha.www.example.com")
            .await
            .unwrap();

        let values: Vec<_> = records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["10.0.0.100"]);
        assert_eq!(*provider.calls.lock().unwrap(), vec![1, 2]);
    }
}
