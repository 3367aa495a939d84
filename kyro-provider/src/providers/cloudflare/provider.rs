//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, parse_record_type};
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{CreateDnsRecordRequest, DnsRecord, PaginatedResponse, RecordQueryParams};

use super::types::CreateRecordBody;
use super::{CloudflareDnsRecord, CloudflareProvider, MAX_PAGE_SIZE_RECORDS};

impl CloudflareProvider {
    /// 将 Cloudflare 记录转换为 `DnsRecord`，不支持的记录类型返回 `None`
    pub(crate) fn cf_record_to_dns_record(
        cf_record: CloudflareDnsRecord,
        zone_id: &str,
    ) -> Option<DnsRecord> {
        let Some(record_type) = parse_record_type(&cf_record.record_type) else {
            log::debug!(
                "跳过不支持的记录类型 {} ({})",
                cf_record.record_type,
                cf_record.name
            );
            return None;
        };

        Some(DnsRecord {
            id: cf_record.id,
            zone_id: zone_id.to_string(),
            name: normalize_domain_name(&cf_record.name),
            record_type,
            value: cf_record.content,
            ttl: cf_record.ttl,
            proxied: cf_record.proxied.unwrap_or(false),
            comment: cf_record.comment,
        })
    }

    fn records_query(zone_id: &str, params: &RecordQueryParams) -> (String, u32) {
        let per_page = params.page_size.clamp(1, MAX_PAGE_SIZE_RECORDS);
        let mut url = format!(
            "/zones/{zone_id}/dns_records?page={}&per_page={per_page}",
            params.page.max(1)
        );

        // Cloudflare 的 name 参数为精确匹配
        if let Some(ref name) = params.name
            && !name.is_empty()
        {
            url.push_str(&format!("&name={}", urlencoding::encode(name)));
        }

        if let Some(record_type) = params.record_type {
            url.push_str(&format!("&type={}", record_type.as_str()));
        }

        (url, per_page)
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct VerifyResponse {
            status: String,
        }

        match self.get::<VerifyResponse>("/user/tokens/verify").await {
            Ok(resp) => Ok(resp.status == "active"),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &RecordQueryParams,
    ) -> Result<PaginatedResponse<DnsRecord>> {
        let (url, per_page) = Self::records_query(zone_id, params);
        let (cf_records, total_count) = self
            .get_page::<CloudflareDnsRecord>(&url, ErrorContext::zone(zone_id))
            .await?;

        let records = cf_records
            .into_iter()
            .filter_map(|r| Self::cf_record_to_dns_record(r, zone_id))
            .collect();

        Ok(PaginatedResponse::new(
            records,
            params.page.max(1),
            per_page,
            total_count,
        ))
    }

    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<DnsRecord> {
        let body = CreateRecordBody {
            record_type: req.record_type.as_str(),
            name: &req.name,
            content: &req.value,
            ttl: req.ttl,
            proxied: req.proxied,
            comment: req.comment.as_deref(),
        };

        let context = ErrorContext {
            record_name: Some(req.name.clone()),
            zone: Some(req.zone_id.clone()),
            ..ErrorContext::default()
        };

        let cf_record: CloudflareDnsRecord = self
            .post(&format!("/zones/{}/dns_records", req.zone_id), &body, context)
            .await?;

        Self::cf_record_to_dns_record(cf_record, &req.zone_id).ok_or_else(|| {
            ProviderError::ParseError {
                provider: self.id().to_string(),
                detail: "created record has an unsupported type".to_string(),
            }
        })
    }

    async fn delete_record(&self, record_id: &str, zone_id: &str) -> Result<()> {
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            zone: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        self.delete(&format!("/zones/{zone_id}/dns_records/{record_id}"), context)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DnsRecordType;

    fn cf_record(record_type: &str) -> CloudflareDnsRecord {
        CloudflareDnsRecord {
            id: "rec-1".to_string(),
            record_type: record_type.to_string(),
            name: "_ha.www.example.com".to_string(),
            content: "\"A:10.0.0.5\"".to_string(),
            ttl: 300,
            proxied: None,
            comment: None,
        }
    }

    #[test]
    fn converts_supported_record() {
        let record = CloudflareProvider::cf_record_to_dns_record(cf_record("TXT"), "zone").unwrap();
        assert_eq!(record.record_type, DnsRecordType::Txt);
        assert_eq!(record.zone_id, "zone");
        assert!(!record.proxied);
    }

    #[test]
    fn skips_unsupported_record() {
        assert!(CloudflareProvider::cf_record_to_dns_record(cf_record("HTTPS"), "zone").is_none());
    }

    #[test]
    fn query_encodes_name_and_clamps_page_size() {
        let params = RecordQueryParams {
            page: 2,
            page_size: 500,
            name: Some("_ha.www.example.com".to_string()),
            record_type: Some(DnsRecordType::Cname),
        };
        let (url, per_page) = CloudflareProvider::records_query("z1", &params);
        assert_eq!(per_page, 100);
        assert_eq!(
            url,
            "/zones/z1/dns_records?page=2&per_page=100&name=_ha.www.example.com&type=CNAME"
        );
    }
}
