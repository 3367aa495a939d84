//! Cloudflare 错误码映射
//!
//! Only codes that the calls made here can return are classified: token verification,
//! listing a zone's records, creating an `A`/`CNAME` record and deleting a record.
//! Everything else stays [`ProviderError::Unknown`] with the raw code attached.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

/// What a Cloudflare error code means for us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    Credentials,
    /// Rejected field of a create request
    Param(&'static str),
    Exists,
    NotFound,
    Quota,
    Zone,
}

fn classify(code: &str) -> Option<ErrorClass> {
    let class = match code {
        // 1000 invalid API token, 6003/6111 malformed Authorization header,
        // 9109 unauthorized for the resource, 10000 authentication error
        "1000" | "6003" | "6111" | "9109" | "10000" => ErrorClass::Credentials,
        // 7000 no route, 7003 bad object identifier in the path
        "7000" | "7003" => ErrorClass::Zone,
        "9000" => ErrorClass::Param("name"),
        // 9005 A content is not IPv4, 9007 CNAME content is not a host name
        "9005" | "9007" => ErrorClass::Param("value"),
        "9021" => ErrorClass::Param("ttl"),
        "9041" => ErrorClass::Param("proxied"),
        // 1004 DNS validation error without a field
        "1004" => ErrorClass::Param("record"),
        // 81053 an A/AAAA/CNAME record already exists with that host, 81054 a CNAME
        // does, 81055 an A record does, 81057/81058 identical record
        "81053" | "81054" | "81055" | "81057" | "81058" => ErrorClass::Exists,
        "81044" => ErrorClass::NotFound,
        "81045" => ErrorClass::Quota,
        _ => return None,
    };
    Some(class)
}

impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let Some(class) = raw.code.as_deref().and_then(classify) else {
            return self.unknown_error(raw);
        };

        let provider = self.provider_name().to_string();
        let or_unknown = |value: Option<String>| value.unwrap_or_else(|| "<unknown>".to_string());

        match class {
            ErrorClass::Credentials => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            ErrorClass::Param(param) => ProviderError::InvalidParameter {
                provider,
                param: param.to_string(),
                detail: raw.message,
            },
            ErrorClass::Exists => ProviderError::RecordExists {
                provider,
                record_name: or_unknown(context.record_name),
                raw_message: Some(raw.message),
            },
            ErrorClass::NotFound => ProviderError::RecordNotFound {
                provider,
                record_id: or_unknown(context.record_id),
                raw_message: Some(raw.message),
            },
            ErrorClass::Quota => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },
            ErrorClass::Zone => ProviderError::ZoneNotFound {
                provider,
                zone: or_unknown(context.zone),
                raw_message: Some(raw.message),
            },
        }
    }
}
