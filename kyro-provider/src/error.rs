//! Provider 错误类型

use thiserror::Error;

/// Error returned by every [`DnsProvider`](crate::DnsProvider) call.
///
/// `provider` names the backend. `NetworkError`, `Timeout` and `RateLimited` are
/// transient and retried by the HTTP layer before they surface here.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Connection, TLS or gateway (502-504) failure
    #[error("[{provider}] Network error: {detail}")]
    NetworkError { provider: String, detail: String },

    #[error("[{provider}] Request timeout: {detail}")]
    Timeout { provider: String, detail: String },

    /// HTTP 429
    #[error("[{provider}] Rate limited{}", .retry_after.map(|s| format!(" (retry after {s}s)")).unwrap_or_default())]
    RateLimited {
        provider: String,
        /// `Retry-After` in seconds, when sent
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// Token rejected or inactive
    #[error("[{provider}] Invalid credentials{}", suffix(.raw_message.as_deref()))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// Create hit an existing record at the same name
    #[error("[{provider}] Record '{record_name}' already exists")]
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// Delete of a record id the zone no longer has
    #[error("[{provider}] Record '{record_id}' not found")]
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// A create request field the provider refused (`param`: name, value, ttl, ...)
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    #[error("[{provider}] Quota exceeded")]
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Zone '{zone}' not found{}", suffix(.raw_message.as_deref()))]
    ZoneNotFound {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    /// Response body was not the expected JSON
    #[error("[{provider}] Parse error: {detail}")]
    ParseError { provider: String, detail: String },

    /// API error with a code we do not classify
    #[error("[{provider}] {raw_message}")]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

fn suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl ProviderError {
    /// 配置或数据问题（凭证、Zone、参数等）返回 `true`，记录为 `warn`；
    /// 其余记录为 `error`。新增变体时同步更新。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::ZoneNotFound { .. }
        )
    }

    /// 瞬时错误，可重试
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
