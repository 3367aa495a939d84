//! 通用 HTTP 请求工具
//!
//! Providers build the `RequestBuilder` themselves (auth, body); this module sends it,
//! turns gateway and throttling statuses into retryable [`ProviderError`]s and retries
//! those with backoff.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// Longest slice of a response body written to the log.
const LOGGED_BODY_CHARS: usize = 240;
/// Upper bound for a server-supplied `Retry-After`.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);
const BASE_BACKOFF: Duration = Duration::from_millis(100);
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Body prefix for logs and error details, cut on a char boundary.
fn clip_body(body: &str) -> String {
    match body.char_indices().nth(LOGGED_BODY_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

/// HTTP 工具函数集
pub struct HttpUtils;

impl HttpUtils {
    /// Send once and return `(status, body)`.
    ///
    /// 429 and 502-504 come back as errors; any other status is handed to the caller,
    /// whose response envelope decides success.
    pub async fn execute_request(
        request: RequestBuilder,
        provider: &str,
        method: &str,
        url: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider}] {method} {url}");

        let response = request.send().await.map_err(|e| {
            let detail = e.to_string();
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider.to_string(),
                    detail,
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider.to_string(),
                    detail,
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider}] HTTP {status}");

        match status {
            429 => {
                let retry_after = retry_after_secs(&response);
                let body = response.text().await.unwrap_or_default();
                log::warn!("[{provider}] Throttled, Retry-After: {retry_after:?}");
                Err(ProviderError::RateLimited {
                    provider: provider.to_string(),
                    retry_after,
                    raw_message: (!body.is_empty()).then(|| clip_body(&body)),
                })
            }
            502..=504 => {
                let body = response.text().await.unwrap_or_default();
                log::warn!("[{provider}] Gateway error HTTP {status}");
                Err(ProviderError::NetworkError {
                    provider: provider.to_string(),
                    detail: format!("HTTP {status}: {}", clip_body(&body)),
                })
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| ProviderError::NetworkError {
                        provider: provider.to_string(),
                        detail: format!("reading body: {e}"),
                    })?;
                log::debug!("[{provider}] Body: {}", clip_body(&body));
                Ok((status, body))
            }
        }
    }

    /// Deserialize a body; failures become [`ProviderError::ParseError`].
    pub fn parse_json<T>(body: &str, provider: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{provider}] Unparseable response ({e}): {}", clip_body(body));
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// [`execute_request`](Self::execute_request) retrying transient failures up to
    /// `max_retries` times. `0` sends exactly once.
    pub async fn execute_request_with_retry(
        request: RequestBuilder,
        provider: &str,
        method: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ProviderError> {
        let mut retry = 0;

        loop {
            // streaming bodies cannot be cloned: send the original once
            let Some(attempt) = request.try_clone() else {
                log::warn!("[{provider}] Request body not cloneable, sending without retry");
                return Self::execute_request(request, provider, method, url).await;
            };

            match Self::execute_request(attempt, provider, method, url).await {
                Err(e) if retry < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, retry);
                    retry += 1;
                    log::warn!(
                        "[{provider}] {method} failed ({e}), retry {retry}/{max_retries} in {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// `Retry-After` when the server sent one, otherwise exponential backoff.
fn retry_delay(error: &ProviderError, retry: u32) -> Duration {
    match error {
        ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } => Duration::from_secs(*secs).min(MAX_RETRY_AFTER),
        _ => backoff_delay(retry),
    }
}

fn backoff_delay(retry: u32) -> Duration {
    BASE_BACKOFF
        .saturating_mul(2_u32.saturating_pow(retry))
        .min(MAX_BACKOFF)
}
