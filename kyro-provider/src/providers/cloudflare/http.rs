//! Cloudflare 请求发送与响应信封处理

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareProvider, CloudflareResponse, MAX_RETRIES};

impl CloudflareProvider {
    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{path}", self.base_url);
        let builder = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_token);
        (builder, url)
    }

    /// Send with retries and unwrap the envelope. `success: false` is mapped through
    /// [`ProviderErrorMapper`] with `context`.
    async fn exchange<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &Method,
        url: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let provider = self.provider_name();
        let (_status, body) =
            HttpUtils::execute_request_with_retry(builder, provider, method.as_str(), url, MAX_RETRIES)
                .await?;

        let envelope: CloudflareResponse<T> = HttpUtils::parse_json(&body, provider)?;
        if envelope.success {
            return Ok(envelope);
        }

        let (code, message) = envelope.first_error();
        log::error!("[{provider}] {method} {url} rejected: {code} {message}");
        Err(self.map_error(RawApiError::with_code(code, message), context))
    }

    /// GET expecting a `result`.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (builder, url) = self.request(Method::GET, path);
        self.exchange(builder, &Method::GET, &url, ErrorContext::default())
            .await?
            .result
            .ok_or_else(|| self.parse_error("missing `result` in response"))
    }

    /// GET of a list endpoint: `(items, total_count)`.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        context: ErrorContext,
    ) -> Result<(Vec<T>, u32)> {
        let (builder, url) = self.request(Method::GET, path_and_query);
        let envelope: CloudflareResponse<Vec<T>> =
            self.exchange(builder, &Method::GET, &url, context).await?;

        let total = envelope.result_info.map_or(0, |info| info.total_count);
        Ok((envelope.result.unwrap_or_default(), total))
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let (builder, url) = self.request(Method::POST, path);
        self.exchange(builder.json(body), &Method::POST, &url, context)
            .await?
            .result
            .ok_or_else(|| self.parse_error("missing `result` in response"))
    }

    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        let (builder, url) = self.request(Method::DELETE, path);
        self.exchange::<serde_json::Value>(builder, &Method::DELETE, &url, context)
            .await
            .map(drop)
    }
}
