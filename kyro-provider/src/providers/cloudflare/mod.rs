//! Cloudflare v4 API
//!
//! Bearer-token auth against `/zones/{zone}/dns_records` and `/user/tokens/verify`.

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse};

const API_ROOT: &str = "https://api.cloudflare.com/client/v4";
/// `per_page` ceiling of the DNS records endpoint
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;
/// Extra sends for network errors, timeouts and 429s
pub(crate) const MAX_RETRIES: u32 = 2;

pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    /// API root without trailing slash
    pub(crate) base_url: String,
}

impl CloudflareProvider {
    pub fn new(api_token: String) -> Self {
        Self::with_base_url(api_token, API_ROOT)
    }

    /// Same provider against another API root, e.g. a local mock server.
    pub fn with_base_url(api_token: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: create_http_client(),
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
