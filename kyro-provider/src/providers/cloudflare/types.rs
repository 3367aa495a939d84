//! Cloudflare 请求/响应结构

use serde::{Deserialize, Serialize};

/// Envelope around every API response.
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    /// Present on list endpoints only
    pub result_info: Option<ResultInfo>,
}

impl<T> CloudflareResponse<T> {
    /// `(code, message)` of the first reported error.
    pub fn first_error(&self) -> (String, String) {
        match self.errors.first() {
            Some(e) => (e.code.to_string(), e.message.clone()),
            None => (String::new(), "Unknown error".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultInfo {
    pub total_count: u32,
}

/// `dns_records` item. `type` stays a string so unknown types can be skipped.
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: Option<bool>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// POST `dns_records` body
#[derive(Debug, Serialize)]
pub struct CreateRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
}
