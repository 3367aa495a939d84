//! DNS-over-HTTPS lookup (JSON API, `application/dns-json`).

use std::net::Ipv4Addr;

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::error::{ToolboxError, ToolboxResult};

/// RR type code for IPv4 address answers.
const TYPE_A: u16 = 1;

#[derive(Deserialize)]
struct DohResponse {
    #[serde(rename = "Answer")]
    answer: Option<Vec<DohAnswer>>,
}

#[derive(Deserialize)]
struct DohAnswer {
    #[serde(rename = "type")]
    record_type: u16,
    data: String,
}

fn query_url(endpoint: &str, host: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}name={}", urlencoding::encode(host))
}

/// Query `endpoint` for `host` and return the IPv4 answers in response order.
///
/// A response without an `Answer` array, or an A answer whose data is not an IPv4
/// literal, is an error so that the caller falls back to the system resolver.
/// An `Answer` array with no A entries yields an empty list.
pub(crate) async fn doh_lookup(
    client: &reqwest::Client,
    endpoint: &str,
    host: &str,
) -> ToolboxResult<Vec<Ipv4Addr>> {
    let url = query_url(endpoint, host);
    log::debug!("DoH GET {url}");

    let response = client
        .get(&url)
        .header(ACCEPT, "application/dns-json")
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| ToolboxError::NetworkError(format!("DoH request failed: {e}")))?;

    let body: DohResponse = response
        .json()
        .await
        .map_err(|e| ToolboxError::ParseError(format!("Invalid DoH response: {e}")))?;

    let answers = body
        .answer
        .ok_or_else(|| ToolboxError::ParseError(format!("DoH response for {host} has no Answer")))?;

    answers
        .into_iter()
        .filter(|a| a.record_type == TYPE_A)
        .map(|a| {
            a.data.parse::<Ipv4Addr>().map_err(|_| {
                ToolboxError::ParseError(format!("Invalid A record data: {}", a.data))
            })
        })
        .collect()
}
