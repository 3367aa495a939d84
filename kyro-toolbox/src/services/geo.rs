//! Geo-IP label of the host running the engine.

use serde_json::Value;

use crate::error::{ToolboxError, ToolboxResult};

/// Geo-IP endpoints, tried in order.
pub(crate) const GEO_ENDPOINTS: [&str; 2] = ["https://api.ip.sb/geoip", "https://myip.mili.one/json"];

async fn fetch_json(client: &reqwest::Client, url: &str) -> ToolboxResult<Value> {
    client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| ToolboxError::NetworkError(format!("Geo lookup via {url} failed: {e}")))?
        .json()
        .await
        .map_err(|e| ToolboxError::ParseError(format!("Invalid geo response from {url}: {e}")))
}

/// Raw JSON text for numbers, unquoted text for strings.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `country_code,region_code,city,asn`; missing fields are left out.
fn build_label(doc: &Value) -> String {
    let mut label = String::new();
    for key in ["country_code", "region_code", "city"] {
        if let Some(v) = doc.get(key) {
            label.push_str(&field_text(v));
            label.push(',');
        }
    }
    if let Some(asn) = doc.get("asn") {
        label.push_str(&field_text(asn));
    }
    label
}

/// Query each endpoint in turn until one answers, and build the label from it.
pub(crate) async fn geo_label(client: &reqwest::Client, endpoints: &[&str]) -> ToolboxResult<String> {
    let mut last_error = ToolboxError::ValidationError("No geo endpoint configured".to_string());
    for url in endpoints {
        match fetch_json(client, url).await {
            Ok(doc) => return Ok(build_label(&doc)),
            Err(e) => {
                log::warn!("{e}");
                last_error = e;
            }
        }
    }
    Err(last_error)
}
