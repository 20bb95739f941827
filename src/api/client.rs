use serde_json::Value;

use super::error::ApiError;

/// Core HTTP client function for making API calls.
/// Handles authentication headers, request building, and error responses.
pub async fn api_call(
    client: &reqwest::Client,
    api_base_url: &str,
    api_key: &str,
    method: &str,
    endpoint: &str,
    body: Option<Value>,
    params: Option<Vec<(String, String)>>,
) -> Result<Value, ApiError> {
    tracing::debug!(method, endpoint, "API request");

    let url = format!("{}{}", api_base_url, endpoint);
    let mut req = match method {
        "GET" => client.get(&url),
        "POST" => client.post(&url),
        "PATCH" => client.patch(&url),
        "DELETE" => client.delete(&url),
        _ => client.get(&url),
    };

    if !api_key.is_empty() {
        req = req
            .header("apikey", api_key)
            .header("Authorization", format!("Bearer {}", api_key));
    }

    if let Some(p) = params {
        req = req.query(&p);
    }

    if body.is_some() && matches!(method, "POST" | "PATCH") {
        // Ask the backend to echo the affected rows back in the response.
        req = req.header("Prefer", "return=representation");
    }

    if let Some(b) = body {
        req = req.json(&b);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| ApiError::Network(format!("request failed: {}", e)))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(ApiError::Remote(error_detail(status.as_u16(), &text)));
    }

    // DELETE answers 204 with an empty body.
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|_| ApiError::Remote("failed to parse response".into()))
}

/// Pull the backend's `message` field out of an error payload, falling back
/// to the raw body.
fn error_detail(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string());
    if detail.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, detail)
    }
}
