use anyhow::Result;
use serde_json::Value;

use super::Outcome;
use crate::client::ApiClient;

pub const EXPECTED_MESSAGE: &str = "Hello World";

/// `GET /` must answer 200 with `{"message": "Hello World"}`.
pub async fn basic_connectivity(api: &ApiClient) -> Result<Outcome> {
    let resp = api.get("/").await?;
    if !resp.is_ok() {
        return Ok(Outcome::fail(format!("HTTP {}: {}", resp.code(), resp.body)));
    }
    Ok(classify_root(resp.json()?))
}

pub fn classify_root(data: Value) -> Outcome {
    if data.get("message").and_then(Value::as_str) == Some(EXPECTED_MESSAGE) {
        Outcome::pass("Root endpoint returned expected message").with_data(data)
    } else {
        Outcome::fail(format!("Unexpected response: {}", data))
    }
}
