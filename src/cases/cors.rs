//! Cross-origin checks: an explicit preflight, plus the indirect
//! configuration probe that combines CORS with the status endpoint.

use anyhow::Result;

use super::Outcome;
use crate::client::ApiClient;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// Any one of these on a preflight response counts as CORS being enabled.
pub const CORS_HEADERS: [&str; 3] = [
    ALLOW_ORIGIN,
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Headers",
];

const PREFLIGHT: [(&str, &str); 3] = [
    ("Origin", "http://localhost:3000"),
    ("Access-Control-Request-Method", "POST"),
    ("Access-Control-Request-Headers", "Content-Type"),
];

pub async fn preflight(api: &ApiClient) -> Result<Outcome> {
    let resp = api.options("/status", &PREFLIGHT).await?;
    let present: Vec<&str> = CORS_HEADERS
        .iter()
        .copied()
        .filter(|h| resp.has_header(h))
        .collect();
    Ok(classify_preflight(&present))
}

pub fn classify_preflight(present: &[&str]) -> Outcome {
    if present.is_empty() {
        Outcome::fail("No CORS headers found in response")
    } else {
        Outcome::pass(format!("CORS headers present: {}", present.join(", ")))
    }
}

/// Infers backend configuration from behavior: a working status list means
/// the data layer is up, an allow-origin header on `OPTIONS /` means CORS
/// origins are configured.
pub async fn environment(api: &ApiClient) -> Result<Outcome> {
    let data_layer = api.get("/status").await?.is_ok();
    let cors = api.options("/", &[]).await?.has_header(ALLOW_ORIGIN);
    Ok(classify_environment(data_layer, cors))
}

pub fn classify_environment(data_layer: bool, cors: bool) -> Outcome {
    match (data_layer, cors) {
        (true, true) => Outcome::pass("Status storage and CORS are properly configured"),
        (true, false) => Outcome::partial("Status storage working, CORS configuration unclear"),
        (false, _) => Outcome::fail("Status storage or basic configuration issues"),
    }
}
