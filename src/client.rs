//! HTTP client for the API under test.
//!
//! Every call returns a fully buffered [`ApiResponse`] or a [`ClientError`];
//! nothing here panics on a bad network or a bad body.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    /// DNS failure, refused connection, timeout, or an unreadable body.
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("response body is not valid JSON")]
    Decode(#[from] serde_json::Error),
}

/// A buffered response: status, headers and the raw body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Parse the body as an arbitrary JSON value.
    pub fn json(&self) -> Result<Value, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Header lookup; names are case-insensitive.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }
}

/// Thin wrapper binding a `reqwest::Client` to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `/status`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// OPTIONS request carrying the given extra headers (e.g. a CORS preflight).
    pub async fn options(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        let mut req = self.client.request(Method::OPTIONS, self.url(path));
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        self.send(req).await
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<ApiResponse, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
