//! reqwest-backed [`Transport`] talking to a live backend

use std::sync::Arc;
use std::time::Duration;

use mcsw_core::prelude::*;
use reqwest::cookie::Jar;
use serde_json::Value;
use url::Url;

use crate::transport::{ApiResponse, Transport};

/// Cookie name the backend keeps its login session under
const SESSION_COOKIE_NAME: &str = "session";

/// Connection settings for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Backend root, e.g. `http://localhost:5000/`
    pub base_url: String,
    /// Session cookie copied from a browser login. Either a bare value or a
    /// full `name=value` pair.
    pub session_cookie: Option<String>,
    pub timeout: Duration,
}

/// Transport that issues real HTTP requests.
///
/// Cookies set by the backend (including the cleared session after a
/// logout) are kept in a shared jar, so clones of this transport see the
/// same session.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;

        let jar = Jar::default();
        if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.is_empty()) {
            let pair = if cookie.contains('=') {
                cookie.to_string()
            } else {
                format!("{}={}", SESSION_COOKIE_NAME, cookie)
            };
            jar.add_cookie_str(&pair, &base);
            debug!("Attached session cookie for {}", base);
        }

        let client = reqwest::Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Option<Url> {
        match self.base.join(path.trim_start_matches('/')) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Cannot resolve {} against {}: {}", path, self.base, e);
                None
            }
        }
    }
}

/// Parse and normalise the backend root so relative joins keep its path
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| Error::invalid_url(raw, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(raw, "scheme must be http or https"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turn a reqwest outcome into an [`ApiResponse`], never failing
async fn into_api_response(
    path: &str,
    result: reqwest::Result<reqwest::Response>,
) -> ApiResponse {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!("Request to {} produced no response: {}", path, e);
            return ApiResponse::unreachable();
        }
    };

    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(bytes) if bytes.is_empty() => Value::Null,
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            debug!("Non-JSON body from {} (HTTP {}): {}", path, status, e);
            Value::Null
        }),
        Err(e) => {
            debug!("Failed to read body from {} (HTTP {}): {}", path, status, e);
            Value::Null
        }
    };
    trace!("{} -> HTTP {}", path, status);
    ApiResponse { status, body }
}

impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: Value) -> ApiResponse {
        let Some(url) = self.url(path) else {
            return ApiResponse::unreachable();
        };
        let result = self.client.post(url).json(&body).send().await;
        into_api_response(path, result).await
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> ApiResponse {
        let Some(url) = self.url(path) else {
            return ApiResponse::unreachable();
        };
        let result = self.client.get(url).query(query).send().await;
        into_api_response(path, result).await
    }

    async fn download(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let url = self
            .url(path)
            .ok_or_else(|| Error::download(format!("Cannot resolve {}", path)))?;
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::download(format!("server unreachable ({})", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::download(format!("HTTP {}", status.as_u16())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::download(format!("interrupted ({})", e)))?;
        Ok(bytes.to_vec())
    }
}
