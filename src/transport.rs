//! Transport adapters.
//!
//! A transport performs the HTTP GET for a finished [`Request`] and hands
//! back the raw body text. Two calling conventions share one contract:
//!
//! - **[`BlockingTransport`]** — blocks the calling thread until the body
//!   arrives. Implemented by [`ReqwestBlocking`].
//! - **[`AsyncTransport`]** — suspends at the network boundary only.
//!   Implemented by [`ReqwestAsync`].
//!
//! Both extend [`ResponseHook`], whose [`post_process`](ResponseHook::post_process)
//! turns the raw text into a JSON tree before the clients project it into
//! typed records. Any other HTTP stack (or a test double serving canned
//! text) can be plugged into the clients by implementing these traits.
//!
//! Wire behaviour is identical in both modes: same URL, same headers,
//! method `GET`, no retries. Network failures and non-2xx statuses become
//! [`Error::Transport`] and the body of a failed response is never mapped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tagscope_core::query::Request;
use tagscope_core::{mapper, Error, Result};
use tracing::{debug, warn};

use crate::config::HttpConfig;

/// Post-processing applied to every successful raw body.
pub trait ResponseHook {
    /// Turn raw body text into a JSON tree. Defaults to plain JSON decoding.
    fn post_process(&self, raw: String) -> Result<Value> {
        mapper::decode(&raw)
    }
}

/// Transport for the thread-blocking calling convention.
pub trait BlockingTransport: ResponseHook {
    fn execute(&self, request: &Request) -> Result<String>;
}

/// Transport for the suspending calling convention.
#[async_trait]
pub trait AsyncTransport: ResponseHook + Send + Sync {
    async fn execute(&self, request: &Request) -> Result<String>;
}

/// Convert the request's header pairs into a reqwest [`HeaderMap`].
fn header_map(request: &Request) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in &request.headers {
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::network(&request.url, format!("invalid header name {:?}: {}", name, e))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            Error::network(&request.url, format!("invalid value for header {}: {}", name, e))
        })?;
        map.insert(header, value);
    }
    Ok(map)
}

// ============ Blocking ============

/// [`BlockingTransport`] backed by `reqwest::blocking`.
///
/// Must not be created or dropped from inside an async runtime.
pub struct ReqwestBlocking {
    client: reqwest::blocking::Client,
}

impl ReqwestBlocking {
    pub fn new(http: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client })
    }
}

impl ResponseHook for ReqwestBlocking {}

impl BlockingTransport for ReqwestBlocking {
    fn execute(&self, request: &Request) -> Result<String> {
        debug!(kind = request.kind.as_str(), url = %request.url, "GET (blocking)");

        let response = self
            .client
            .get(&request.url)
            .headers(header_map(request)?)
            .send()
            .map_err(|e| Error::network(&request.url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(url = %request.url, status = status.as_u16(), "upstream returned error status");
            return Err(Error::status(&request.url, status.as_u16(), &body));
        }

        response
            .text()
            .map_err(|e| Error::network(&request.url, e.to_string()))
    }
}

// ============ Async ============

/// [`AsyncTransport`] backed by the async `reqwest::Client`.
pub struct ReqwestAsync {
    client: reqwest::Client,
}

impl ReqwestAsync {
    pub fn new(http: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client })
    }
}

impl ResponseHook for ReqwestAsync {}

#[async_trait]
impl AsyncTransport for ReqwestAsync {
    async fn execute(&self, request: &Request) -> Result<String> {
        debug!(kind = request.kind.as_str(), url = %request.url, "GET (async)");

        let response = self
            .client
            .get(&request.url)
            .headers(header_map(request)?)
            .send()
            .await
            .map_err(|e| Error::network(&request.url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %request.url, status = status.as_u16(), "upstream returned error status");
            return Err(Error::status(&request.url, status.as_u16(), &body));
        }

        response
            .text()
            .await
            .map_err(|e| Error::network(&request.url, e.to_string()))
    }
}
