//! Outbound fetch of bundles from managed storage or a tenant origin.

use crate::error::AppError;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use std::time::Duration;

/// Upstream headers relayed to the client. Everything else is dropped.
pub const PASSTHROUGH_HEADERS: [HeaderName; 4] = [
    header::CONTENT_TYPE,
    header::CONTENT_ENCODING,
    header::ETAG,
    header::LAST_MODIFIED,
];

/// Upstream status, relayed headers and streamed body, passed through to the client unchanged.
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Copy the relayed subset of `source`.
pub fn passthrough_headers(source: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in PASSTHROUGH_HEADERS {
        if let Some(value) = source.get(&name) {
            headers.insert(name, value.clone());
        }
    }
    headers
}

/// One GET per call. Transport failures are `AppError::Upstream`; HTTP error statuses are not failures.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<UpstreamResponse, AppError>;
}

pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Upstream(format!("client init: {}", e)))?;
        Ok(HttpUpstream { client })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, url: &str) -> Result<UpstreamResponse, AppError> {
        tracing::debug!(url, "upstream fetch");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("{}: {}", url, e)))?;
        // Body errors after this point abort the client connection mid-stream.
        Ok(UpstreamResponse {
            status: response.status(),
            headers: passthrough_headers(response.headers()),
            body: Body::from_stream(response.bytes_stream()),
        })
    }
}
