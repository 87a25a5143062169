//! Public URL and declared origin of the inbound request.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use url::Url;

/// What decoration and URL derivation need to know about the request.
#[derive(Clone, Debug)]
pub struct EdgeRequest {
    /// Rebuilt from the configured public scheme, the `Host` header and the request target.
    pub url: Url,
    /// `Origin` header, if any.
    pub origin: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for EdgeRequest {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .ok_or_else(|| AppError::BadRequest("Host header is required".into()))?;
        let target = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = Url::parse(&format!("{}://{}{}", state.config.public_scheme, host, target))
            .map_err(|e| AppError::BadRequest(format!("invalid request url: {}", e)))?;
        let origin = parts
            .headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(EdgeRequest { url, origin })
    }
}
