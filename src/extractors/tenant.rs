//! Tenant key validation and deployment environment extraction.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use regex::Regex;
use std::sync::OnceLock;

/// Header selecting the deployment environment. Set by the CDN rule in front of this service.
pub const ENVIRONMENT_HEADER: &str = "x-edge-environment";

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("static regex"))
}

/// Validated tenant key (also used for environment names).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenantKey(pub String);

impl TenantKey {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if key_pattern().is_match(raw) {
            Ok(TenantKey(raw.to_string()))
        } else {
            Err(AppError::BadRequest(format!("invalid tenant key: {}", raw)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Deployment environment from `x-edge-environment`, else the configured default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Environment {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ENVIRONMENT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty());
        match value {
            Some(env) if key_pattern().is_match(&env) => Ok(Environment(env)),
            Some(env) => Err(AppError::BadRequest(format!("invalid environment: {}", env))),
            None => Ok(Environment(state.config.default_environment.clone())),
        }
    }
}
