//! Bundle proxy: managed storage or tenant origin, one upstream call per request.

use crate::config::TenantSettings;
use crate::error::AppError;
use crate::extractors::{EdgeRequest, Environment, TenantKey};
use crate::headers::{decoration_headers, BUNDLE_CACHE_CONTROL, NO_STORE};
use crate::response::{internal_error_response, upstream_error_response};
use crate::state::AppState;
use crate::tenant::{resolve_settings, HostingMode};
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::Response;

/// Routing input for one bundle request.
#[derive(Clone, Debug)]
pub struct AppRequest {
    pub tenant_key: String,
    pub environment: String,
    /// App name, version/hash segment and filename, in request order.
    pub path_parts: Vec<String>,
}

/// Upstream URL: hosting base followed by the joined path parts. No encoding is applied.
pub fn upstream_url(settings: &TenantSettings, environment: &str, managed_origin: &str, path_parts: &[String]) -> String {
    let base = match settings.hosting(environment) {
        HostingMode::Managed => managed_origin.to_string(),
        HostingMode::SelfHosted { host } => host,
    };
    format!("{}{}", base, path_parts.join("/"))
}

pub async fn handle_app(state: &AppState, request: &EdgeRequest, params: AppRequest) -> Response {
    let settings = match resolve_settings(state.store.as_ref(), &params.tenant_key).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(tenant = %params.tenant_key, error = %e, "tenant settings unavailable");
            return internal_error_response(request, None);
        }
    };
    let url = upstream_url(
        &settings,
        &params.environment,
        &state.config.managed_origin,
        &params.path_parts,
    );

    let upstream = match state.upstream.fetch(&url).await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::error!(tenant = %params.tenant_key, url = %url, error = %e, "bundle fetch failed");
            return upstream_error_response(request, &settings);
        }
    };
    tracing::debug!(tenant = %params.tenant_key, url = %url, status = %upstream.status, "bundle proxied");

    let mut response = Response::new(upstream.body);
    *response.status_mut() = upstream.status;
    let headers = response.headers_mut();
    headers.extend(upstream.headers);
    headers.extend(decoration_headers(request, &settings));
    let cache_control = if upstream.status.is_success() {
        BUNDLE_CACHE_CONTROL
    } else {
        NO_STORE
    };
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(cache_control));
    response
}

/// Segments after `/<tenant>/apps/`, still percent-encoded as received.
pub fn encoded_path_parts(path: &str) -> Vec<String> {
    path.splitn(4, '/')
        .nth(3)
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// GET /:tenant/apps/*path
///
/// Only the tenant comes from the decoded route captures; the bundle path is taken from the raw URL.
pub async fn serve_app(
    State(state): State<AppState>,
    request: EdgeRequest,
    Environment(environment): Environment,
    Path((tenant, _)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let tenant = TenantKey::parse(&tenant)?;
    let path_parts = encoded_path_parts(request.url.path());
    if path_parts.is_empty() {
        return Err(AppError::NotFound(request.url.path().to_string()));
    }
    let params = AppRequest {
        tenant_key: tenant.0,
        environment,
        path_parts,
    };
    Ok(handle_app(&state, &request, params).await)
}
