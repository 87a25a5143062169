//! Terminal edge responses, decorated like any other edge response.

use crate::config::TenantSettings;
use crate::error::ErrorBody;
use crate::extractors::EdgeRequest;
use crate::headers::{decoration_headers, NO_STORE};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

fn terminal_response(
    status: StatusCode,
    code: &str,
    message: String,
    request: &EdgeRequest,
    settings: &TenantSettings,
) -> Response {
    let mut response = (status, Json(ErrorBody::new(code, message, None))).into_response();
    let headers = response.headers_mut();
    headers.extend(decoration_headers(request, settings));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
    response
}

/// 404 for a missing tenant or missing content. `settings` may be a non-existent tenant's defaults.
pub fn not_found_response(request: &EdgeRequest, settings: &TenantSettings) -> Response {
    terminal_response(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("not found: {}", request.url.path()),
        request,
        settings,
    )
}

/// 500 whose cause has already been logged. Details are never sent to the client.
pub fn internal_error_response(request: &EdgeRequest, settings: Option<&TenantSettings>) -> Response {
    let fallback = TenantSettings::missing();
    terminal_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal server error".into(),
        request,
        settings.unwrap_or(&fallback),
    )
}

/// 502 for an upstream that could not be reached.
pub fn upstream_error_response(request: &EdgeRequest, settings: &TenantSettings) -> Response {
    terminal_response(
        StatusCode::BAD_GATEWAY,
        "upstream_error",
        format!("upstream unavailable: {}", request.url.path()),
        request,
        settings,
    )
}
