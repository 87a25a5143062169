//! HTML entry pages: stored params merged with defaults, verified import map, rendered template.

use crate::config::{
    merge_default_html_params, parse_import_map, read_html_params, read_import_map, validated_import_map,
    verify_preloads, ImportMapLookup, RenderContext,
};
use crate::extractors::EdgeRequest;
use crate::headers::{decoration_headers, HTML_CACHE_CONTROL, HTML_CONTENT_SECURITY_POLICY};
use crate::response::{internal_error_response, not_found_response};
use crate::state::AppState;
use crate::tenant::resolve_settings;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Routing input for one page request.
#[derive(Clone, Debug)]
pub struct HtmlRequest {
    pub environment: String,
    pub html_file_name: String,
}

/// Every failure ends in a terminal response; there is no partial page.
pub async fn handle_index_html(
    state: &AppState,
    request: &EdgeRequest,
    params: HtmlRequest,
    tenant_key: Option<&str>,
) -> Response {
    let Some(tenant_key) = tenant_key else {
        tracing::error!(url = %request.url, "no tenant key passed to page handler");
        return internal_error_response(request, None);
    };

    let (settings, stored_params) = tokio::join!(
        resolve_settings(state.store.as_ref(), tenant_key),
        read_html_params(state.store.as_ref(), tenant_key, &params.html_file_name),
    );
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "failed to resolve tenant settings");
            return internal_error_response(request, None);
        }
    };
    let stored_params = match stored_params {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "failed to read html template params");
            return internal_error_response(request, Some(&settings));
        }
    };

    let stored_params = match stored_params {
        Some(p) if settings.exists => p,
        _ => {
            tracing::debug!(tenant = tenant_key, file = %params.html_file_name, exists = settings.exists, "page not found");
            return not_found_response(request, &settings);
        }
    };

    let final_params = match merge_default_html_params(stored_params) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(tenant = tenant_key, file = %params.html_file_name, error = %e, "invalid html template params");
            return internal_error_response(request, Some(&settings));
        }
    };

    let lookup = ImportMapLookup {
        import_map_name: &final_params.import_map.name,
        environment: &params.environment,
    };
    let raw_import_map = match read_import_map(state.store.as_ref(), lookup, tenant_key).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "failed to read import map");
            return internal_error_response(request, Some(&settings));
        }
    };
    let raw_import_map = match validated_import_map(raw_import_map) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(tenant = tenant_key, url = %request.url, error = %e, "import map invalid");
            return internal_error_response(request, Some(&settings));
        }
    };
    let import_map = match parse_import_map(&raw_import_map) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "import map invalid");
            return internal_error_response(request, Some(&settings));
        }
    };

    let context = match RenderContext::build(&final_params, &raw_import_map, &import_map, &request.url) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(
                tenant = tenant_key,
                url = %request.url,
                error = %e,
                unresolved = ?verify_preloads(&import_map, &final_params.preloads),
                "cannot build page"
            );
            return internal_error_response(request, Some(&settings));
        }
    };

    let html = match state.renderer.render(&context) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "page render failed");
            return internal_error_response(request, Some(&settings));
        }
    };

    let mut response = (StatusCode::OK, html).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(HTML_CACHE_CONTROL));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(HTML_CONTENT_SECURITY_POLICY),
    );
    headers.extend(decoration_headers(request, &settings));
    response
}
