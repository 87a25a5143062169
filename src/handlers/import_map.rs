//! Import map documents, linked from rendered pages as `<name>.importmap`.

use crate::config::{read_import_map, validated_import_map, ImportMapLookup};
use crate::extractors::EdgeRequest;
use crate::headers::{decoration_headers, IMPORT_MAP_CACHE_CONTROL, IMPORT_MAP_CONTENT_TYPE};
use crate::response::{internal_error_response, not_found_response};
use crate::state::AppState;
use crate::tenant::resolve_settings;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

#[derive(Clone, Debug)]
pub struct ImportMapRequest {
    pub environment: String,
    pub import_map_name: String,
}

pub async fn handle_import_map(
    state: &AppState,
    request: &EdgeRequest,
    params: ImportMapRequest,
    tenant_key: &str,
) -> Response {
    let settings = match resolve_settings(state.store.as_ref(), tenant_key).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "failed to resolve tenant settings");
            return internal_error_response(request, None);
        }
    };
    if !settings.exists {
        return not_found_response(request, &settings);
    }

    let lookup = ImportMapLookup {
        import_map_name: &params.import_map_name,
        environment: &params.environment,
    };
    let raw = match read_import_map(state.store.as_ref(), lookup, tenant_key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return not_found_response(request, &settings),
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "failed to read import map");
            return internal_error_response(request, Some(&settings));
        }
    };

    let raw = match validated_import_map(Some(raw)) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(tenant = tenant_key, url = %request.url, error = %e, "import map invalid");
            return internal_error_response(request, Some(&settings));
        }
    };
    let body = match serde_json::to_string_pretty(&raw) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(tenant = tenant_key, error = %e, "failed to serialize import map");
            return internal_error_response(request, Some(&settings));
        }
    };

    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(IMPORT_MAP_CONTENT_TYPE));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(IMPORT_MAP_CACHE_CONTROL));
    headers.extend(decoration_headers(request, &settings));
    response
}
