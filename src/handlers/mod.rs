//! HTTP handlers for bundles, HTML entry pages and import maps.

pub mod apps;
pub mod import_map;
pub mod index_html;

pub use apps::*;
pub use import_map::*;
pub use index_html::*;

use crate::config::TenantSettings;
use crate::error::AppError;
use crate::extractors::{EdgeRequest, Environment, TenantKey};
use crate::response::not_found_response;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Response;

/// GET /:tenant/:file — `<name>.html` pages and `<name>.importmap` documents.
pub async fn serve_file(
    State(state): State<AppState>,
    request: EdgeRequest,
    Environment(environment): Environment,
    Path((tenant, file)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let tenant = TenantKey::parse(&tenant)?;
    if let Some(name) = file.strip_suffix(".html").filter(|n| !n.is_empty()) {
        let params = HtmlRequest {
            environment,
            html_file_name: name.to_string(),
        };
        return Ok(handle_index_html(&state, &request, params, Some(tenant.as_str())).await);
    }
    if let Some(name) = file.strip_suffix(".importmap").filter(|n| !n.is_empty()) {
        let params = ImportMapRequest {
            environment,
            import_map_name: name.to_string(),
        };
        return Ok(handle_import_map(&state, &request, params, tenant.as_str()).await);
    }
    tracing::debug!(tenant = tenant.as_str(), file = %file, "unsupported file type");
    Ok(not_found_response(&request, &TenantSettings::missing()))
}
