//! Tenant-facing routes: bundles under `/:tenant/apps/`, pages and import maps under `/:tenant/`.

use crate::handlers::{serve_app, serve_file};
use crate::routes::common_routes;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Edge requests are GETs; anything with a sizeable body is not for us.
const MAX_REQUEST_BODY: usize = 16 * 1024;

pub fn edge_routes(state: AppState) -> Router {
    Router::new()
        .route("/:tenant/apps/*path", get(serve_app))
        .route("/:tenant/:file", get(serve_file))
        .with_state(state)
}

/// Full router: common routes plus edge routes, with request tracing and a body limit.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(edge_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY))
        .layer(TraceLayer::new_for_http())
}
