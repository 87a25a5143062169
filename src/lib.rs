//! Tenant edge: routes microfrontend bundles, import maps and HTML entry pages for many tenants.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod headers;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;
pub mod tenant;

pub use config::{merge_default_html_params, verify_import_map, HtmlTemplateParams, ImportMap, TenantSettings};
pub use error::{AppError, ConfigError, ErrorBody};
pub use handlers::{handle_app, handle_import_map, handle_index_html};
pub use response::{internal_error_response, not_found_response, upstream_error_response};
pub use routes::{common_routes, edge_routes, router};
pub use service::{HandlebarsRenderer, HttpUpstream, TemplateRenderer, Upstream, UpstreamResponse};
pub use settings::EdgeConfig;
pub use state::AppState;
pub use store::{ensure_kv_table, KvStore, MemoryKvStore, PgKvStore};
pub use tenant::{resolve_settings, HostingMode};
