//! Shared application state for all routes. Everything is immutable after startup.

use crate::service::{TemplateRenderer, Upstream};
use crate::settings::EdgeConfig;
use crate::store::KvStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub upstream: Arc<dyn Upstream>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub config: Arc<EdgeConfig>,
}
