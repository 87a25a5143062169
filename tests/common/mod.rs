//! Shared fixtures: in-memory store with read recording, recording upstream, router builder.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tenant_edge::{
    router, AppError, AppState, EdgeConfig, HandlebarsRenderer, KvStore, MemoryKvStore, Upstream, UpstreamResponse,
};
use tower::ServiceExt;

pub const MANAGED_ORIGIN: &str = "https://managed.test/";
pub const HOST: &str = "cdn.edge.test";
pub const BUNDLE_PATH: &str = "/walmart/apps/navbar/c1a777c770ee187cebedd0724653c771495f2af9/react-mf-navbar.js";
pub const UPSTREAM_ETAG: &str = "\"c1a777c7\"";
pub const UPSTREAM_LAST_MODIFIED: &str = "Tue, 01 Sep 2026 10:00:00 GMT";
pub const BUNDLE_PARTS: &str = "navbar/c1a777c770ee187cebedd0724653c771495f2af9/react-mf-navbar.js";

/// Memory store that records every key read.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryKvStore,
    pub reads: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn with_entries(entries: Vec<(&str, Value)>) -> Self {
        RecordingStore {
            inner: MemoryKvStore::with_entries(entries),
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl KvStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        self.reads.lock().unwrap().push(key.to_string());
        self.inner.get(key).await
    }
}

/// Upstream that records requested URLs and answers with a fixed response, or fails at transport level.
pub struct RecordingUpstream {
    pub calls: Mutex<Vec<String>>,
    status: StatusCode,
    fail: bool,
}

impl RecordingUpstream {
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    pub fn with_status(status: StatusCode) -> Self {
        RecordingUpstream {
            calls: Mutex::new(Vec::new()),
            status,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        RecordingUpstream {
            calls: Mutex::new(Vec::new()),
            status: StatusCode::OK,
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for RecordingUpstream {
    async fn fetch(&self, url: &str) -> Result<UpstreamResponse, AppError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(AppError::Upstream(format!("{}: connection refused", url)));
        }
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/javascript"));
        headers.insert(header::ETAG, HeaderValue::from_static(UPSTREAM_ETAG));
        headers.insert(header::LAST_MODIFIED, HeaderValue::from_static(UPSTREAM_LAST_MODIFIED));
        Ok(UpstreamResponse {
            status: self.status,
            headers,
            body: Body::from("console.log('hi');"),
        })
    }
}

pub struct Harness {
    pub app: Router,
    pub store: Arc<RecordingStore>,
    pub upstream: Arc<RecordingUpstream>,
}

pub fn harness(entries: Vec<(&str, Value)>, upstream: RecordingUpstream) -> Harness {
    let store = Arc::new(RecordingStore::with_entries(entries));
    let upstream = Arc::new(upstream);
    let state = AppState {
        store: store.clone(),
        upstream: upstream.clone(),
        renderer: Arc::new(HandlebarsRenderer::new().unwrap()),
        config: Arc::new(EdgeConfig {
            managed_origin: MANAGED_ORIGIN.into(),
            ..EdgeConfig::default()
        }),
    };
    Harness {
        app: router(state),
        store,
        upstream,
    }
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with(path: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(path).header(header::HOST, HOST);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_string(response: Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

pub fn self_hosted_settings() -> Value {
    json!({
        "staticFiles": { "microfrontendProxy": { "environments": {
            "prod": { "useBaseplateHosting": false, "host": "https://cdn.example.com/" }
        } } }
    })
}

pub fn import_map() -> Value {
    json!({
        "imports": {
            "@walmart/root-config": "https://cdn.walmart.com/root-config.js",
            "@walmart/navbar": "https://cdn.walmart.com/navbar.js"
        }
    })
}

pub fn page_params() -> Value {
    json!({
        "title": "Walmart",
        "importMap": { "name": "systemjs", "type": "systemjs" },
        "preloads": [{ "importSpecifier": "@walmart/navbar" }],
        "pageInit": { "entryModule": "@walmart/root-config" }
    })
}
