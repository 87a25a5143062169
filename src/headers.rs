//! Response decoration: CORS, version and cache policies.

use crate::config::TenantSettings;
use crate::extractors::EdgeRequest;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

/// Version header present on every edge response.
pub const VERSION_HEADER: &str = "edge-version";

pub const BUNDLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
pub const HTML_CACHE_CONTROL: &str = "public, max-age=3600";
pub const IMPORT_MAP_CACHE_CONTROL: &str = "public, max-age=60";
pub const NO_STORE: &str = "no-store";

pub const HTML_CONTENT_SECURITY_POLICY: &str = "default-src 'self' https: localhost:*; script-src 'unsafe-inline' 'unsafe-eval' https: localhost:*; connect-src https: localhost:* ws://localhost:*; style-src 'unsafe-inline' https:; object-src 'none';";

pub const IMPORT_MAP_CONTENT_TYPE: &str = "application/importmap+json";

pub fn version_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(VERSION_HEADER),
        HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
    )
}

/// CORS headers for a request. Empty for same-origin requests, requests without `Origin`,
/// and origins the tenant does not allow. `settings` may describe a tenant that does not exist.
pub fn cors_headers(request: &EdgeRequest, settings: &TenantSettings) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Some(origin) = request.origin.as_deref() else {
        return headers;
    };
    if origin == request.url.origin().ascii_serialization() {
        return headers;
    }

    let cors = &settings.cors;
    let allow_origin = if cors.allow_origins.iter().any(|o| o == "*") {
        HeaderValue::from_static("*")
    } else if cors.allow_origins.iter().any(|o| o == origin) {
        match HeaderValue::from_str(origin) {
            Ok(v) => {
                headers.insert(header::VARY, HeaderValue::from_static("Origin"));
                v
            }
            Err(_) => return HeaderMap::new(),
        }
    } else {
        tracing::debug!(origin, "origin not allowed by tenant cors settings");
        return headers;
    };
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);

    insert_list(&mut headers, header::ACCESS_CONTROL_ALLOW_METHODS, &cors.allow_methods);
    insert_list(&mut headers, header::ACCESS_CONTROL_ALLOW_HEADERS, &cors.allow_headers);
    insert_list(&mut headers, header::ACCESS_CONTROL_EXPOSE_HEADERS, &cors.expose_headers);
    if cors.max_age > 0 {
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(cors.max_age));
    }
    if cors.allow_credentials {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
    headers
}

fn insert_list(headers: &mut HeaderMap, name: HeaderName, values: &[String]) {
    if values.is_empty() {
        return;
    }
    match HeaderValue::from_str(&values.join(", ")) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(e) => tracing::warn!(header = %name, error = %e, "skipping invalid cors header value"),
    }
}

/// CORS and version headers shared by every edge response.
pub fn decoration_headers(request: &EdgeRequest, settings: &TenantSettings) -> HeaderMap {
    let mut headers = cors_headers(request, settings);
    let (name, value) = version_header();
    headers.insert(name, value);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn request(origin: Option<&str>) -> EdgeRequest {
        EdgeRequest {
            url: Url::parse("https://cdn.example.com/walmart/apps/navbar/x/navbar.js").unwrap(),
            origin: origin.map(String::from),
        }
    }

    #[test]
    fn cross_origin_gets_wildcard_by_default() {
        let headers = cors_headers(&request(Some("https://shop.example.org")), &TenantSettings::missing());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, HEAD, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "7200");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[test]
    fn same_origin_and_missing_origin_get_nothing() {
        let settings = TenantSettings::missing();
        assert!(cors_headers(&request(Some("https://cdn.example.com")), &settings).is_empty());
        assert!(cors_headers(&request(None), &settings).is_empty());
    }

    #[test]
    fn listed_origin_is_echoed() {
        let mut settings = TenantSettings::missing();
        settings.cors.allow_origins = vec!["https://shop.example.org".into()];
        settings.cors.allow_credentials = true;
        let headers = cors_headers(&request(Some("https://shop.example.org")), &settings);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://shop.example.org");
        assert_eq!(headers[header::VARY], "Origin");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let other = cors_headers(&request(Some("https://evil.example.net")), &settings);
        assert!(other.is_empty());
    }

    #[test]
    fn decoration_always_has_version() {
        let headers = decoration_headers(&request(None), &TenantSettings::missing());
        assert!(!headers[VERSION_HEADER].is_empty());
    }
}
