//! Load stored documents from the KV store and merge them with defaults.

use crate::config::types::{HtmlTemplateParams, ImportMap};
use crate::error::{AppError, ConfigError};
use crate::store::{html_file_key, import_map_key, KvStore};
use serde::Deserialize;
use serde_json::Value;

/// Which import map to read for a page.
#[derive(Clone, Debug)]
pub struct ImportMapLookup<'a> {
    pub import_map_name: &'a str,
    pub environment: &'a str,
}

/// Raw stored template parameters for one page, or `None` when the page was never published.
pub async fn read_html_params(
    store: &dyn KvStore,
    tenant_key: &str,
    html_file_name: &str,
) -> Result<Option<Value>, AppError> {
    store.get(&html_file_key(tenant_key, html_file_name)).await
}

/// Merge stored page parameters over platform defaults.
pub fn merge_default_html_params(stored: Value) -> Result<HtmlTemplateParams, ConfigError> {
    serde_json::from_value(stored).map_err(|e| ConfigError::Load(format!("html template params: {}", e)))
}

/// Raw stored import map. Returned unparsed so it can be verified and embedded as stored.
pub async fn read_import_map(
    store: &dyn KvStore,
    lookup: ImportMapLookup<'_>,
    tenant_key: &str,
) -> Result<Option<Value>, AppError> {
    let key = import_map_key(tenant_key, lookup.environment, lookup.import_map_name);
    tracing::debug!(key = %key, "read import map");
    store.get(&key).await
}

/// Typed view of an import map. Call after `verify_import_map` reports no errors.
pub fn parse_import_map(raw: &Value) -> Result<ImportMap, ConfigError> {
    ImportMap::deserialize(raw).map_err(|e| ConfigError::Load(format!("import map: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{ImportMapType, Preload};
    use serde_json::json;

    #[test]
    fn empty_document_yields_defaults() {
        let params = merge_default_html_params(json!({})).unwrap();
        assert_eq!(params, HtmlTemplateParams::default());
        assert_eq!(params.import_map.name, "systemjs");
        assert_eq!(params.import_map.type_, ImportMapType::Systemjs);
    }

    #[test]
    fn stored_fields_override_nested_defaults() {
        let params = merge_default_html_params(json!({
            "title": "Walmart",
            "importMap": { "type": "module" },
            "importMapOverrides": { "devTools": true },
            "preloads": [{ "importSpecifier": "@walmart/navbar" }]
        }))
        .unwrap();
        assert_eq!(params.title, "Walmart");
        assert_eq!(params.locale, "en-US");
        assert_eq!(params.import_map.name, "systemjs");
        assert_eq!(params.import_map.type_, ImportMapType::Module);
        assert!(params.import_map_overrides.enabled);
        assert!(params.import_map_overrides.dev_tools);
        assert_eq!(
            params.preloads,
            vec![Preload {
                import_specifier: Some("@walmart/navbar".into()),
                ..Preload::default()
            }]
        );
    }

    #[test]
    fn wrongly_typed_field_is_a_load_error() {
        let err = merge_default_html_params(json!({ "preloads": "nope" })).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
