//! Import map validation: document shape and preload references. Errors are collected, not short-circuited.

use crate::config::types::{ImportMap, Preload};
use crate::error::ConfigError;
use serde_json::Value;

const KNOWN_PROPERTIES: [&str; 3] = ["imports", "scopes", "integrity"];

/// Check a stored import map. An empty list means the map is valid.
pub fn verify_import_map(import_map: Option<&Value>) -> Vec<String> {
    let Some(import_map) = import_map else {
        return vec!["import map does not exist".to_string()];
    };
    let Some(obj) = import_map.as_object() else {
        return vec![format!("import map must be a JSON object, got {}", json_kind(import_map))];
    };

    let mut errors = Vec::new();
    for key in obj.keys() {
        if !KNOWN_PROPERTIES.contains(&key.as_str()) {
            tracing::warn!(property = %key, "ignoring unknown import map property");
        }
    }

    match obj.get("imports") {
        None => errors.push("import map is missing the 'imports' property".to_string()),
        Some(imports) => verify_specifier_map("imports", imports, &mut errors),
    }

    if let Some(scopes) = obj.get("scopes") {
        match scopes.as_object() {
            None => errors.push(format!("'scopes' must be an object, got {}", json_kind(scopes))),
            Some(scopes) => {
                for (scope, map) in scopes {
                    verify_specifier_map(&format!("scopes[\"{}\"]", scope), map, &mut errors);
                }
            }
        }
    }

    if let Some(integrity) = obj.get("integrity") {
        verify_specifier_map("integrity", integrity, &mut errors);
    }

    errors
}

/// The stored map if it verifies, else every verification error.
pub fn validated_import_map(import_map: Option<Value>) -> Result<Value, ConfigError> {
    let errors = verify_import_map(import_map.as_ref());
    match import_map {
        Some(map) if errors.is_empty() => Ok(map),
        _ => Err(ConfigError::Validation(errors)),
    }
}

fn verify_specifier_map(path: &str, map: &Value, errors: &mut Vec<String>) {
    let Some(map) = map.as_object() else {
        errors.push(format!("'{}' must be an object, got {}", path, json_kind(map)));
        return;
    };
    for (specifier, url) in map {
        if !url.is_string() {
            errors.push(format!(
                "{}[\"{}\"] must be a string URL, got {}",
                path,
                specifier,
                json_kind(url)
            ));
        }
    }
}

/// Every preload naming an import specifier must resolve in the map.
pub fn verify_preloads(import_map: &ImportMap, preloads: &[Preload]) -> Vec<String> {
    preloads
        .iter()
        .filter_map(Preload::specifier)
        .filter(|specifier| import_map.resolve(specifier).is_none())
        .map(|specifier| {
            format!(
                "import specifier '{}' cannot be preloaded because it doesn't exist in the import map",
                specifier
            )
        })
        .collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
