//! Render-time view of a page: merged params plus values derived from the loaded import map.
//! Built as a new structure; the loaded import map and merged params are left untouched.

use crate::config::types::{
    HtmlTemplateParams, ImportMap, ImportMapType, OverridesParams, PageInitParams, Preload, SystemJsParams,
};
use crate::error::ConfigError;
use serde::Serialize;
use serde_json::Value;
use url::Url;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderImportMap {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ImportMapType,
    pub is_system_js: bool,
    /// Stored map, pretty-printed, with `<` escaped so it cannot close the enclosing script tag.
    pub json: String,
    /// Same-directory `<name>.importmap` URL.
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPreload {
    pub href: String,
    /// Value of the `as` attribute.
    pub as_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossorigin: Option<String>,
}

/// Everything the page template reads.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub locale: String,
    pub title: String,
    pub base_href: String,
    pub favicon: Option<String>,
    pub import_map: RenderImportMap,
    pub preloads: Vec<RenderPreload>,
    #[serde(rename = "systemJS")]
    pub system_js: SystemJsParams,
    pub import_map_overrides: OverridesParams,
    pub page_init: PageInitParams,
}

impl RenderContext {
    /// Derive the render context. Fails on the first preload whose specifier is not in the map.
    pub fn build(
        params: &HtmlTemplateParams,
        raw_import_map: &Value,
        import_map: &ImportMap,
        request_url: &Url,
    ) -> Result<Self, ConfigError> {
        let json = serde_json::to_string_pretty(raw_import_map)
            .map_err(|e| ConfigError::Load(format!("serialize import map: {}", e)))?
            .replace('<', "\\u003c");
        let url = request_url
            .join(&format!("./{}.importmap", params.import_map.name))
            .map_err(|e| ConfigError::Load(format!("import map url: {}", e)))?;

        let preloads = params
            .preloads
            .iter()
            .map(|p| resolve_preload(p, import_map))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        Ok(RenderContext {
            locale: params.locale.clone(),
            title: params.title.clone(),
            base_href: params.base_href.clone(),
            favicon: params.favicon.clone(),
            import_map: RenderImportMap {
                name: params.import_map.name.clone(),
                type_: params.import_map.type_,
                is_system_js: params.import_map.type_ == ImportMapType::Systemjs,
                json,
                url: url.to_string(),
            },
            preloads,
            system_js: params.system_js.clone(),
            import_map_overrides: params.import_map_overrides.clone(),
            page_init: params.page_init.clone(),
        })
    }
}

/// Preloads with neither a specifier nor an href resolve to `None` and are skipped.
fn resolve_preload(preload: &Preload, import_map: &ImportMap) -> Result<Option<RenderPreload>, ConfigError> {
    let href = match preload.specifier() {
        Some(specifier) => import_map
            .resolve(specifier)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingPreload(specifier.to_string()))?,
        None => match &preload.href {
            Some(href) => href.clone(),
            None => return Ok(None),
        },
    };
    Ok(Some(RenderPreload {
        href,
        as_type: preload.as_.clone(),
        crossorigin: preload.crossorigin.clone(),
    }))
}
