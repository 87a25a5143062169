//! Stored document types: tenant settings, HTML template parameters and import maps.
//!
//! Stored documents are partial. Every struct carries `#[serde(default)]`, so decoding a
//! stored document is the merge with platform defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-tenant settings from `org-settings-<tenantKey>`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantSettings {
    /// False when no document was stored for the tenant. Never read from the document itself.
    #[serde(skip)]
    pub exists: bool,
    pub cors: CorsSettings,
    pub static_files: StaticFilesSettings,
}

impl TenantSettings {
    /// Defaults for a tenant with no stored settings. Still usable for header decoration.
    pub fn missing() -> Self {
        TenantSettings::default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorsSettings {
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    /// Seconds; zero omits the header.
    pub max_age: u32,
    pub allow_credentials: bool,
}

impl Default for CorsSettings {
    fn default() -> Self {
        CorsSettings {
            allow_origins: vec!["*".into()],
            allow_methods: vec!["GET".into(), "HEAD".into(), "OPTIONS".into()],
            allow_headers: Vec::new(),
            expose_headers: Vec::new(),
            max_age: 7200,
            allow_credentials: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticFilesSettings {
    pub microfrontend_proxy: MicrofrontendProxySettings,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicrofrontendProxySettings {
    /// Keyed by deployment environment (e.g. "prod", "stage").
    pub environments: BTreeMap<String, HostingSettings>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostingSettings {
    #[serde(rename = "useBaseplateHosting")]
    pub use_managed_hosting: bool,
    pub host: Option<String>,
}

impl Default for HostingSettings {
    fn default() -> Self {
        HostingSettings {
            use_managed_hosting: true,
            host: None,
        }
    }
}

/// Import map document. `scopes` and `integrity` are optional in stored maps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportMap {
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, BTreeMap<String, String>>,
    /// Module URL to subresource integrity hash.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub integrity: BTreeMap<String, String>,
}

impl ImportMap {
    /// Resolved URL for a specifier. Empty entries count as absent.
    pub fn resolve(&self, specifier: &str) -> Option<&str> {
        self.imports
            .get(specifier)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}

/// Only `systemjs` changes how the page loads modules; any other stored type renders as a
/// standard import map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMapType {
    #[default]
    Systemjs,
    Module,
    #[serde(other)]
    Standard,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportMapRef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ImportMapType,
}

impl Default for ImportMapRef {
    fn default() -> Self {
        ImportMapRef {
            name: "systemjs".into(),
            type_: ImportMapType::Systemjs,
        }
    }
}

/// Resource hint emitted as `<link rel="preload">`. With `import_specifier` the href comes from the import map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preload {
    pub href: Option<String>,
    #[serde(rename = "as")]
    pub as_: String,
    pub import_specifier: Option<String>,
    pub crossorigin: Option<String>,
}

impl Preload {
    /// Import specifier to resolve. An empty specifier counts as none.
    pub fn specifier(&self) -> Option<&str> {
        self.import_specifier.as_deref().filter(|s| !s.is_empty())
    }
}

impl Default for Preload {
    fn default() -> Self {
        Preload {
            href: None,
            as_: "script".into(),
            import_specifier: None,
            crossorigin: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemJsParams {
    pub url: String,
    pub amd_url: String,
    pub include_amd: bool,
}

impl Default for SystemJsParams {
    fn default() -> Self {
        SystemJsParams {
            url: "https://cdn.jsdelivr.net/npm/systemjs@6.14.3/dist/system.min.js".into(),
            amd_url: "https://cdn.jsdelivr.net/npm/systemjs@6.14.3/dist/extras/amd.min.js".into(),
            include_amd: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverridesParams {
    pub enabled: bool,
    pub url: String,
    pub dev_tools: bool,
}

impl Default for OverridesParams {
    fn default() -> Self {
        OverridesParams {
            enabled: true,
            url: "https://cdn.jsdelivr.net/npm/import-map-overrides@3.1.1/dist/import-map-overrides.js".into(),
            dev_tools: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInitParams {
    /// Specifier imported once the import map is in place (usually the root config).
    pub entry_module: Option<String>,
}

/// Stored page parameters merged with platform defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlTemplateParams {
    pub locale: String,
    pub title: String,
    pub base_href: String,
    pub favicon: Option<String>,
    pub import_map: ImportMapRef,
    pub preloads: Vec<Preload>,
    #[serde(rename = "systemJS")]
    pub system_js: SystemJsParams,
    pub import_map_overrides: OverridesParams,
    pub page_init: PageInitParams,
}

impl Default for HtmlTemplateParams {
    fn default() -> Self {
        HtmlTemplateParams {
            locale: "en-US".into(),
            title: "Microfrontends".into(),
            base_href: "/".into(),
            favicon: None,
            import_map: ImportMapRef::default(),
            preloads: Vec::new(),
            system_js: SystemJsParams::default(),
            import_map_overrides: OverridesParams::default(),
            page_init: PageInitParams::default(),
        }
    }
}
