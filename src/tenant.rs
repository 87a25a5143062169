//! Tenant settings resolution and per-environment hosting mode.

use crate::config::TenantSettings;
use crate::error::{AppError, ConfigError};
use crate::store::{org_settings_key, KvStore};

/// Where bundles for one tenant environment are fetched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostingMode {
    /// Platform-managed storage origin.
    Managed,
    /// Tenant-owned origin; `host` is used verbatim as URL prefix.
    SelfHosted { host: String },
}

impl TenantSettings {
    /// Hosting mode for an environment. Unknown environments and self-hosting without a host are managed.
    pub fn hosting(&self, environment: &str) -> HostingMode {
        match self.static_files.microfrontend_proxy.environments.get(environment) {
            Some(env) if !env.use_managed_hosting => match env.host.as_deref().filter(|h| !h.is_empty()) {
                Some(host) => HostingMode::SelfHosted { host: host.to_string() },
                None => {
                    tracing::warn!(environment, "self-hosting configured without host, using managed hosting");
                    HostingMode::Managed
                }
            },
            _ => HostingMode::Managed,
        }
    }
}

/// Load settings for a tenant. An absent document is not an error: it yields `exists = false` with defaults.
pub async fn resolve_settings(store: &dyn KvStore, tenant_key: &str) -> Result<TenantSettings, AppError> {
    let Some(doc) = store.get(&org_settings_key(tenant_key)).await? else {
        tracing::debug!(tenant = tenant_key, "no stored settings");
        return Ok(TenantSettings::missing());
    };
    let mut settings: TenantSettings = serde_json::from_value(doc)
        .map_err(|e| ConfigError::Load(format!("settings for tenant {}: {}", tenant_key, e)))?;
    settings.exists = true;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKvStore;
    use serde_json::json;

    #[tokio::test]
    async fn missing_tenant_resolves_soft() {
        let store = MemoryKvStore::new();
        let settings = resolve_settings(&store, "walmart").await.unwrap();
        assert!(!settings.exists);
        assert_eq!(settings.cors.allow_origins, vec!["*"]);
        assert_eq!(settings.hosting("prod"), HostingMode::Managed);
    }

    #[tokio::test]
    async fn stored_tenant_merges_defaults() {
        let store = MemoryKvStore::with_entries([(
            "org-settings-walmart",
            json!({
                "staticFiles": { "microfrontendProxy": { "environments": {
                    "prod": { "useBaseplateHosting": false, "host": "https://cdn.walmart.com/" },
                    "stage": { "useBaseplateHosting": true, "host": "https://ignored.example.com/" },
                    "dev": { "useBaseplateHosting": false }
                } } }
            }),
        )]);
        let settings = resolve_settings(&store, "walmart").await.unwrap();
        assert!(settings.exists);
        assert_eq!(settings.cors.max_age, 7200);
        assert_eq!(
            settings.hosting("prod"),
            HostingMode::SelfHosted {
                host: "https://cdn.walmart.com/".into()
            }
        );
        assert_eq!(settings.hosting("stage"), HostingMode::Managed);
        assert_eq!(settings.hosting("dev"), HostingMode::Managed);
        assert_eq!(settings.hosting("qa"), HostingMode::Managed);
    }

    #[tokio::test]
    async fn undecodable_settings_are_a_config_error() {
        let store = MemoryKvStore::with_entries([("org-settings-acme", json!({ "cors": "everything" }))]);
        let err = resolve_settings(&store, "acme").await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Load(_))));
    }
}
