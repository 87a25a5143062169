//! Page rendering. The handlers only assemble a `RenderContext`; markup lives in the template.

use crate::config::RenderContext;
use crate::error::AppError;
use handlebars::Handlebars;

/// Built-in page template.
pub const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html.hbs");

const TEMPLATE_NAME: &str = "index";

pub trait TemplateRenderer: Send + Sync {
    fn render(&self, context: &RenderContext) -> Result<String, AppError>;
}

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Renderer for the built-in template.
    pub fn new() -> Result<Self, AppError> {
        Self::with_template(INDEX_TEMPLATE)
    }

    pub fn with_template(template: &str) -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| AppError::Render(format!("template compilation error: {}", e)))?;
        Ok(HandlebarsRenderer { registry })
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, context: &RenderContext) -> Result<String, AppError> {
        self.registry
            .render(TEMPLATE_NAME, context)
            .map_err(|e| AppError::Render(format!("template rendering error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HtmlTemplateParams, ImportMap, ImportMapType, PageInitParams, Preload};
    use serde_json::json;
    use url::Url;

    fn context(type_: ImportMapType) -> RenderContext {
        let raw = json!({ "imports": { "@org/root-config": "https://cdn.example.com/root.js" } });
        let map: ImportMap = serde_json::from_value(raw.clone()).unwrap();
        let mut params = HtmlTemplateParams::default();
        params.title = "Shop <Home>".into();
        params.import_map.type_ = type_;
        params.page_init = PageInitParams {
            entry_module: Some("@org/root-config".into()),
        };
        params.preloads = vec![Preload {
            import_specifier: Some("@org/root-config".into()),
            crossorigin: Some("anonymous".into()),
            ..Preload::default()
        }];
        let url = Url::parse("https://example.com/org/index.html").unwrap();
        RenderContext::build(&params, &raw, &map, &url).unwrap()
    }

    #[test]
    fn renders_systemjs_page() {
        let html = HandlebarsRenderer::new().unwrap().render(&context(ImportMapType::Systemjs)).unwrap();
        assert!(html.contains("<title>Shop &lt;Home&gt;</title>"));
        assert!(html.contains(r#"<script type="systemjs-importmap">"#));
        assert!(html.contains(r#""@org/root-config": "https://cdn.example.com/root.js""#));
        assert!(html.contains(r#"<link rel="preload" href="https://cdn.example.com/root.js" as="script" crossorigin="anonymous">"#));
        assert!(html.contains("https://example.com/org/systemjs.importmap"));
        assert!(html.contains(r#"System.import("@org/root-config");"#));
        assert!(html.contains("system.min.js"));
    }

    #[test]
    fn renders_native_module_page() {
        let html = HandlebarsRenderer::new().unwrap().render(&context(ImportMapType::Module)).unwrap();
        assert!(html.contains(r#"<script type="importmap">"#));
        assert!(!html.contains("systemjs-importmap"));
        assert!(!html.contains("system.min.js"));
        assert!(html.contains(r#"import "@org/root-config";"#));
    }

    #[test]
    fn broken_template_is_rejected() {
        assert!(matches!(
            HandlebarsRenderer::with_template("{{#if}}"),
            Err(AppError::Render(_))
        ));
    }
}
