//! # Swagger UI
//!
//! Renders a standalone Swagger UI page pointing at a served document.

const UI_TEMPLATE: &str = include_str!("../templates/swagger-ui.html");

/// Default page title.
pub const DEFAULT_TITLE: &str = "Swagger UI";

/// Default location of the Swagger UI assets.
pub const DEFAULT_ASSET_SOURCE: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@3.25.0";

/// Renders the page for the document served at `spec_url`.
pub fn generate_swagger_ui(spec_url: &str, title: Option<&str>, asset_source: Option<&str>) -> String {
    let config = [
        ("title", title.unwrap_or(DEFAULT_TITLE)),
        ("asset_source", asset_source.unwrap_or(DEFAULT_ASSET_SOURCE)),
        ("spec_url", spec_url),
    ];
    config
        .iter()
        .fold(UI_TEMPLATE.to_string(), |page, (key, value)| {
            page.replace(&format!("{{{{{}}}}}", key), value)
        })
}
