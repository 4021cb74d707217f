//! Shared application state for axum handlers.

use std::sync::Arc;

use nodeweb_app::gateway::Gateway;

/// Stylesheet used by the index page when none is configured.
pub const DEFAULT_CSS_URL: &str = "https://esphomelib.com/_static/webserver-v1.min.css";
/// Script used by the index page when none is configured.
pub const DEFAULT_JS_URL: &str = "https://esphomelib.com/_static/webserver-v1.min.js";

/// Presentation settings for the index page.
///
/// The URLs are opaque: they are written into the page as-is and never
/// fetched by the server.
#[derive(Debug, Clone, Default)]
pub struct IndexConfig {
    pub name: String,
    pub css_url: Option<String>,
    pub js_url: Option<String>,
}

impl IndexConfig {
    #[must_use]
    pub fn css_url(&self) -> &str {
        self.css_url.as_deref().unwrap_or(DEFAULT_CSS_URL)
    }

    #[must_use]
    pub fn js_url(&self) -> &str {
        self.js_url.as_deref().unwrap_or(DEFAULT_JS_URL)
    }
}

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so only the `Arc` wrappers are cloned.
pub struct AppState {
    /// Registry, router and broadcaster.
    pub gateway: Arc<Gateway>,
    /// Index page settings.
    pub index: Arc<IndexConfig>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            index: Arc::clone(&self.index),
        }
    }
}

impl AppState {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, index: IndexConfig) -> Self {
        Self {
            gateway,
            index: Arc::new(index),
        }
    }
}
