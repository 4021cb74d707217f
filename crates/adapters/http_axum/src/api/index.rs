//! Index page: a static HTML overview of the registered devices.

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use nodeweb_app::handle::DeviceHandle;
use nodeweb_domain::domain::Domain;

use crate::state::{AppState, IndexConfig};

/// One device line of the index table.
pub struct IndexRow {
    domain: &'static str,
    id: String,
    name: String,
    commandable: bool,
}

/// Index page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    name: String,
    css_url: String,
    js_url: String,
    domains: String,
    rows: Vec<IndexRow>,
}

impl IntoResponse for IndexTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "index template rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// `GET /`: device table plus the configured stylesheet and script.
///
/// The page is static; the script is expected to fill the state column from
/// `/events`.
pub async fn index(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate::new(&state.index, &state.gateway.registry().all())
}

impl IndexTemplate {
    /// Build the page for `devices`, which are in registry order.
    #[must_use]
    pub fn new(config: &IndexConfig, devices: &[DeviceHandle]) -> Self {
        Self {
            name: config.name.clone(),
            css_url: config.css_url().to_string(),
            js_url: config.js_url().to_string(),
            domains: Domain::ALL.map(Domain::as_str).join(", "),
            rows: devices
                .iter()
                .map(|device| IndexRow {
                    domain: device.domain().as_str(),
                    id: device.id().to_string(),
                    name: device.name().to_string(),
                    commandable: device.domain().accepts_commands(),
                })
                .collect(),
        }
    }
}
