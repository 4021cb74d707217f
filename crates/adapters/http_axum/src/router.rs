//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::api::{device, events, index};
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/` serves the index page and `/events` the SSE stream; every other path
/// falls through to the device dispatcher. Includes a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/events", get(events::stream))
        .fallback(device::dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IndexConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use nodeweb_app::gateway::Gateway;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(Gateway::default()),
            IndexConfig {
                name: "testnode".to_string(),
                ..IndexConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn should_serve_html_index() {
        let app = build(test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("testnode Web Server"));
    }

    #[tokio::test]
    async fn should_serve_event_stream() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unrouted_path() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
