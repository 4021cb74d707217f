//! # nodeweb-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **device endpoints** `/<domain>/<id>[/<command>]` by handing
//!   the path and merged request parameters to the [`Gateway`]
//! - Serve the **event stream** at `/events` as Server-Sent Events
//! - Serve a small **HTML index** at `/` that loads the configured CSS/JS
//! - Map [`GatewayError`]s into status codes with plain-text reason bodies
//!
//! ## Dependency rule
//! Depends on `nodeweb-app` (for the gateway) and `nodeweb-domain` (for the
//! records and errors). Never leaks axum types into the domain.
//!
//! [`Gateway`]: nodeweb_app::gateway::Gateway
//! [`GatewayError`]: nodeweb_domain::error::GatewayError

pub mod api;
pub mod error;
pub mod router;
pub mod state;
