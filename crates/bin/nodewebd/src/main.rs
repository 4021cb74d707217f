//! # nodewebd: the nodeweb daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialise `tracing` from the configured filter
//! - Build the [`Gateway`] and let each enabled integration register its devices
//! - Build the axum router, injecting the gateway
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use nodeweb_adapter_http_axum::state::{AppState, IndexConfig};
use nodeweb_adapter_virtual::VirtualIntegration;
use nodeweb_app::gateway::Gateway;
use nodeweb_app::ports::Integration;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|err| {
            eprintln!("invalid log filter {:?}: {err}", config.logging.filter);
            EnvFilter::new("info")
        }))
        .init();

    // Devices
    let gateway = Arc::new(Gateway::new(config.events.buffer));
    let mut integrations: Vec<Box<dyn Integration>> = Vec::new();
    if config.integrations.virtual_enabled {
        integrations.push(Box::new(VirtualIntegration::new(config.sensor_interval())));
    }
    for integration in &mut integrations {
        integration
            .setup(&gateway)
            .with_context(|| format!("setting up {} integration", integration.name()))?;
        integration.start_background();
    }
    tracing::info!(devices = gateway.registry().len(), "devices registered");

    // HTTP
    let state = AppState::new(
        Arc::clone(&gateway),
        IndexConfig {
            name: config.web.name.clone(),
            css_url: config.web.css_url.clone(),
            js_url: config.web.js_url.clone(),
        },
    );
    let app = nodeweb_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "nodewebd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    for integration in &mut integrations {
        integration.teardown();
    }
    tracing::info!("nodewebd stopped");
    Ok(())
}

/// Resolve on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
