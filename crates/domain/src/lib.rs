//! # nodeweb-domain
//!
//! Pure domain model for the nodeweb device gateway.
//!
//! ## Responsibilities
//! - Name the five device **domains** (`sensor`, `switch`, `binary_sensor`,
//!   `fan`, `light`) and their URL prefixes
//! - Parse request paths into a `(domain, id, method)` [`UrlMatch`](url_match::UrlMatch)
//! - Describe device **snapshots** and the **commands** actuators accept
//! - Render snapshots into the canonical wire [`Record`](record::Record)
//! - Define the error taxonomy shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Device behaviour, registries and transports live in `nodeweb-app` and
//! the adapter crates.

pub mod command;
pub mod domain;
pub mod error;
pub mod record;
pub mod snapshot;
pub mod url_match;
