//! # nodeweb-app
//!
//! Application layer: the request-routing and state-broadcast core, plus
//! the **port definitions** (traits) device integrations implement.
//!
//! ## Responsibilities
//! - Define the device ports: `SensorDevice`, `SwitchDevice`,
//!   `BinarySensorDevice`, `FanDevice`, `LightDevice`
//! - Keep the per-domain `DeviceRegistry`
//! - Dispatch `(domain, id, method)` requests with the `RequestRouter`
//! - Fan state changes out to event-stream clients with the `EventBroadcaster`
//! - Tie the three together in a `Gateway`
//!
//! ## Dependency rule
//! Depends on `nodeweb-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod broadcaster;
pub mod gateway;
pub mod handle;
pub mod ports;
pub mod registry;
pub mod router;

#[cfg(test)]
mod testing;
