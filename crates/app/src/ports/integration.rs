//! Integration port: lifecycle of a source of devices.
//!
//! An integration bridges some device backend (virtual, GPIO, I²C, …) into
//! the gateway. It registers its devices once at startup and may run
//! background work (polling, simulation) that publishes state changes
//! through the devices' own listeners.

use nodeweb_domain::error::ValidationError;

use crate::gateway::Gateway;

/// A pluggable device integration.
///
/// The binary crate calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup): register devices with the gateway
/// 2. [`start_background`](Self::start_background): spawn long-running tasks
/// 3. (the server runs)
/// 4. [`teardown`](Self::teardown): stop background tasks
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"virtual"`).
    fn name(&self) -> &'static str;

    /// Register every device this integration provides.
    ///
    /// # Errors
    ///
    /// Returns the first registration failure (empty or duplicate id).
    fn setup(&mut self, gateway: &Gateway) -> Result<(), ValidationError>;

    /// Spawn background work. Must return immediately.
    fn start_background(&mut self) {}

    /// Stop anything started by [`start_background`](Self::start_background).
    fn teardown(&mut self) {}
}
