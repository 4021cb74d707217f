//! Virtual binary sensor: a contact or motion sensor.

use std::sync::atomic::{AtomicBool, Ordering};

use nodeweb_app::ports::{BinarySensorDevice, Device, StateCallbacks, StateListener};
use nodeweb_domain::snapshot::Snapshot;

/// A simulated on/off sensor, read-only over HTTP.
pub struct VirtualBinarySensor {
    id: String,
    name: String,
    state: AtomicBool,
    callbacks: StateCallbacks,
}

impl VirtualBinarySensor {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: AtomicBool::new(false),
            callbacks: StateCallbacks::new(),
        }
    }

    /// Record a new state and notify listeners.
    pub fn publish_state(&self, on: bool) {
        self.callbacks.update(|| {
            self.state.store(on, Ordering::SeqCst);
            Snapshot::BinarySensor(on)
        });
    }
}

impl Device for VirtualBinarySensor {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn add_on_state_callback(&self, listener: StateListener) {
        self.callbacks.add(listener);
    }
}

impl BinarySensorDevice for VirtualBinarySensor {
    fn state(&self) -> bool {
        self.state.load(Ordering::SeqCst)
    }
}
