//! Virtual switch: responds to `turn_on`, `turn_off`, `toggle`.

use std::sync::{Mutex, PoisonError};

use nodeweb_app::ports::{Device, StateCallbacks, StateListener, SwitchDevice};
use nodeweb_domain::snapshot::Snapshot;

/// A simulated relay that can be turned on and off.
pub struct VirtualSwitch {
    id: String,
    name: String,
    state: Mutex<bool>,
    callbacks: StateCallbacks,
}

impl VirtualSwitch {
    /// Create a switch that starts off.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: Mutex::new(false),
            callbacks: StateCallbacks::new(),
        }
    }

    fn write_state(&self, next: impl FnOnce(bool) -> bool) {
        self.callbacks.update(|| {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = next(*state);
            tracing::debug!(id = %self.id, on = *state, "virtual switch written");
            Snapshot::Switch(*state)
        });
    }
}

impl Device for VirtualSwitch {
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

impl SwitchDevice for VirtualSwitch {
    fn state(&self) -> bool {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn turn_on(&self) {
        self.write_state(|_| true);
    }

    fn turn_off(&self) {
        self.write_state(|_| false);
    }

    fn toggle(&self) {
        self.write_state(|on| !on);
    }
}
