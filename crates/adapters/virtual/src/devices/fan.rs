//! Virtual fan with speed and oscillation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use nodeweb_app::ports::{Device, FanDevice, StateCallbacks, StateListener};
use nodeweb_domain::command::FanCall;
use nodeweb_domain::snapshot::{FanSnapshot, FanSpeed, Snapshot};

pub struct VirtualFan {
    id: String,
    name: String,
    state: Mutex<FanSnapshot>,
    callbacks: StateCallbacks,
}

impl VirtualFan {
    /// Create a fan that starts off, at speed `off`, not oscillating.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: Mutex::new(FanSnapshot {
                on: false,
                speed: Some(FanSpeed::Off),
                oscillating: Some(false),
            }),
            callbacks: StateCallbacks::new(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FanSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Device for VirtualFan {
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

impl FanDevice for VirtualFan {
    fn snapshot(&self) -> FanSnapshot {
        *self.lock_state()
    }

    fn control(&self, call: FanCall) {
        self.callbacks.update(|| {
            let snapshot = {
                let mut state = self.lock_state();
                state.on = call.command.apply(state.on);
                if let Some(speed) = call.speed {
                    state.speed = Some(speed);
                }
                if let Some(oscillating) = call.oscillating {
                    state.oscillating = Some(oscillating);
                }
                *state
            };
            tracing::debug!(id = %self.id, on = snapshot.on, "virtual fan controlled");
            Snapshot::Fan(snapshot)
        });
    }
}
