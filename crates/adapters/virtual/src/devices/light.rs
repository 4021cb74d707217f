//! Virtual light: brightness, RGB colour, white channel and effects.

use std::sync::{Mutex, MutexGuard, PoisonError};

use nodeweb_app::ports::{Device, LightDevice, StateCallbacks, StateListener};
use nodeweb_domain::command::{Command, LightCall};
use nodeweb_domain::snapshot::{LightSnapshot, Snapshot};

/// A simulated dimmable RGBW light.
///
/// Transitions and flashes are accepted but applied instantly; the new
/// target state is reported right away.
pub struct VirtualLight {
    id: String,
    name: String,
    state: Mutex<LightSnapshot>,
    callbacks: StateCallbacks,
}

impl VirtualLight {
    /// Create a light that starts off at full brightness.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: Mutex::new(LightSnapshot {
                brightness: Some(u8::MAX),
                ..LightSnapshot::default()
            }),
            callbacks: StateCallbacks::new(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, LightSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Device for VirtualLight {
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

impl LightDevice for VirtualLight {
    fn snapshot(&self) -> LightSnapshot {
        self.lock_state().clone()
    }

    fn control(&self, call: LightCall) {
        self.callbacks.update(|| {
            let snapshot = {
                let mut state = self.lock_state();
                state.on = call.command.apply(state.on);
                if call.command != Command::TurnOff {
                    if let Some(brightness) = call.brightness {
                        state.brightness = Some(brightness);
                    }
                    if let Some(color) = call.color {
                        state.color = Some(color);
                    }
                    if let Some(white) = call.white_value {
                        state.white_value = Some(white);
                    }
                    if let Some(effect) = call.effect {
                        state.effect = Some(effect);
                    }
                }
                state.clone()
            };
            tracing::debug!(
                id = %self.id,
                on = snapshot.on,
                transition_ms = call.transition_ms,
                flash_ms = call.flash_ms,
                "virtual light controlled"
            );
            Snapshot::Light(snapshot)
        });
    }
}
