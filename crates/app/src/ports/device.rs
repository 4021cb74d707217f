//! Device ports: the traits every device abstraction implements.
//!
//! The gateway never owns device logic. Integrations (virtual, GPIO, …)
//! implement these traits and hand shared [`Arc`] handles to the registry;
//! the embedding application keeps them alive for the life of the process.

use std::sync::{Arc, Mutex, PoisonError};

use nodeweb_domain::command::{FanCall, LightCall};
use nodeweb_domain::snapshot::{FanSnapshot, LightSnapshot, SensorSnapshot, Snapshot};

/// Listener invoked with the new snapshot after every state change.
pub type StateListener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Capabilities shared by every device.
pub trait Device: Send + Sync {
    /// Identifier, unique within the device's domain (e.g. `lr_lamp`).
    fn id(&self) -> &str;

    /// Human-readable name shown on the index page.
    fn name(&self) -> &str;

    /// Register a listener for state changes.
    ///
    /// Implementations must call listeners *after* releasing any lock
    /// guarding their own state, and in the order the changes were made;
    /// [`StateCallbacks::update`] provides both.
    fn add_on_state_callback(&self, listener: StateListener);
}

/// A read-only numeric sensor.
pub trait SensorDevice: Device {
    fn snapshot(&self) -> SensorSnapshot;
}

/// A read-only on/off sensor.
pub trait BinarySensorDevice: Device {
    fn state(&self) -> bool;
}

/// An on/off actuator.
pub trait SwitchDevice: Device {
    fn state(&self) -> bool;

    fn turn_on(&self);

    fn turn_off(&self);

    /// Invert the state. The default is not atomic; devices shared across
    /// threads should override it.
    fn toggle(&self) {
        if self.state() {
            self.turn_off();
        } else {
            self.turn_on();
        }
    }
}

/// A fan with optional speed and oscillation.
pub trait FanDevice: Device {
    fn snapshot(&self) -> FanSnapshot;

    /// Apply a command; settings the fan does not support are ignored.
    fn control(&self, call: FanCall);
}

/// A light with optional brightness, color, white channel and effects.
pub trait LightDevice: Device {
    fn snapshot(&self) -> LightSnapshot;

    /// Apply a command; settings the light does not support are ignored.
    fn control(&self, call: LightCall);
}

/// Listener list a device embeds to implement
/// [`Device::add_on_state_callback`].
///
/// Listeners are invoked outside the listener lock, so a listener may
/// register further listeners or read the device without deadlocking.
#[derive(Default)]
pub struct StateCallbacks {
    listeners: Mutex<Vec<StateListener>>,
    order: Mutex<()>,
}

impl StateCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener.
    pub fn add(&self, listener: StateListener) {
        self.lock().push(listener);
    }

    /// Invoke every listener with `snapshot`, in registration order.
    pub fn call(&self, snapshot: &Snapshot) {
        let listeners = self.lock().clone();
        for listener in &listeners {
            listener(snapshot);
        }
    }

    /// Run `write` and notify listeners with the snapshot it returns.
    ///
    /// Updates are serialized: a second update waits until the first one has
    /// notified every listener, so listeners see changes in write order.
    /// `write` should take and release the device's state lock itself; a
    /// listener must not start another update on the same device.
    pub fn update<F>(&self, write: F)
    where
        F: FnOnce() -> Snapshot,
    {
        let _order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = write();
        self.call(&snapshot);
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StateListener>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StateCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCallbacks")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn should_call_every_listener_with_snapshot() {
        let callbacks = StateCallbacks::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let hits = Arc::clone(&hits);
            callbacks.add(Arc::new(move |snapshot: &Snapshot| {
                assert_eq!(snapshot, &Snapshot::Switch(true));
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }

        callbacks.call(&Snapshot::Switch(true));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn should_allow_listener_to_register_another_listener() {
        let callbacks = Arc::new(StateCallbacks::new());
        let inner = Arc::clone(&callbacks);
        callbacks.add(Arc::new(move |_: &Snapshot| {
            inner.add(Arc::new(|_: &Snapshot| {}));
        }));

        callbacks.call(&Snapshot::BinarySensor(false));
        assert_eq!(callbacks.len(), 2);
    }

    #[test]
    fn should_notify_updates_in_write_order_when_writers_race() {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let callbacks = Arc::new(StateCallbacks::new());
        let state = Arc::new(Mutex::new(false));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);

        let sink = Arc::clone(&seen);
        callbacks.add(Arc::new(move |snapshot: &Snapshot| {
            // hold the first writer between its write and its notification
            if snapshot == &Snapshot::Switch(true) {
                entered_tx.send(()).unwrap();
                release_rx.lock().unwrap().recv().unwrap();
            }
            sink.lock().unwrap().push(snapshot.clone());
        }));

        let write = |callbacks: &StateCallbacks, state: &Mutex<bool>, on: bool| {
            callbacks.update(|| {
                *state.lock().unwrap() = on;
                Snapshot::Switch(on)
            });
        };

        let first = {
            let (callbacks, state) = (Arc::clone(&callbacks), Arc::clone(&state));
            thread::spawn(move || write(&callbacks, &state, true))
        };
        entered_rx.recv().unwrap();
        let second = {
            let (callbacks, state) = (Arc::clone(&callbacks), Arc::clone(&state));
            thread::spawn(move || write(&callbacks, &state, false))
        };
        thread::sleep(Duration::from_millis(20));
        release_tx.send(()).unwrap();
        first.join().unwrap();
        second.join().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![Snapshot::Switch(true), Snapshot::Switch(false)]);
        assert_eq!(seen.last(), Some(&Snapshot::Switch(*state.lock().unwrap())));
    }

    #[test]
    fn should_start_empty() {
        assert!(StateCallbacks::new().is_empty());
    }
}
