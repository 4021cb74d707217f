//! Virtual numeric sensor: holds the last published reading.

use std::sync::{Mutex, PoisonError};

use nodeweb_app::ports::{Device, SensorDevice, StateCallbacks, StateListener};
use nodeweb_domain::snapshot::{SensorSnapshot, Snapshot};

/// A simulated sensor such as a thermometer.
///
/// Sensors are read-only over HTTP; their owner pushes readings with
/// [`publish_state`](Self::publish_state).
pub struct VirtualSensor {
    id: String,
    name: String,
    unit: Option<String>,
    accuracy_decimals: u8,
    value: Mutex<f64>,
    callbacks: StateCallbacks,
}

impl VirtualSensor {
    /// Create a sensor with no reading yet (NaN).
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: None,
            accuracy_decimals: 0,
            value: Mutex::new(f64::NAN),
            callbacks: StateCallbacks::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_accuracy_decimals(mut self, decimals: u8) -> Self {
        self.accuracy_decimals = decimals;
        self
    }

    /// Record a new reading and notify listeners.
    pub fn publish_state(&self, value: f64) {
        self.callbacks.update(|| {
            *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value;
            Snapshot::Sensor(self.snapshot())
        });
    }
}

impl Device for VirtualSensor {
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

impl SensorDevice for VirtualSensor {
    fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            value: *self.value.lock().unwrap_or_else(PoisonError::into_inner),
            accuracy_decimals: self.accuracy_decimals,
            unit: self.unit.clone(),
        }
    }
}
