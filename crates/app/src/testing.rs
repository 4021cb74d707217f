//! In-memory devices for unit tests.

use std::sync::{Arc, Mutex};

use nodeweb_domain::command::{Command, FanCall, LightCall};
use nodeweb_domain::snapshot::{FanSnapshot, FanSpeed, LightSnapshot, SensorSnapshot, Snapshot};

use crate::ports::{
    BinarySensorDevice, Device, FanDevice, LightDevice, SensorDevice, StateCallbacks,
    StateListener, SwitchDevice,
};

macro_rules! impl_device {
    ($ty:ty) => {
        impl Device for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.id
            }

            fn add_on_state_callback(&self, listener: StateListener) {
                self.callbacks.add(listener);
            }
        }
    };
}

pub struct StubSensor {
    id: String,
    value: Mutex<f64>,
    callbacks: StateCallbacks,
}

impl StubSensor {
    pub fn new(id: &str, value: f64) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            value: Mutex::new(value),
            callbacks: StateCallbacks::new(),
        })
    }

    pub fn publish(&self, value: f64) {
        *self.value.lock().unwrap() = value;
        self.callbacks.call(&Snapshot::Sensor(self.snapshot()));
    }
}

impl_device!(StubSensor);

impl SensorDevice for StubSensor {
    fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            value: *self.value.lock().unwrap(),
            accuracy_decimals: 1,
            unit: Some("\u{b0}C".to_string()),
        }
    }
}

pub struct StubSwitch {
    id: String,
    on: Mutex<bool>,
    callbacks: StateCallbacks,
}

impl StubSwitch {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            on: Mutex::new(false),
            callbacks: StateCallbacks::new(),
        })
    }

    fn write(&self, on: bool) {
        *self.on.lock().unwrap() = on;
        self.callbacks.call(&Snapshot::Switch(on));
    }
}

impl_device!(StubSwitch);

impl SwitchDevice for StubSwitch {
    fn state(&self) -> bool {
        *self.on.lock().unwrap()
    }

    fn turn_on(&self) {
        self.write(true);
    }

    fn turn_off(&self) {
        self.write(false);
    }
}

pub struct StubBinarySensor {
    id: String,
    callbacks: StateCallbacks,
}

impl StubBinarySensor {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            callbacks: StateCallbacks::new(),
        })
    }
}

impl_device!(StubBinarySensor);

impl BinarySensorDevice for StubBinarySensor {
    fn state(&self) -> bool {
        false
    }
}

pub struct StubFan {
    id: String,
    state: Mutex<FanSnapshot>,
    callbacks: StateCallbacks,
}

impl StubFan {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            state: Mutex::new(FanSnapshot {
                on: false,
                speed: Some(FanSpeed::Off),
                oscillating: Some(false),
            }),
            callbacks: StateCallbacks::new(),
        })
    }
}

impl_device!(StubFan);

impl FanDevice for StubFan {
    fn snapshot(&self) -> FanSnapshot {
        *self.state.lock().unwrap()
    }

    fn control(&self, call: FanCall) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.on = call.command.apply(state.on);
            if let Some(speed) = call.speed {
                state.speed = Some(speed);
            }
            if let Some(oscillating) = call.oscillating {
                state.oscillating = Some(oscillating);
            }
            *state
        };
        self.callbacks.call(&Snapshot::Fan(snapshot));
    }
}

pub struct StubLight {
    id: String,
    state: Mutex<LightSnapshot>,
    callbacks: StateCallbacks,
}

impl StubLight {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            state: Mutex::new(LightSnapshot {
                brightness: Some(255),
                ..LightSnapshot::default()
            }),
            callbacks: StateCallbacks::new(),
        })
    }
}

impl_device!(StubLight);

impl LightDevice for StubLight {
    fn snapshot(&self) -> LightSnapshot {
        self.state.lock().unwrap().clone()
    }

    fn control(&self, call: LightCall) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.on = call.command.apply(state.on);
            if call.command != Command::TurnOff {
                if let Some(brightness) = call.brightness {
                    state.brightness = Some(brightness);
                }
            }
            state.clone()
        };
        self.callbacks.call(&Snapshot::Light(snapshot));
    }
}
