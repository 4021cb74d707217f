//! Port definitions: traits that device integrations implement.
//!
//! Ports are the boundary between the gateway core and the device
//! abstractions. They live here (in `app`) so that both the core and the
//! integration adapters can depend on them without circular dependencies.

pub mod device;
pub mod integration;

pub use device::{
    BinarySensorDevice, Device, FanDevice, LightDevice, SensorDevice, StateCallbacks,
    StateListener, SwitchDevice,
};
pub use integration::Integration;
