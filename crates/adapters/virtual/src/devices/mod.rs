mod binary_sensor;
mod fan;
mod light;
mod sensor;
mod switch;

pub use binary_sensor::VirtualBinarySensor;
pub use fan::VirtualFan;
pub use light::VirtualLight;
pub use sensor::VirtualSensor;
pub use switch::VirtualSwitch;
