//! Tagged device handle: one variant per domain.

use std::fmt;
use std::sync::Arc;

use nodeweb_domain::command::{Command, CommandParams, FanCall, LightCall};
use nodeweb_domain::domain::Domain;
use nodeweb_domain::error::GatewayError;
use nodeweb_domain::record::Record;
use nodeweb_domain::snapshot::Snapshot;

use crate::ports::{
    BinarySensorDevice, Device, FanDevice, LightDevice, SensorDevice, StateListener, SwitchDevice,
};

/// Shared, non-owning reference to a registered device.
///
/// Dispatch happens on the variant tag; cloning only bumps the reference
/// count.
#[derive(Clone)]
pub enum DeviceHandle {
    Sensor(Arc<dyn SensorDevice>),
    Switch(Arc<dyn SwitchDevice>),
    BinarySensor(Arc<dyn BinarySensorDevice>),
    Fan(Arc<dyn FanDevice>),
    Light(Arc<dyn LightDevice>),
}

impl DeviceHandle {
    pub fn sensor<D: SensorDevice + 'static>(device: Arc<D>) -> Self {
        Self::Sensor(device)
    }

    pub fn switch<D: SwitchDevice + 'static>(device: Arc<D>) -> Self {
        Self::Switch(device)
    }

    pub fn binary_sensor<D: BinarySensorDevice + 'static>(device: Arc<D>) -> Self {
        Self::BinarySensor(device)
    }

    pub fn fan<D: FanDevice + 'static>(device: Arc<D>) -> Self {
        Self::Fan(device)
    }

    pub fn light<D: LightDevice + 'static>(device: Arc<D>) -> Self {
        Self::Light(device)
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Sensor(_) => Domain::Sensor,
            Self::Switch(_) => Domain::Switch,
            Self::BinarySensor(_) => Domain::BinarySensor,
            Self::Fan(_) => Domain::Fan,
            Self::Light(_) => Domain::Light,
        }
    }

    fn device(&self) -> &dyn Device {
        match self {
            Self::Sensor(d) => d.as_ref(),
            Self::Switch(d) => d.as_ref(),
            Self::BinarySensor(d) => d.as_ref(),
            Self::Fan(d) => d.as_ref(),
            Self::Light(d) => d.as_ref(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.device().id()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.device().name()
    }

    pub fn add_on_state_callback(&self, listener: StateListener) {
        self.device().add_on_state_callback(listener);
    }

    /// Current value of the device.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        match self {
            Self::Sensor(d) => Snapshot::Sensor(d.snapshot()),
            Self::Switch(d) => Snapshot::Switch(d.state()),
            Self::BinarySensor(d) => Snapshot::BinarySensor(d.state()),
            Self::Fan(d) => Snapshot::Fan(d.snapshot()),
            Self::Light(d) => Snapshot::Light(d.snapshot()),
        }
    }

    /// Current value rendered as the wire record.
    #[must_use]
    pub fn record(&self) -> Record {
        Record::from_snapshot(self.id(), &self.snapshot())
    }

    /// Run `command` against the device.
    ///
    /// Returns once the device has accepted the command; its change
    /// notification has already fired by then.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::UnsupportedMethod`] for read-only domains.
    /// - [`GatewayError::Validation`] when a fan or light parameter is malformed.
    pub fn execute(&self, command: Command, params: &CommandParams) -> Result<(), GatewayError> {
        match self {
            Self::Switch(d) => match command {
                Command::TurnOn => d.turn_on(),
                Command::TurnOff => d.turn_off(),
                Command::Toggle => d.toggle(),
            },
            Self::Fan(d) => d.control(FanCall::from_params(command, params)?),
            Self::Light(d) => d.control(LightCall::from_params(command, params)?),
            Self::Sensor(_) | Self::BinarySensor(_) => {
                return Err(GatewayError::UnsupportedMethod {
                    domain: self.domain(),
                    method: command.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("domain", &self.domain())
            .field("id", &self.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubFan, StubSensor, StubSwitch};
    use nodeweb_domain::snapshot::FanSpeed;

    #[test]
    fn should_report_domain_and_id() {
        let handle = DeviceHandle::switch(StubSwitch::new("lr_lamp"));
        assert_eq!(handle.domain(), Domain::Switch);
        assert_eq!(handle.id(), "lr_lamp");
    }

    #[test]
    fn should_toggle_switch() {
        let handle = DeviceHandle::switch(StubSwitch::new("lr_lamp"));
        handle
            .execute(Command::Toggle, &CommandParams::new())
            .unwrap();
        assert_eq!(handle.snapshot(), Snapshot::Switch(true));
    }

    #[test]
    fn should_reject_command_on_sensor() {
        let handle = DeviceHandle::sensor(StubSensor::new("outdoor_temp", 20.0));
        let err = handle
            .execute(Command::TurnOn, &CommandParams::new())
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UnsupportedMethod {
                domain: Domain::Sensor,
                ..
            }
        ));
    }

    #[test]
    fn should_pass_fan_parameters_through() {
        let fan = StubFan::new("ceiling");
        let handle = DeviceHandle::fan(Arc::clone(&fan));
        let params: CommandParams = [("speed", "low")].into_iter().collect();

        handle.execute(Command::TurnOn, &params).unwrap();

        let snapshot = fan.snapshot();
        assert!(snapshot.on);
        assert_eq!(snapshot.speed, Some(FanSpeed::Low));
    }

    #[test]
    fn should_reject_malformed_fan_parameter() {
        let handle = DeviceHandle::fan(StubFan::new("ceiling"));
        let params: CommandParams = [("oscillation", "sometimes")].into_iter().collect();
        let err = handle.execute(Command::TurnOn, &params).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }
}
