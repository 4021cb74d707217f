//! # nodeweb-adapter-virtual
//!
//! Virtual/demo integration that provides simulated devices for testing and
//! demonstration purposes.
//!
//! ## Provided devices
//!
//! | Device | Path | Behaviour |
//! |--------|------|-----------|
//! | Outdoor Temperature | `/sensor/outdoor_temp` | Reading in °C, drifts on every background tick |
//! | Living Room Lamp | `/switch/lr_lamp` | Responds to `turn_on` / `turn_off` / `toggle` |
//! | Front Door | `/binary_sensor/front_door` | Opens and closes every few background ticks |
//! | Ceiling Fan | `/fan/ceiling_fan` | Speed and oscillation |
//! | Desk Light | `/light/desk_light` | Brightness, colour, white value, effect |
//!
//! ## Dependency rule
//!
//! Depends on `nodeweb-app` (port traits) and `nodeweb-domain` only.

mod devices;

use std::sync::Arc;
use std::time::Duration;

use nodeweb_app::gateway::Gateway;
use nodeweb_app::handle::DeviceHandle;
use nodeweb_app::ports::Integration;
use nodeweb_domain::error::ValidationError;
use tokio::task::JoinHandle;

pub use devices::{VirtualBinarySensor, VirtualFan, VirtualLight, VirtualSensor, VirtualSwitch};

/// Default period between simulated sensor updates.
pub const DEFAULT_SENSOR_INTERVAL: Duration = Duration::from_secs(10);

const BASE_TEMPERATURE: f64 = 21.5;
const DRIFT_PERIOD: u32 = 20;
const DOOR_PERIOD: u32 = 6;

/// Virtual integration that creates simulated devices.
pub struct VirtualIntegration {
    sensor: Arc<VirtualSensor>,
    switch: Arc<VirtualSwitch>,
    door: Arc<VirtualBinarySensor>,
    fan: Arc<VirtualFan>,
    light: Arc<VirtualLight>,
    sensor_interval: Duration,
    background: Option<JoinHandle<()>>,
}

impl Default for VirtualIntegration {
    fn default() -> Self {
        Self::new(DEFAULT_SENSOR_INTERVAL)
    }
}

impl VirtualIntegration {
    /// Create the demo devices. A zero `sensor_interval` disables the
    /// background simulation.
    #[must_use]
    pub fn new(sensor_interval: Duration) -> Self {
        let sensor = VirtualSensor::new("outdoor_temp", "Outdoor Temperature")
            .with_unit("\u{b0}C")
            .with_accuracy_decimals(1);
        sensor.publish_state(BASE_TEMPERATURE);

        Self {
            sensor: Arc::new(sensor),
            switch: Arc::new(VirtualSwitch::new("lr_lamp", "Living Room Lamp")),
            door: Arc::new(VirtualBinarySensor::new("front_door", "Front Door")),
            fan: Arc::new(VirtualFan::new("ceiling_fan", "Ceiling Fan")),
            light: Arc::new(VirtualLight::new("desk_light", "Desk Light")),
            sensor_interval,
            background: None,
        }
    }

    #[must_use]
    pub fn sensor(&self) -> &Arc<VirtualSensor> {
        &self.sensor
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.background
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Integration for VirtualIntegration {
    fn name(&self) -> &'static str {
        "virtual"
    }

    fn setup(&mut self, gateway: &Gateway) -> Result<(), ValidationError> {
        gateway.register(DeviceHandle::sensor(Arc::clone(&self.sensor)))?;
        gateway.register(DeviceHandle::switch(Arc::clone(&self.switch)))?;
        gateway.register(DeviceHandle::binary_sensor(Arc::clone(&self.door)))?;
        gateway.register(DeviceHandle::fan(Arc::clone(&self.fan)))?;
        gateway.register(DeviceHandle::light(Arc::clone(&self.light)))?;
        tracing::info!(integration = self.name(), devices = 5, "virtual devices registered");
        Ok(())
    }

    fn start_background(&mut self) {
        if self.sensor_interval.is_zero() || self.background.is_some() {
            return;
        }

        let sensor = Arc::clone(&self.sensor);
        let door = Arc::clone(&self.door);
        let period = self.sensor_interval;
        self.background = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            let mut tick: u32 = 0;
            loop {
                ticker.tick().await;
                tick = tick.wrapping_add(1);
                sensor.publish_state(drifted_temperature(tick));
                if tick % DOOR_PERIOD == 0 {
                    door.publish_state((tick / DOOR_PERIOD) % 2 == 1);
                }
            }
        }));
        tracing::debug!(period_ms = period.as_millis(), "virtual simulation started");
    }

    fn teardown(&mut self) {
        if let Some(task) = self.background.take() {
            task.abort();
            tracing::debug!("virtual simulation stopped");
        }
    }
}

/// Triangle wave around the base temperature, in tenths of a degree.
fn drifted_temperature(tick: u32) -> f64 {
    let phase = tick % DRIFT_PERIOD;
    let offset = if phase <= DRIFT_PERIOD / 2 {
        phase
    } else {
        DRIFT_PERIOD - phase
    };
    BASE_TEMPERATURE + f64::from(offset) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeweb_app::ports::SensorDevice;
    use nodeweb_domain::command::CommandParams;
    use nodeweb_domain::domain::Domain;
    use nodeweb_domain::record::RecordValue;

    fn gateway_with_devices() -> (Gateway, VirtualIntegration) {
        let gateway = Gateway::default();
        let mut integration = VirtualIntegration::default();
        integration.setup(&gateway).unwrap();
        (gateway, integration)
    }

    #[test]
    fn should_return_virtual_as_name() {
        assert_eq!(VirtualIntegration::default().name(), "virtual");
    }

    #[test]
    fn should_register_one_device_per_domain_on_setup() {
        let (gateway, _integration) = gateway_with_devices();
        assert_eq!(gateway.registry().len(), 5);
        for domain in Domain::ALL {
            assert_eq!(gateway.registry().list(domain).len(), 1, "{domain}");
        }
    }

    #[test]
    fn should_fail_when_setup_runs_twice_on_same_gateway() {
        let (gateway, mut integration) = gateway_with_devices();
        let err = integration.setup(&gateway).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { .. }));
    }

    #[test]
    fn should_expose_initial_temperature() {
        let (gateway, _integration) = gateway_with_devices();
        let record = gateway
            .handle("/sensor/outdoor_temp", &CommandParams::new())
            .unwrap();
        assert_eq!(record.state, "21.5 \u{b0}C");
        assert_eq!(record.value, RecordValue::Number(21.5));
    }

    #[test]
    fn should_turn_on_lamp_through_gateway() {
        let (gateway, _integration) = gateway_with_devices();
        let record = gateway
            .handle("/switch/lr_lamp/turn_on", &CommandParams::new())
            .unwrap();
        assert_eq!(record.state, "ON");
    }

    #[test]
    fn should_drift_within_one_degree_of_base() {
        for tick in 0..=2 * DRIFT_PERIOD {
            let value = drifted_temperature(tick);
            assert!((BASE_TEMPERATURE..=BASE_TEMPERATURE + 1.0).contains(&value));
        }
        assert!(drifted_temperature(1) > BASE_TEMPERATURE);
        assert!((drifted_temperature(DRIFT_PERIOD) - BASE_TEMPERATURE).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn should_publish_sensor_updates_when_background_runs() {
        let (gateway, mut integration) = gateway_with_devices();
        let mut rx = gateway.subscribe();
        while rx.try_recv().is_ok() {}

        integration.start_background();
        assert!(integration.is_running());
        tokio::time::sleep(DEFAULT_SENSOR_INTERVAL * 2).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.domain, Domain::Sensor);
        assert!(integration.sensor().snapshot().value > BASE_TEMPERATURE);

        integration.teardown();
        assert!(!integration.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_spawn_when_interval_is_zero() {
        let gateway = Gateway::default();
        let mut integration = VirtualIntegration::new(Duration::ZERO);
        integration.setup(&gateway).unwrap();
        integration.start_background();
        assert!(!integration.is_running());
    }
}
