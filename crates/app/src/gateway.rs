//! The gateway: registry, router and broadcaster wired together.
//!
//! The embedding application builds one [`Gateway`], registers its devices
//! through [`Gateway::register`] during initialisation and then hands it to
//! the transport. There is no process-wide controller.

use std::sync::Arc;

use nodeweb_domain::command::CommandParams;
use nodeweb_domain::error::{GatewayError, ValidationError};
use nodeweb_domain::record::Record;
use nodeweb_domain::snapshot::Snapshot;

use crate::broadcaster::{EventBroadcaster, EventStream};
use crate::handle::DeviceHandle;
use crate::registry::DeviceRegistry;
use crate::router::RequestRouter;

/// Default number of live events buffered per event-stream connection.
pub const DEFAULT_EVENT_BUFFER: usize = 32;

/// Owns the device registry, the request router and the event broadcaster.
#[derive(Debug)]
pub struct Gateway {
    registry: Arc<DeviceRegistry>,
    router: RequestRouter,
    broadcaster: Arc<EventBroadcaster>,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER)
    }
}

impl Gateway {
    /// Create an empty gateway; `event_buffer` sizes each stream connection.
    #[must_use]
    pub fn new(event_buffer: usize) -> Self {
        let registry = Arc::new(DeviceRegistry::new());
        Self {
            router: RequestRouter::new(Arc::clone(&registry)),
            registry,
            broadcaster: Arc::new(EventBroadcaster::new(event_buffer)),
        }
    }

    /// Register a device and subscribe the broadcaster to its changes.
    ///
    /// # Errors
    ///
    /// Returns the registry's [`ValidationError`] for an empty or duplicate
    /// id; the device is then left untouched.
    pub fn register(&self, handle: DeviceHandle) -> Result<(), ValidationError> {
        self.registry.register(handle.clone())?;

        let broadcaster = Arc::clone(&self.broadcaster);
        let id = handle.id().to_string();
        handle.add_on_state_callback(Arc::new(move |snapshot: &Snapshot| {
            broadcaster.broadcast(snapshot.domain(), &Record::from_snapshot(&id, snapshot));
        }));
        Ok(())
    }

    /// See [`RequestRouter::can_handle`].
    #[must_use]
    pub fn can_handle(&self, path: &str) -> bool {
        self.router.can_handle(path)
    }

    /// See [`RequestRouter::resolve`].
    ///
    /// # Errors
    ///
    /// Propagates the router's [`GatewayError`].
    pub fn resolve(&self, path: &str) -> Result<DeviceHandle, GatewayError> {
        self.router.resolve(path)
    }

    /// See [`RequestRouter::handle`].
    ///
    /// # Errors
    ///
    /// Propagates the router's [`GatewayError`].
    pub fn handle(&self, path: &str, params: &CommandParams) -> Result<Record, GatewayError> {
        self.router.handle(path, params)
    }

    /// Open an event stream primed with the state of every registered device.
    #[must_use]
    pub fn subscribe(&self) -> EventStream {
        self.broadcaster.subscribe(|| {
            self.registry
                .all()
                .iter()
                .map(|handle| (handle.domain(), handle.record()))
                .collect()
        })
    }

    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    #[must_use]
    pub fn broadcaster(&self) -> &EventBroadcaster {
        &self.broadcaster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcaster::StreamEvent;
    use crate::ports::SwitchDevice;
    use crate::testing::{StubFan, StubLight, StubSensor, StubSwitch};
    use nodeweb_domain::domain::Domain;

    fn drain(rx: &mut EventStream) -> Vec<StreamEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn should_broadcast_when_registered_device_changes() {
        let gateway = Gateway::default();
        let lamp = StubSwitch::new("lr_lamp");
        gateway.register(DeviceHandle::switch(Arc::clone(&lamp))).unwrap();
        let mut rx = gateway.subscribe();
        drain(&mut rx);

        gateway
            .handle("/switch/lr_lamp/turn_on", &CommandParams::new())
            .unwrap();

        assert_eq!(
            drain(&mut rx),
            vec![StreamEvent {
                domain: Domain::Switch,
                data: r#"{"id":"lr_lamp","state":"ON","value":true}"#.to_string(),
            }]
        );
    }

    #[test]
    fn should_deliver_event_before_response_returns() {
        let gateway = Gateway::default();
        gateway
            .register(DeviceHandle::fan(StubFan::new("ceiling")))
            .unwrap();
        let mut rx = gateway.subscribe();
        drain(&mut rx);

        let record = gateway
            .handle("/fan/ceiling/toggle", &CommandParams::new())
            .unwrap();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, record.to_json().unwrap());
    }

    #[test]
    fn should_prime_subscription_with_every_device_in_registry_order() {
        let gateway = Gateway::default();
        gateway
            .register(DeviceHandle::light(StubLight::new("desk")))
            .unwrap();
        gateway
            .register(DeviceHandle::sensor(StubSensor::new("outdoor_temp", 4.0)))
            .unwrap();
        gateway
            .register(DeviceHandle::switch(StubSwitch::new("lr_lamp")))
            .unwrap();

        let mut rx = gateway.subscribe();
        let domains: Vec<Domain> = drain(&mut rx).iter().map(|e| e.domain).collect();

        assert_eq!(domains, vec![Domain::Sensor, Domain::Switch, Domain::Light]);
    }

    #[test]
    fn should_broadcast_sensor_updates_from_device_owner() {
        let gateway = Gateway::default();
        let sensor = StubSensor::new("outdoor_temp", 4.0);
        gateway
            .register(DeviceHandle::sensor(Arc::clone(&sensor)))
            .unwrap();
        let mut rx = gateway.subscribe();
        drain(&mut rx);

        sensor.publish(5.3);

        let events = drain(&mut rx);
        assert_eq!(
            events[0].data,
            r#"{"id":"outdoor_temp","state":"5.3 °C","value":5.3}"#
        );
    }

    #[test]
    fn should_not_hook_listener_when_registration_fails() {
        let gateway = Gateway::default();
        gateway
            .register(DeviceHandle::switch(StubSwitch::new("lr_lamp")))
            .unwrap();
        let duplicate = StubSwitch::new("lr_lamp");
        let result = gateway.register(DeviceHandle::switch(Arc::clone(&duplicate)));
        assert!(result.is_err());

        let mut rx = gateway.subscribe();
        drain(&mut rx);
        duplicate.turn_on();
        assert!(drain(&mut rx).is_empty());
    }
}
