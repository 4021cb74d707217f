//! The wire record: one canonical JSON document per device state.
//!
//! The same record is returned by the REST endpoints and pushed on the event
//! stream, so it carries both a human-readable `state` string and a
//! machine-readable `value`. Field order is fixed by the struct layout,
//! which makes serialization of an unchanged snapshot byte-identical.

use serde::Serialize;

use crate::snapshot::{FanSnapshot, FanSpeed, LightSnapshot, Rgb, SensorSnapshot, Snapshot};

/// Machine-readable part of a [`Record`].
///
/// Non-finite numbers serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Bool(bool),
    Number(f64),
}

/// Serialized state of one device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub state: String,
    pub value: RecordValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<FanSpeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oscillation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_value: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

impl Record {
    /// Render `snapshot` for the device registered as `id`.
    #[must_use]
    pub fn from_snapshot(id: &str, snapshot: &Snapshot) -> Self {
        match snapshot {
            Snapshot::Sensor(sensor) => Self::sensor(id, sensor),
            Snapshot::Switch(on) | Snapshot::BinarySensor(on) => Self::on_off(id, *on),
            Snapshot::Fan(fan) => Self::fan(id, fan),
            Snapshot::Light(light) => Self::light(id, light),
        }
    }

    fn on_off(id: &str, on: bool) -> Self {
        Self {
            id: id.to_string(),
            state: on_off_str(on).to_string(),
            value: RecordValue::Bool(on),
            speed: None,
            oscillation: None,
            brightness: None,
            color: None,
            white_value: None,
            effect: None,
        }
    }

    fn sensor(id: &str, sensor: &SensorSnapshot) -> Self {
        Self {
            state: format_sensor_state(sensor),
            value: RecordValue::Number(sensor.value),
            ..Self::on_off(id, false)
        }
    }

    fn fan(id: &str, fan: &FanSnapshot) -> Self {
        Self {
            speed: fan.speed,
            oscillation: fan.oscillating,
            ..Self::on_off(id, fan.on)
        }
    }

    fn light(id: &str, light: &LightSnapshot) -> Self {
        Self {
            brightness: light.brightness,
            color: light.color,
            white_value: light.white_value,
            effect: light.effect.clone(),
            ..Self::on_off(id, light.on)
        }
    }

    /// Compact JSON text of this record.
    ///
    /// # Errors
    ///
    /// Propagates the serializer error; it does not occur for the field
    /// types used here.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn on_off_str(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Fixed-point value with the sensor's precision, then its unit if any.
fn format_sensor_state(sensor: &SensorSnapshot) -> String {
    if !sensor.value.is_finite() {
        return "NA".to_string();
    }
    let decimals = usize::from(sensor.accuracy_decimals);
    match sensor.unit.as_deref() {
        Some(unit) if !unit.is_empty() => format!("{:.*} {unit}", decimals, sensor.value),
        _ => format!("{:.*}", decimals, sensor.value),
    }
}
