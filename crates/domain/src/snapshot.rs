//! Point-in-time device values, one shape per domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::ValidationError;

/// Numeric reading of a sensor plus how to present it.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSnapshot {
    /// Latest reading; may be NaN before the first measurement.
    pub value: f64,
    /// Number of decimals used when formatting `value`.
    pub accuracy_decimals: u8,
    /// Unit appended to the formatted value, e.g. `°C`.
    pub unit: Option<String>,
}

/// Discrete fan speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanSpeed {
    Off,
    Low,
    Medium,
    High,
}

impl FanSpeed {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::InvalidParameter {
                name: "speed",
                value: s.to_string(),
            }),
        }
    }
}

/// Fan state. `speed` and `oscillating` are `None` when unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FanSnapshot {
    pub on: bool,
    pub speed: Option<FanSpeed>,
    pub oscillating: Option<bool>,
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Light state. Optional fields are `None` when the light lacks the trait.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LightSnapshot {
    pub on: bool,
    pub brightness: Option<u8>,
    pub color: Option<Rgb>,
    pub white_value: Option<u8>,
    pub effect: Option<String>,
}

/// Snapshot of any device, tagged by domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Sensor(SensorSnapshot),
    Switch(bool),
    BinarySensor(bool),
    Fan(FanSnapshot),
    Light(LightSnapshot),
}

impl Snapshot {
    /// Domain this snapshot belongs to.
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
}
