//! Device domains: the five categories exposed over HTTP.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the device categories served by the gateway.
///
/// Each domain owns a URL prefix (`/<name>/`) and a registry slice. Only
/// [`Switch`](Self::Switch), [`Fan`](Self::Fan) and [`Light`](Self::Light)
/// accept commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Sensor,
    Switch,
    BinarySensor,
    Fan,
    Light,
}

impl Domain {
    /// Number of domains.
    pub const COUNT: usize = 5;

    /// Every domain, in registry order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Sensor,
        Self::Switch,
        Self::BinarySensor,
        Self::Fan,
        Self::Light,
    ];

    /// Wire name used in paths and as the event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Switch => "switch",
            Self::BinarySensor => "binary_sensor",
            Self::Fan => "fan",
            Self::Light => "light",
        }
    }

    /// Exact, case-sensitive path prefix including both slashes.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Sensor => "/sensor/",
            Self::Switch => "/switch/",
            Self::BinarySensor => "/binary_sensor/",
            Self::Fan => "/fan/",
            Self::Light => "/light/",
        }
    }

    /// Position of this domain in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether `turn_on` / `turn_off` / `toggle` apply to this domain.
    #[must_use]
    pub const fn accepts_commands(self) -> bool {
        matches!(self, Self::Switch | Self::Fan | Self::Light)
    }

    /// Find the domain whose prefix starts `path`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|domain| path.starts_with(domain.prefix()))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain {0:?}")]
pub struct UnknownDomain(pub String);

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}
