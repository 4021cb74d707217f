//! Commands accepted by actuator domains and their parameters.
//!
//! Parameters arrive as an untyped key/value map (query string or form
//! body). Each domain picks the keys it understands and ignores the rest;
//! a known key with a malformed value is a [`ValidationError`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::snapshot::{FanSpeed, Rgb};

/// A state-changing method from the URL grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TurnOn,
    TurnOff,
    Toggle,
}

impl Command {
    /// Wire name as used in the method segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
            Self::Toggle => "toggle",
        }
    }

    /// Resulting on/off state when applied to a device currently in `on`.
    #[must_use]
    pub const fn apply(self, on: bool) -> bool {
        match self {
            Self::TurnOn => true,
            Self::TurnOff => false,
            Self::Toggle => !on,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method segment is not a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "turn_on" => Ok(Self::TurnOn),
            "turn_off" => Ok(Self::TurnOff),
            "toggle" => Ok(Self::Toggle),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Opaque key/value parameters attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandParams(BTreeMap<String, String>);

impl CommandParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge `other` into `self`; keys in `other` win.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Raw value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a parameter, reporting a malformed value as a validation error.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] when the key is present
    /// but its value does not parse as `T`.
    pub fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ValidationError> {
        self.get(key)
            .map(|raw| {
                raw.parse().map_err(|_| ValidationError::InvalidParameter {
                    name: key,
                    value: raw.to_string(),
                })
            })
            .transpose()
    }
}

impl From<BTreeMap<String, String>> for CommandParams {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CommandParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A fan command with its optional settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanCall {
    pub command: Command,
    pub speed: Option<FanSpeed>,
    pub oscillating: Option<bool>,
}

impl FanCall {
    /// Build a call from a command and its parameters.
    ///
    /// Recognised keys on `turn_on` / `toggle`: `speed`, `oscillation`.
    /// `turn_off` takes none.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] for a malformed value.
    pub fn from_params(command: Command, params: &CommandParams) -> Result<Self, ValidationError> {
        let mut call = Self {
            command,
            speed: None,
            oscillating: None,
        };
        if command != Command::TurnOff {
            call.speed = params.parse("speed")?;
            call.oscillating = params.parse("oscillation")?;
        }
        Ok(call)
    }
}

/// A light command with its optional settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightCall {
    pub command: Command,
    pub brightness: Option<u8>,
    pub color: Option<Rgb>,
    pub white_value: Option<u8>,
    pub effect: Option<String>,
    /// Transition length in milliseconds.
    pub transition_ms: Option<u32>,
    /// Flash length in milliseconds.
    pub flash_ms: Option<u32>,
}

impl LightCall {
    /// Build a call from a command and its parameters.
    ///
    /// Recognised keys on `turn_on` / `toggle`: `brightness`, `r`, `g`, `b`,
    /// `white_value`, `effect`, `transition`, `flash`. Missing color
    /// channels default to 0 once any channel is given. `turn_off` only
    /// honours `transition`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] for a malformed value.
    pub fn from_params(command: Command, params: &CommandParams) -> Result<Self, ValidationError> {
        let mut call = Self {
            command,
            brightness: None,
            color: None,
            white_value: None,
            effect: None,
            transition_ms: params.parse("transition")?,
            flash_ms: None,
        };
        if command == Command::TurnOff {
            return Ok(call);
        }

        call.brightness = params.parse("brightness")?;
        call.white_value = params.parse("white_value")?;
        call.effect = params.get("effect").map(str::to_string);
        call.flash_ms = params.parse("flash")?;

        let r: Option<u8> = params.parse("r")?;
        let g: Option<u8> = params.parse("g")?;
        let b: Option<u8> = params.parse("b")?;
        if r.is_some() || g.is_some() || b.is_some() {
            call.color = Some(Rgb {
                r: r.unwrap_or_default(),
                g: g.unwrap_or_default(),
                b: b.unwrap_or_default(),
            });
        }
        Ok(call)
    }
}
