//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `nodeweb.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Index page settings.
    pub web: WebConfig,
    /// Event stream settings.
    pub events: EventsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Integration toggles.
    pub integrations: IntegrationsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Index page configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Node name shown in the page title.
    pub name: String,
    /// Stylesheet URL; the built-in default is used when unset.
    pub css_url: Option<String>,
    /// Script URL; the built-in default is used when unset.
    pub js_url: Option<String>,
}

/// Event stream configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Live events buffered per connection before it is dropped.
    pub buffer: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Per-integration toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Enable the virtual/demo integration.
    pub virtual_enabled: bool,
    /// Seconds between simulated sensor readings; `0` disables them.
    pub sensor_interval_secs: u64,
}

impl Config {
    /// Load configuration from `nodeweb.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if a port
    /// override is not a number, or if the resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("nodeweb.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("NODEWEB_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("NODEWEB_PORT") {
            self.server.port = parse_port("NODEWEB_PORT", &val)?;
        }
        if let Some(val) = var("NODEWEB_BIND") {
            let (host, port) = val.rsplit_once(':').ok_or_else(|| {
                ConfigError::Validation(format!("NODEWEB_BIND must be host:port, got {val:?}"))
            })?;
            self.server.port = parse_port("NODEWEB_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(val) = var("NODEWEB_NAME") {
            self.web.name = val;
        }
        if let Some(val) = var("NODEWEB_CSS_URL") {
            self.web.css_url = Some(val);
        }
        if let Some(val) = var("NODEWEB_JS_URL") {
            self.web.js_url = Some(val);
        }
        if let Some(val) = var("NODEWEB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.events.buffer == 0 {
            return Err(ConfigError::Validation(
                "event buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the simulated sensor period.
    #[must_use]
    pub fn sensor_interval(&self) -> Duration {
        Duration::from_secs(self.integrations.sensor_interval_secs)
    }
}

fn parse_port(key: &str, val: &str) -> Result<u16, ConfigError> {
    val.parse()
        .map_err(|_| ConfigError::Validation(format!("{key} must be a port number, got {val:?}")))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            name: "nodeweb".to_string(),
            css_url: None,
            js_url: None,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            buffer: nodeweb_app::gateway::DEFAULT_EVENT_BUFFER,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "nodewebd=info,nodeweb=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            virtual_enabled: true,
            sensor_interval_secs: 10,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
