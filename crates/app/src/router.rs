//! Request dispatch for the `/<domain>/<id>[/<method>]` grammar.

use std::sync::Arc;

use nodeweb_domain::command::{Command, CommandParams};
use nodeweb_domain::domain::Domain;
use nodeweb_domain::error::GatewayError;
use nodeweb_domain::record::Record;
use nodeweb_domain::url_match::UrlMatch;

use crate::handle::DeviceHandle;
use crate::registry::DeviceRegistry;

/// Maps parsed paths onto registered devices.
///
/// Transport-agnostic: callers hand in the request path (query already
/// stripped) and the merged request parameters, and receive either the
/// device's record or a [`GatewayError`] to translate into a status code.
#[derive(Debug, Clone)]
pub struct RequestRouter {
    registry: Arc<DeviceRegistry>,
}

impl RequestRouter {
    #[must_use]
    pub fn new(registry: Arc<DeviceRegistry>) -> Self {
        Self { registry }
    }

    /// Whether `path` starts with one of the domain prefixes.
    #[must_use]
    pub fn can_handle(&self, path: &str) -> bool {
        Domain::from_path(path).is_some()
    }

    /// Find the device addressed by `path` without running any method.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::MalformedPath`] when the path does not match the grammar.
    /// - [`GatewayError::UnknownDevice`] when no device has that id.
    pub fn resolve(&self, path: &str) -> Result<DeviceHandle, GatewayError> {
        self.locate(path).map(|(_, device)| device)
    }

    fn locate<'a>(&self, path: &'a str) -> Result<(UrlMatch<'a>, DeviceHandle), GatewayError> {
        let url = UrlMatch::parse_any(path)
            .filter(|url| url.valid)
            .ok_or_else(|| GatewayError::MalformedPath(path.to_string()))?;

        let device = self
            .registry
            .find(url.domain, url.id)
            .ok_or_else(|| GatewayError::UnknownDevice {
                domain: url.domain,
                id: url.id.to_string(),
            })?;
        Ok((url, device))
    }

    /// Read or command the device addressed by `path`.
    ///
    /// An empty method reads the state. A command runs synchronously; any
    /// change notification it triggers has been delivered by the time this
    /// returns, and the returned record reflects the state right after the
    /// device accepted the command.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::MalformedPath`] when the path does not match the grammar.
    /// - [`GatewayError::UnknownDevice`] when no device has that id.
    /// - [`GatewayError::UnsupportedMethod`] for a method on a read-only domain.
    /// - [`GatewayError::UnknownCommand`] for any other unrecognised method.
    /// - [`GatewayError::Validation`] when a command parameter is malformed.
    pub fn handle(&self, path: &str, params: &CommandParams) -> Result<Record, GatewayError> {
        let (url, device) = self.locate(path)?;

        if url.is_read() {
            return Ok(device.record());
        }

        if !url.domain.accepts_commands() {
            return Err(GatewayError::UnsupportedMethod {
                domain: url.domain,
                method: url.method.to_string(),
            });
        }

        let command: Command = url
            .method
            .parse()
            .map_err(|_| GatewayError::UnknownCommand {
                domain: url.domain,
                method: url.method.to_string(),
            })?;

        tracing::debug!(domain = %url.domain, id = url.id, %command, "executing command");
        device.execute(command, params)?;
        Ok(device.record())
    }
}
