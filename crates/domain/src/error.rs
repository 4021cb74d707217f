//! Error types shared across the workspace.
//!
//! Every request failure is local to that request: nothing here is fatal and
//! none of these errors ever reach the event stream.

use crate::domain::Domain;

/// Top-level error returned by request dispatch.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The path could not be split into a `(domain, id, method)` triple.
    #[error("malformed request path {0:?}")]
    MalformedPath(String),

    /// The triple parsed but no such device is registered in the domain.
    #[error("no {domain} with id {id:?}")]
    UnknownDevice { domain: Domain, id: String },

    /// The method segment is not a command understood by the domain.
    #[error("unknown command {method:?} for {domain}")]
    UnknownCommand { domain: Domain, method: String },

    /// The device exists but does not accept the requested method.
    #[error("{domain} does not support {method:?}")]
    UnsupportedMethod { domain: Domain, method: String },

    /// A parameter or registration input failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device was registered with an empty identifier.
    #[error("device id must not be empty")]
    EmptyId,

    /// Another device already uses this identifier within the domain.
    #[error("{domain} {id:?} is already registered")]
    DuplicateId { domain: Domain, id: String },

    /// A known command parameter carried a value that could not be parsed.
    #[error("invalid value {value:?} for parameter {name:?}")]
    InvalidParameter { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_unknown_device() {
        let err = GatewayError::UnknownDevice {
            domain: Domain::Fan,
            id: "attic".to_string(),
        };
        assert_eq!(err.to_string(), "no fan with id \"attic\"");
    }

    #[test]
    fn should_convert_validation_error_into_gateway_error() {
        let err: GatewayError = ValidationError::EmptyId.into();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::EmptyId)
        ));
    }

    #[test]
    fn should_describe_invalid_parameter() {
        let err = ValidationError::InvalidParameter {
            name: "speed",
            value: "turbo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"turbo\" for parameter \"speed\""
        );
    }
}
