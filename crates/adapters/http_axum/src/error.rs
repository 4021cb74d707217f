//! HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use nodeweb_domain::error::GatewayError;

/// Maps request failures to an HTTP response with the matching status code.
///
/// The body is the status's canonical reason phrase as plain text.
#[derive(Debug)]
pub enum ApiError {
    Gateway(GatewayError),
    /// The HTTP verb is neither GET nor POST.
    MethodNotAllowed,
    /// The request does not address a device.
    NotFound,
    /// The query string or form body could not be decoded.
    BadRequest(String),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Gateway(
                GatewayError::MalformedPath(_)
                | GatewayError::UnknownDevice { .. }
                | GatewayError::UnknownCommand { .. },
            )
            | Self::NotFound => StatusCode::NOT_FOUND,
            Self::Gateway(GatewayError::UnsupportedMethod { .. }) | Self::MethodNotAllowed => {
                StatusCode::METHOD_NOT_ALLOWED
            }
            Self::Gateway(GatewayError::Validation(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Gateway(err) => tracing::debug!(error = %err, %status, "request rejected"),
            Self::BadRequest(reason) => tracing::debug!(%reason, %status, "request rejected"),
            Self::MethodNotAllowed | Self::NotFound => {
                tracing::debug!(%status, "request rejected");
            }
        }

        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}
