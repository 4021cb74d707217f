//! Request handlers.

#[allow(clippy::missing_errors_doc)]
pub mod device;
pub mod events;
pub mod index;
