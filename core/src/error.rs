//! Error types for the Voucherify client.
//!
//! # Design
//! Remote and transport failures both carry an [`ErrorPayload`] so callers see
//! the same `code`/`message` pair regardless of where the call failed. The
//! remaining variants are caller mistakes detected before any network I/O;
//! they are returned as errors even by non-strict clients.

use std::borrow::Cow;

use thiserror::Error;

use crate::normalize::ErrorPayload;

/// Errors returned by [`ApiClient`](crate::ApiClient) and the resource modules.
#[derive(Debug, Error)]
pub enum VoucherifyError {
    /// The server answered with a 4xx/5xx status.
    #[error("{}", .payload.message)]
    Remote { status: u16, payload: ErrorPayload },

    /// No response was received (DNS, refused connection, timeout, ...).
    #[error("{}", .0.message)]
    Transport(ErrorPayload),

    /// The request payload could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A payload was missing a field the route needs, e.g. an `id` to update.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl VoucherifyError {
    /// The API error code, when the server supplied one.
    pub fn code(&self) -> Option<u16> {
        self.payload().and_then(|p| p.code)
    }

    pub fn message(&self) -> Cow<'_, str> {
        match self.payload() {
            Some(payload) => Cow::Borrowed(payload.message.as_str()),
            None => Cow::Owned(self.to_string()),
        }
    }

    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            VoucherifyError::Remote { payload, .. } | VoucherifyError::Transport(payload) => {
                Some(payload)
            }
            _ => None,
        }
    }

    /// HTTP status of a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            VoucherifyError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A failure inside the transport before a response was received.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Errors raised while assembling a [`ClientConfig`](crate::ClientConfig)
/// from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, VoucherifyError>;
