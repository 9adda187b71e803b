//! Classification of failed calls into a uniform [`ErrorPayload`].
//!
//! # Design
//! Normalization is a pure function over one failed attempt: either the server
//! answered with an error status, or no response arrived at all. The payload
//! always has a non-empty `message`; `code` and `raw_body` are only present
//! when the server sent a JSON object.

use std::fmt;

use serde_json::{json, Map, Value};

/// The uniform error shape produced for every failed call.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// API error code, usually mirroring the HTTP status.
    pub code: Option<u16>,
    pub message: String,
    /// The decoded error object as the server sent it. Carries extra fields
    /// such as `details`, `key` or `resource_type`.
    pub raw_body: Option<Value>,
}

impl ErrorPayload {
    /// Normalize an HTTP error response.
    ///
    /// A JSON object body supplies `code` and `message` and is retained as
    /// `raw_body`. Any other body becomes the message verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => Self::from_object(status, object),
            _ => Self {
                code: None,
                message: non_empty(body, status),
                raw_body: None,
            },
        }
    }

    /// Normalize a failure where no response was received.
    pub fn from_transport(err: &impl fmt::Display) -> Self {
        let message = err.to_string();
        Self {
            code: None,
            message: if message.is_empty() {
                "transport failure".to_string()
            } else {
                message
            },
            raw_body: None,
        }
    }

    fn from_object(status: u16, object: Map<String, Value>) -> Self {
        let code = object
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok());
        let message = match object.get("message") {
            Some(Value::String(m)) if !m.is_empty() => m.clone(),
            // Some gateways put the text under `error` instead.
            _ => match object.get("error") {
                Some(Value::String(m)) if !m.is_empty() => m.clone(),
                _ => non_empty("", status),
            },
        };
        Self {
            code,
            message,
            raw_body: Some(Value::Object(object)),
        }
    }

    /// The value handed back to non-strict callers: the server's error body,
    /// or a synthesized `{"message": ...}` object when there was none.
    pub fn into_body(self) -> Value {
        match self.raw_body {
            Some(body) => body,
            None => json!({ "message": self.message }),
        }
    }

    /// Look up an extra field of the server's error body, e.g. `details`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.raw_body.as_ref().and_then(|body| body.get(key))
    }
}

fn non_empty(text: &str, status: u16) -> String {
    if text.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        text.to_string()
    }
}
