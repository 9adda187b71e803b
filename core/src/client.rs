//! The request pipeline shared by every resource module.
//!
//! # Design
//! `ApiClient` owns the immutable [`ClientConfig`], the four fixed headers and
//! a [`Transport`]. A call is split into `build_request` (pure: spec to
//! `HttpRequest`) and `parse_response` (pure: `HttpResponse` to result), with
//! exactly one `Transport::execute` in between. Nothing is mutated after
//! construction, so one client can serve concurrent callers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Result, TransportError, VoucherifyError};
use crate::http::{HttpRequest, HttpResponse};
use crate::normalize::ErrorPayload;
use crate::options::RequestSpec;
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};

pub const APP_ID_HEADER: &str = "X-App-Id";
pub const APP_TOKEN_HEADER: &str = "X-App-Token";
pub const CHANNEL_HEADER: &str = "X-Voucherify-Channel";
pub const CHANNEL: &str = "Rust-SDK";

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    base_url: String,
    headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client that talks HTTP through [`UreqTransport`].
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        let headers = vec![
            (APP_ID_HEADER.to_string(), config.application_id.clone()),
            (APP_TOKEN_HEADER.to_string(), config.client_secret_key.clone()),
            (CHANNEL_HEADER.to_string(), CHANNEL.to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        Self {
            base_url: config.base_url(),
            config,
            headers,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Effective strictness of a call: the per-call override, else the
    /// client-wide setting.
    pub fn is_strict(&self, spec: &RequestSpec) -> bool {
        spec.options.strict.unwrap_or(self.config.strict)
    }

    /// Turn a spec into a fully-specified HTTP request.
    ///
    /// The body is serialized only for methods that carry one.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<HttpRequest> {
        let body = match &spec.body {
            Some(value) if spec.method.allows_body() => Some(serde_json::to_string(value)?),
            _ => None,
        };
        Ok(HttpRequest {
            method: spec.method,
            url: format!("{}{}", self.base_url, spec.path),
            query: spec.query.clone(),
            headers: self.headers.clone(),
            body,
            timeout: spec.options.timeout.unwrap_or(self.config.timeout),
        })
    }

    /// Classify a received response.
    ///
    /// Error statuses are normalized into an [`ErrorPayload`] and either
    /// raised (`strict`) or returned as the error body. Successful bodies are
    /// decoded as JSON when declared so, otherwise returned as text.
    pub fn parse_response(&self, response: HttpResponse, strict: bool) -> Result<ApiResponse> {
        if response.is_error() {
            let payload = ErrorPayload::from_response(response.status, &response.body);
            warn!(
                status = response.status,
                code = ?payload.code,
                message = %payload.message,
                "voucherify request failed"
            );
            return fail(
                VoucherifyError::Remote {
                    status: response.status,
                    payload,
                },
                strict,
            );
        }

        if !response.is_json() {
            return Ok(ApiResponse::Text(response.body));
        }
        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(ApiResponse::Json(value)),
            Err(err) => {
                warn!(error = %err, "response declared JSON but did not decode; returning text");
                Ok(ApiResponse::Text(response.body))
            }
        }
    }

    /// Classify a transport failure.
    pub fn parse_transport_error(&self, err: TransportError, strict: bool) -> Result<ApiResponse> {
        let payload = ErrorPayload::from_transport(&err);
        warn!(message = %payload.message, "voucherify transport failure");
        fail(VoucherifyError::Transport(payload), strict)
    }

    /// Issue one call: build, execute once, classify.
    pub fn request(&self, spec: RequestSpec) -> Result<ApiResponse> {
        let strict = self.is_strict(&spec);
        let request = self.build_request(&spec)?;
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            timeout = ?request.timeout,
            strict,
            "voucherify request"
        );
        match self.transport.execute(&request) {
            Ok(response) => {
                debug!(status = response.status, "voucherify response");
                self.parse_response(response, strict)
            }
            Err(err) => self.parse_transport_error(err, strict),
        }
    }
}

/// Strict callers get the error; others get the error body as a value.
fn fail(err: VoucherifyError, strict: bool) -> Result<ApiResponse> {
    if strict {
        return Err(err);
    }
    match err {
        VoucherifyError::Remote { payload, .. } | VoucherifyError::Transport(payload) => {
            Ok(ApiResponse::Json(payload.into_body()))
        }
        other => Err(other),
    }
}
