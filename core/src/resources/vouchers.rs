use serde::Serialize;
use serde_json::Value;

use super::{identifier, to_body, Scope};
use crate::client::ApiClient;
use crate::error::Result;
use crate::options::{RequestOptions, RequestSpec};
use crate::path::encode_segment;
use crate::response::ApiResponse;

const BASE: &str = "/vouchers/";

/// `/vouchers` operations. Vouchers are addressed by their code.
#[derive(Debug, Clone, Copy)]
pub struct Vouchers<'a> {
    scope: Scope<'a>,
}

impl<'a> Vouchers<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self {
            scope: Scope::new(api),
        }
    }

    pub fn with_options(self, options: RequestOptions) -> Self {
        Self {
            scope: self.scope.with_options(options),
        }
    }

    pub fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<ApiResponse> {
        self.scope.list(BASE, query)
    }

    pub fn get(&self, code: &str) -> Result<ApiResponse> {
        self.scope.send(RequestSpec::get(voucher_path(code)))
    }

    /// Create a voucher. The code comes from the payload; without one the
    /// server generates it.
    pub fn create<T: Serialize + ?Sized>(&self, voucher: &T) -> Result<ApiResponse> {
        let body = to_body(voucher)?;
        let code = body.get("code").and_then(Value::as_str).unwrap_or_default();
        let path = voucher_path(code);
        self.scope.send(RequestSpec::post(path).with_body(body))
    }

    /// Update a voucher addressed by the payload's `code`.
    pub fn update<T: Serialize + ?Sized>(&self, voucher: &T) -> Result<ApiResponse> {
        let body = to_body(voucher)?;
        let code = identifier(&body, "code")?;
        self.scope
            .send(RequestSpec::put(voucher_path(&code)).with_body(body))
    }

    pub fn enable(&self, code: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::post(format!("{}/enable", voucher_path(code))))
    }

    pub fn disable(&self, code: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::post(format!("{}/disable", voucher_path(code))))
    }

    /// Release a validation session that locked the voucher.
    pub fn release_validation_session(&self, code: &str, session_key: &str) -> Result<ApiResponse> {
        let path = format!(
            "{}/sessions/{}",
            voucher_path(code),
            encode_segment(session_key)
        );
        self.scope.send(RequestSpec::delete(path))
    }
}

/// `/vouchers/{code}` with the code encoded.
pub(super) fn voucher_path(code: &str) -> String {
    format!("{BASE}{}", encode_segment(code))
}
