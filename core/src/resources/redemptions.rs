use serde::Serialize;
use serde_json::Value;

use super::vouchers::voucher_path;
use super::{to_body, Scope};
use crate::client::ApiClient;
use crate::error::{Result, VoucherifyError};
use crate::options::{RequestOptions, RequestSpec};
use crate::path::encode_segment;
use crate::response::ApiResponse;

const BASE: &str = "/redemptions/";

/// Redeeming vouchers and rolling redemptions back.
#[derive(Debug, Clone, Copy)]
pub struct Redemptions<'a> {
    scope: Scope<'a>,
}

impl<'a> Redemptions<'a> {
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

    /// Redeem `code` with an empty context.
    pub fn redeem(&self, code: &str, tracking_id: Option<&str>) -> Result<ApiResponse> {
        self.redeem_code(code, Value::Object(Default::default()), tracking_id)
    }

    /// Redeem with a full context (`customer`, `order`, `metadata`, ...). The
    /// voucher code is taken from the context's `voucher` field, which is not
    /// forwarded in the body.
    pub fn redeem_with_context<T: Serialize + ?Sized>(
        &self,
        context: &T,
        tracking_id: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut context = to_body(context)?;
        let code = match context.as_object_mut().and_then(|c| c.remove("voucher")) {
            Some(Value::String(code)) => code,
            _ => {
                return Err(VoucherifyError::InvalidInput(
                    "redemption context must carry a string `voucher`".to_string(),
                ))
            }
        };
        self.redeem_code(&code, context, tracking_id)
    }

    fn redeem_code(&self, code: &str, context: Value, tracking_id: Option<&str>) -> Result<ApiResponse> {
        let mut spec =
            RequestSpec::post(format!("{}/redemption", voucher_path(code))).with_body(context);
        if let Some(tracking_id) = tracking_id.filter(|t| !t.is_empty()) {
            spec = spec.with_param("tracking_id", tracking_id);
        }
        self.scope.send(spec)
    }

    /// Redeem several redeemables in one call.
    pub fn redeem_stackable<T: Serialize + ?Sized>(&self, params: &T) -> Result<ApiResponse> {
        self.scope.post(BASE, params)
    }

    pub fn get_for_voucher(&self, code: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::get(format!("{}/redemption", voucher_path(code))))
    }

    pub fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<ApiResponse> {
        self.scope.list(BASE, query)
    }

    /// Roll back a redemption. `data` may carry `customer`/`metadata` for the
    /// rollback record; it defaults to an empty object.
    pub fn rollback(
        &self,
        redemption_id: &str,
        reason: Option<&str>,
        data: Option<&Value>,
    ) -> Result<ApiResponse> {
        let path = format!("{BASE}{}/rollback", encode_segment(redemption_id));
        let body = data.cloned().unwrap_or_else(|| Value::Object(Default::default()));
        let mut spec = RequestSpec::post(path).with_body(body);
        if let Some(reason) = reason.filter(|r| !r.is_empty()) {
            spec = spec.with_param("reason", reason);
        }
        self.scope.send(spec)
    }
}
