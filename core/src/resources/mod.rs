//! Resource modules: one value per API entity.
//!
//! Each resource borrows the shared [`ApiClient`] and turns every operation
//! into exactly one [`RequestSpec`]. Resources own nothing but a copy of the
//! per-call [`RequestOptions`], which they attach to every spec unchanged.

mod customers;
mod distributions;
mod orders;
mod products;
mod redemptions;
mod validation_rules;
mod validations;
mod vouchers;

pub use customers::Customers;
pub use distributions::Distributions;
pub use orders::Orders;
pub use products::Products;
pub use redemptions::Redemptions;
pub use validation_rules::ValidationRules;
pub use validations::Validations;
pub use vouchers::Vouchers;

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{Result, VoucherifyError};
use crate::options::{query_pairs, RequestOptions, RequestSpec};
use crate::response::ApiResponse;

/// The client reference and per-call options shared by all resources.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    api: &'a ApiClient,
    options: RequestOptions,
}

impl<'a> Scope<'a> {
    fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            options: RequestOptions::default(),
        }
    }

    fn with_options(self, options: RequestOptions) -> Self {
        Self { options, ..self }
    }

    fn send(&self, spec: RequestSpec) -> Result<ApiResponse> {
        self.api.request(spec.with_options(self.options))
    }

    /// `GET path` with the filter mapping as query parameters.
    fn list<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<ApiResponse> {
        self.send(RequestSpec::get(path).with_query(query_pairs(query)?))
    }

    fn post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<ApiResponse> {
        self.send(RequestSpec::post(path).with_body(to_body(payload)?))
    }
}

fn to_body<T: Serialize + ?Sized>(payload: &T) -> Result<Value> {
    Ok(serde_json::to_value(payload)?)
}

/// Read the identifier an update route is keyed on (`id`, or `code` for
/// vouchers) out of the payload.
fn identifier(body: &Value, key: &str) -> Result<String> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            VoucherifyError::InvalidInput(format!("payload must carry a string `{key}`"))
        })
}
