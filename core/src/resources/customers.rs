use serde::Serialize;

use super::{identifier, to_body, Scope};
use crate::client::ApiClient;
use crate::error::Result;
use crate::options::{RequestOptions, RequestSpec};
use crate::path::encode_segment;
use crate::response::ApiResponse;

const BASE: &str = "/customers/";

/// `/customers` operations.
#[derive(Debug, Clone, Copy)]
pub struct Customers<'a> {
    scope: Scope<'a>,
}

impl<'a> Customers<'a> {
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

    pub fn create<T: Serialize + ?Sized>(&self, customer: &T) -> Result<ApiResponse> {
        self.scope.post(BASE, customer)
    }

    pub fn get(&self, customer_id: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::get(format!("{BASE}{}", encode_segment(customer_id))))
    }

    /// Partial update; the customer is addressed by the payload's `id`.
    pub fn update<T: Serialize + ?Sized>(&self, customer: &T) -> Result<ApiResponse> {
        let body = to_body(customer)?;
        let id = identifier(&body, "id")?;
        self.scope
            .send(RequestSpec::put(format!("{BASE}{}", encode_segment(&id))).with_body(body))
    }

    pub fn delete(&self, customer_id: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::delete(format!("{BASE}{}", encode_segment(customer_id))))
    }

    pub fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<ApiResponse> {
        self.scope.list(BASE, query)
    }
}
