use serde::Serialize;

use super::{identifier, to_body, Scope};
use crate::client::ApiClient;
use crate::error::Result;
use crate::options::{RequestOptions, RequestSpec};
use crate::path::encode_segment;
use crate::response::ApiResponse;

const BASE: &str = "/orders/";

/// `/orders` operations.
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    scope: Scope<'a>,
}

impl<'a> Orders<'a> {
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

    pub fn create<T: Serialize + ?Sized>(&self, order: &T) -> Result<ApiResponse> {
        self.scope.post(BASE, order)
    }

    pub fn get(&self, order_id: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::get(format!("{BASE}{}", encode_segment(order_id))))
    }

    pub fn update<T: Serialize + ?Sized>(&self, order: &T) -> Result<ApiResponse> {
        let body = to_body(order)?;
        let id = identifier(&body, "id")?;
        self.scope
            .send(RequestSpec::put(format!("{BASE}{}", encode_segment(&id))).with_body(body))
    }

    pub fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<ApiResponse> {
        self.scope.list(BASE, query)
    }
}
