use serde::Serialize;

use super::{identifier, to_body, Scope};
use crate::client::ApiClient;
use crate::error::Result;
use crate::options::{RequestOptions, RequestSpec};
use crate::path::encode_segment;
use crate::response::ApiResponse;

const BASE: &str = "/products/";

/// `/products` operations.
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    scope: Scope<'a>,
}

impl<'a> Products<'a> {
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

    pub fn create<T: Serialize + ?Sized>(&self, product: &T) -> Result<ApiResponse> {
        self.scope.post(BASE, product)
    }

    pub fn get(&self, product_id: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::get(format!("{BASE}{}", encode_segment(product_id))))
    }

    pub fn update<T: Serialize + ?Sized>(&self, product: &T) -> Result<ApiResponse> {
        let body = to_body(product)?;
        let id = identifier(&body, "id")?;
        self.scope
            .send(RequestSpec::put(format!("{BASE}{}", encode_segment(&id))).with_body(body))
    }

    pub fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<ApiResponse> {
        self.scope.list(BASE, query)
    }
}
