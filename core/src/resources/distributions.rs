use serde::Serialize;

use super::Scope;
use crate::client::ApiClient;
use crate::error::Result;
use crate::options::RequestOptions;
use crate::response::ApiResponse;

/// Publishing vouchers to customers.
#[derive(Debug, Clone, Copy)]
pub struct Distributions<'a> {
    scope: Scope<'a>,
}

impl<'a> Distributions<'a> {
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

    pub fn publish<T: Serialize + ?Sized>(&self, params: &T) -> Result<ApiResponse> {
        self.scope.post("/vouchers/publish", params)
    }
}
