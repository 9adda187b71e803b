use serde::Serialize;

use super::vouchers::voucher_path;
use super::Scope;
use crate::client::ApiClient;
use crate::error::Result;
use crate::options::RequestOptions;
use crate::response::ApiResponse;

const BASE: &str = "/validations/";

/// Checking whether vouchers are applicable without redeeming them.
#[derive(Debug, Clone, Copy)]
pub struct Validations<'a> {
    scope: Scope<'a>,
}

impl<'a> Validations<'a> {
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

    pub fn validate_voucher<T: Serialize + ?Sized>(&self, code: &str, params: &T) -> Result<ApiResponse> {
        let path = format!("{}/validate", voucher_path(code));
        self.scope.post(&path, params)
    }

    pub fn validate_stackable<T: Serialize + ?Sized>(&self, params: &T) -> Result<ApiResponse> {
        self.scope.post(BASE, params)
    }
}
