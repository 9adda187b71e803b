use serde::Serialize;

use super::{identifier, to_body, Scope};
use crate::client::ApiClient;
use crate::error::Result;
use crate::options::{RequestOptions, RequestSpec};
use crate::path::encode_segment;
use crate::response::ApiResponse;

const BASE: &str = "/validation-rules/";

/// `/validation-rules` operations, including assigning a rule to a voucher
/// or campaign.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRules<'a> {
    scope: Scope<'a>,
}

impl<'a> ValidationRules<'a> {
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

    pub fn create<T: Serialize + ?Sized>(&self, rule: &T) -> Result<ApiResponse> {
        self.scope.post(BASE, rule)
    }

    pub fn get(&self, rule_id: &str) -> Result<ApiResponse> {
        self.scope
            .send(RequestSpec::get(format!("{BASE}{}", encode_segment(rule_id))))
    }

    pub fn update<T: Serialize + ?Sized>(&self, rule: &T) -> Result<ApiResponse> {
        let body = to_body(rule)?;
        let id = identifier(&body, "id")?;
        self.scope
            .send(RequestSpec::put(format!("{BASE}{}", encode_segment(&id))).with_body(body))
    }

    pub fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<ApiResponse> {
        self.scope.list(BASE, query)
    }

    /// `assignee` names the target, e.g. `{"voucher": "CODE"}`.
    pub fn assign<T: Serialize + ?Sized>(&self, rule_id: &str, assignee: &T) -> Result<ApiResponse> {
        let path = format!("{BASE}{}/assignments", encode_segment(rule_id));
        self.scope.post(&path, assignee)
    }
}
