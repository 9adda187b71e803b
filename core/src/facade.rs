//! Entry point bundling every resource module over one shared [`ApiClient`].

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::resources::{
    Customers, Distributions, Orders, Products, Redemptions, ValidationRules, Validations,
    Vouchers,
};
use crate::transport::Transport;

/// A Voucherify client.
///
/// ```no_run
/// use voucherify_core::{Client, ClientConfig, RequestOptions};
/// use serde_json::json;
///
/// let client = Client::new(ClientConfig::new("app-id", "secret-key").with_strict(true));
/// let customer = client
///     .customers()
///     .create(&json!({ "name": "John Doe", "email": "john@email.com" }))?;
///
/// // Per-call override: get the error body back instead of an `Err`.
/// let missing = client
///     .customers()
///     .with_options(RequestOptions::new().strict(false))
///     .get("cust_does_not_exist")?;
/// assert_eq!(missing.get("code"), Some(&json!(404)));
/// # let _ = customer;
/// # Ok::<(), voucherify_core::VoucherifyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api: ApiClient,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            api: ApiClient::with_transport(config, transport),
        }
    }

    /// The underlying request pipeline, for routes without a resource method.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn customers(&self) -> Customers<'_> {
        Customers::new(&self.api)
    }

    pub fn vouchers(&self) -> Vouchers<'_> {
        Vouchers::new(&self.api)
    }

    pub fn redemptions(&self) -> Redemptions<'_> {
        Redemptions::new(&self.api)
    }

    pub fn validations(&self) -> Validations<'_> {
        Validations::new(&self.api)
    }

    pub fn distributions(&self) -> Distributions<'_> {
        Distributions::new(&self.api)
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(&self.api)
    }

    pub fn products(&self) -> Products<'_> {
        Products::new(&self.api)
    }

    pub fn validation_rules(&self) -> ValidationRules<'_> {
        ValidationRules::new(&self.api)
    }
}

impl From<ApiClient> for Client {
    fn from(api: ApiClient) -> Self {
        Self { api }
    }
}
