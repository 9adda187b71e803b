//! Blocking client for the Voucherify promotions API.
//!
//! # Overview
//! Every resource operation (vouchers, redemptions, validations, customers,
//! orders, products, validation rules) builds one [`RequestSpec`] and funnels
//! it through the shared [`ApiClient`] pipeline: compose the URL, attach the
//! authentication headers, execute one round trip, then decode the body or
//! normalize the failure into an [`ErrorPayload`].
//!
//! # Design
//! - [`ClientConfig`] is immutable once the client is built; resources borrow
//!   the client and never own it.
//! - Strictness decides how failures surface: strict calls return
//!   `Err(VoucherifyError)`, non-strict calls return the error body as an
//!   ordinary [`ApiResponse`]. [`RequestOptions`] overrides strictness and
//!   timeout per call.
//! - Request building and response parsing are pure; only a [`Transport`]
//!   does I/O, so the pipeline can be exercised without a server.
//! - No retries, no caching, no pagination helpers.

pub mod client;
pub mod config;
pub mod error;
mod facade;
pub mod http;
pub mod normalize;
pub mod options;
pub mod path;
pub mod resources;
pub mod response;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ConfigError, Result, TransportError, VoucherifyError};
pub use facade::Client;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::ErrorPayload;
pub use options::{query_pairs, RequestOptions, RequestSpec};
pub use path::encode_segment;
pub use response::ApiResponse;
pub use transport::{Transport, UreqTransport};
