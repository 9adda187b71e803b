//! Path segment encoding.
//!
//! Route templates such as `/vouchers/{code}/enable` are assembled from fixed
//! text and caller-supplied identifiers. Only the identifiers are encoded, so
//! the `/` separators of the template survive while a `/` inside a voucher
//! code does not split the route.

use std::borrow::Cow;

/// Percent-encode a single path segment. Everything outside the RFC 3986
/// unreserved set (`A-Z a-z 0-9 - . _ ~`) is escaped.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
