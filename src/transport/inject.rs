//! Header-injecting transport decorator.
//!
//! # Responsibilities
//! - Duplicate each outbound request (extensions included)
//! - Overlay the configured headers on the duplicate, replacing same-name fields
//! - Delegate to the base transport and return its result untouched
//!
//! # Design Decisions
//! - Headers are compiled to typed names/values once, at construction
//! - The header snapshot is immutable; reconfiguring means building a new wrapper
//! - No locking: the snapshot is read-only and the base is `Sync`

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Request;

use super::{DispatchFuture, SharedTransport, Transport};
use crate::headers::HeaderSet;
use crate::observability::metrics;

/// Header fields ready to be written onto a request.
pub type CompiledHeaders = Arc<[(HeaderName, HeaderValue)]>;

/// Convert a [`HeaderSet`] into typed header fields.
///
/// Entries whose name or value is not a legal HTTP field are skipped with a
/// warning; they could never be sent, and dispatch must not grow new errors.
pub fn compile_headers(headers: &HeaderSet) -> CompiledHeaders {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let header_name = match HeaderName::from_bytes(name.as_bytes()) {
                Ok(n) => n,
                Err(_) => {
                    tracing::warn!(header = %name, "Skipping extra header with invalid name");
                    return None;
                }
            };
            let header_value = match HeaderValue::from_str(value) {
                Ok(v) => v,
                Err(_) => {
                    tracing::warn!(header = %name, "Skipping extra header with invalid value");
                    return None;
                }
            };
            Some((header_name, header_value))
        })
        .collect()
}

/// Overwrite each compiled header on `target`, dropping any previous values.
pub fn apply_headers(headers: &[(HeaderName, HeaderValue)], target: &mut HeaderMap) {
    for (name, value) in headers {
        target.insert(name.clone(), value.clone());
    }
}

/// A [`Transport`] that adds a fixed set of headers to every request.
pub struct HeaderInjectingTransport {
    base: SharedTransport,
    headers: CompiledHeaders,
}

impl HeaderInjectingTransport {
    /// Wrap `base`, injecting a snapshot of `headers` into every request.
    pub fn new(base: SharedTransport, headers: &HeaderSet) -> Self {
        Self::from_compiled(base, compile_headers(headers))
    }

    pub fn from_compiled(base: SharedTransport, headers: CompiledHeaders) -> Self {
        Self { base, headers }
    }

    /// The headers this transport injects.
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// The wrapped transport.
    pub fn base(&self) -> &SharedTransport {
        &self.base
    }
}

impl fmt::Debug for HeaderInjectingTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("HeaderInjectingTransport")
            .field("headers", &names)
            .finish_non_exhaustive()
    }
}

impl Transport for HeaderInjectingTransport {
    fn dispatch<'a>(&'a self, request: &'a Request<Bytes>) -> DispatchFuture<'a> {
        // The caller keeps its request; only the clone carries the extra fields.
        let mut outbound = request.clone();
        apply_headers(&self.headers, outbound.headers_mut());

        tracing::trace!(
            method = %outbound.method(),
            uri = %outbound.uri(),
            injected = self.headers.len(),
            "Dispatching request with extra headers"
        );

        Box::pin(async move {
            let result = self.base.dispatch(&outbound).await;
            metrics::record_dispatch(result.is_ok());
            result
        })
    }
}
