//! Tower middleware flavour of header injection.
//!
//! For client stacks built from `tower::Service`s, where requests are passed
//! by value: the caller has already handed over ownership, so the headers are
//! written straight onto the request before it reaches the inner service.

use std::fmt;
use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};

use super::inject::{apply_headers, compile_headers, CompiledHeaders};
use crate::headers::{HeaderSet, HeaderStore};

/// Layer that wraps services in [`ExtraHeaders`].
#[derive(Clone)]
pub struct ExtraHeadersLayer {
    headers: CompiledHeaders,
}

impl ExtraHeadersLayer {
    pub fn new(headers: &HeaderSet) -> Self {
        Self {
            headers: compile_headers(headers),
        }
    }

    /// Snapshot whatever the store currently holds.
    pub fn from_store(store: &HeaderStore) -> Self {
        Self::new(&store.get())
    }
}

// Values are often credentials; only names are printed.
fn header_names(headers: &CompiledHeaders) -> Vec<&str> {
    headers.iter().map(|(name, _)| name.as_str()).collect()
}

impl fmt::Debug for ExtraHeadersLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraHeadersLayer")
            .field("headers", &header_names(&self.headers))
            .finish()
    }
}

impl<S> Layer<S> for ExtraHeadersLayer {
    type Service = ExtraHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExtraHeaders {
            inner,
            headers: self.headers.clone(),
        }
    }
}

/// Service that overwrites a fixed set of request headers.
#[derive(Clone)]
pub struct ExtraHeaders<S> {
    inner: S,
    headers: CompiledHeaders,
}

impl<S> ExtraHeaders<S> {
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: fmt::Debug> fmt::Debug for ExtraHeaders<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraHeaders")
            .field("inner", &self.inner)
            .field("headers", &header_names(&self.headers))
            .finish()
    }
}

impl<S, B> Service<Request<B>> for ExtraHeaders<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        apply_headers(&self.headers, req.headers_mut());
        self.inner.call(req)
    }
}
