//! Outbound transport subsystem.
//!
//! # Data Flow
//! ```text
//! HttpClient::send(&request)
//!     → inject.rs (duplicate request, overlay extra headers)
//!     → base.rs (reqwest-backed base transport, honours cancellation)
//!     → Response<Bytes> | TransportError, returned unchanged
//! ```
//!
//! # Design Decisions
//! - A transport borrows the caller's request; decorators work on a clone
//! - Decorators never wrap or rewrite the base transport's errors
//! - Redirects, retries and pooling belong to the base transport

use std::sync::Arc;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use http::{Request, Response};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub mod base;
pub mod client;
pub mod inject;
pub mod layer;

pub use self::client::{default_client, install_default_transport, HttpClient};
pub use self::base::ReqwestTransport;
pub use self::inject::HeaderInjectingTransport;
pub use self::layer::{ExtraHeaders, ExtraHeadersLayer};

/// Future returned by [`Transport::dispatch`].
pub type DispatchFuture<'a> = BoxFuture<'a, Result<Response<Bytes>, TransportError>>;

/// A transport shared between clients and decorators.
pub type SharedTransport = Arc<dyn Transport>;

/// Sends one HTTP request and yields one response or one error.
///
/// Implementations must be safe to call concurrently; a transport is
/// usually built once and shared by every client in the process.
pub trait Transport: Send + Sync + 'static {
    fn dispatch<'a>(&'a self, request: &'a Request<Bytes>) -> DispatchFuture<'a>;
}

/// Errors produced by base transports.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed (connect, TLS, timeout, protocol).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request's cancellation token fired before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// Low-level I/O failure from a custom transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    Http(#[from] http::Error),
}

/// Per-request cancellation handle, carried as a request extension.
///
/// Cloning a request clones its extensions, so the handle survives the
/// duplication performed by decorators.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
}

impl RequestContext {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Extension methods for attaching a [`RequestContext`] to a request.
pub trait RequestContextExt {
    fn context(&self) -> Option<&RequestContext>;
    fn with_context(self, ctx: RequestContext) -> Self;
}

impl<B> RequestContextExt for Request<B> {
    fn context(&self) -> Option<&RequestContext> {
        self.extensions().get::<RequestContext>()
    }

    fn with_context(mut self, ctx: RequestContext) -> Self {
        self.extensions_mut().insert(ctx);
        self
    }
}
