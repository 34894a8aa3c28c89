//! Outbound HTTP header injection.
//!
//! Wraps any [`Transport`](transport::Transport) so that every request sent
//! through it carries a fixed set of extra header fields, without touching
//! the caller's request, body or response path.
//!
//! ```text
//! config / env / "K: V, K2: V2"
//!     → headers::HeaderSet
//!     → headers::HeaderStore::set
//!     → HeaderStore::transport_with_headers(base)
//!     → HttpClient / default client
//! ```

pub mod config;
pub mod headers;
pub mod observability;
pub mod transport;

pub use config::ExtraHeadersConfig;
pub use headers::{parse_headers_string, HeaderSet, HeaderStore};
pub use transport::{HeaderInjectingTransport, HttpClient, SharedTransport, Transport, TransportError};
