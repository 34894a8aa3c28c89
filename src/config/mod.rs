//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (header names/values, timeouts)
//!     → ExtraHeadersConfig (validated, immutable)
//!     → resolve.rs (structured map + flat string, else env JSON)
//!     → HeaderStore::set + base transport wrapped with the headers
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → resolve.rs::HeaderInstaller replaces the stored set and
//!        re-installs the default transport
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation collects every error, not just the first
//! - Source precedence lives here, never in the transport core

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use resolve::{configure, resolve_headers, resolve_headers_from_env, HeaderInstaller};
pub use schema::{ExtraHeadersConfig, HeadersConfig, ObservabilityConfig, TransportConfig};
