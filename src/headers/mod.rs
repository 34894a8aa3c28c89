//! Header sets and the process-wide header store.
//!
//! # Data Flow
//! ```text
//! "K1: V1, K2: V2"            structured map / env JSON
//!     → parser.rs                    │
//!     → HeaderSet ◀──────────────────┘
//!     → store.rs (HeaderStore::set, wholesale replacement)
//!     → HeaderStore::transport_with_headers(base)
//!     → transport::HeaderInjectingTransport (snapshot of the set)
//! ```
//!
//! # Design Decisions
//! - One value per header name; names compare case-insensitively
//! - Parsing is lossy and never fails
//! - The store hands out immutable snapshots, never a live view

pub mod parser;
pub mod set;
pub mod store;

pub use parser::parse_headers_string;
pub use set::HeaderSet;
pub use store::HeaderStore;
