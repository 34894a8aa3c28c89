//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! headers::store   → metrics.rs (store updates, configured header count)
//! transport::inject → metrics.rs (dispatch outcomes)
//! all subsystems   → logging.rs (tracing events; header values never logged)
//! ```
//!
//! # Design Decisions
//! - The library only emits through the `tracing` and `metrics` facades
//! - Installing a subscriber or recorder is the binary's job

pub mod logging;
pub mod metrics;
