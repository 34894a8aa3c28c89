//! Metrics emitted through the `metrics` facade.
//!
//! # Metrics
//! - `extra_headers_dispatch_total` (counter): requests sent through an
//!   injecting transport, by `outcome` (`ok`/`error`)
//! - `extra_headers_store_updates_total` (counter): header store replacements
//! - `extra_headers_configured` (gauge): headers in the store after the last update
//!
//! Without an installed recorder these calls are no-ops.

use metrics::{counter, gauge};

/// Record the outcome of one dispatch through an injecting transport.
pub fn record_dispatch(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("extra_headers_dispatch_total", "outcome" => outcome).increment(1);
}

/// Record a header store replacement.
pub fn record_store_update(configured: usize) {
    counter!("extra_headers_store_updates_total").increment(1);
    gauge!("extra_headers_configured").set(configured as f64);
}
