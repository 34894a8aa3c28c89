//! Shared store for the currently configured extra headers.
//!
//! # Responsibilities
//! - Hold the active [`HeaderSet`], replaced wholesale on every `set`
//! - Hand out consistent snapshots to any number of concurrent readers
//! - Build header-injecting transports from the current snapshot
//!
//! # Design Decisions
//! - `ArcSwap` slot: writers swap a whole `Arc<HeaderSet>`, readers never block
//!   and never see a mix of two writes
//! - Pass a `HeaderStore` (usually in an `Arc`) to whoever builds transports;
//!   `global()` is only for code that relies on an ambient default

use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use super::HeaderSet;
use crate::observability::metrics;
use crate::transport::{HeaderInjectingTransport, SharedTransport};

static GLOBAL_STORE: LazyLock<HeaderStore> = LazyLock::new(HeaderStore::new);

/// Holder of the active extra-header set.
pub struct HeaderStore {
    current: ArcSwap<HeaderSet>,
}

impl HeaderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(HeaderSet::new()),
        }
    }

    /// Replace the stored set. An empty set clears the store.
    pub fn set(&self, headers: HeaderSet) {
        let count = headers.len();
        tracing::debug!(count, names = ?headers.names(), "Extra headers replaced");
        self.current.store(Arc::new(headers));
        metrics::record_store_update(count);
    }

    /// Remove every stored header.
    pub fn clear(&self) {
        self.set(HeaderSet::new());
    }

    /// Snapshot of the stored set (empty if nothing was set).
    pub fn get(&self) -> Arc<HeaderSet> {
        self.current.load_full()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// Wrap `base` with the currently stored headers.
    ///
    /// Returns `base` itself when the store is empty. Otherwise the returned
    /// transport carries a snapshot: later `set` calls do not affect it.
    pub fn transport_with_headers(&self, base: SharedTransport) -> SharedTransport {
        let headers = self.get();
        if headers.is_empty() {
            return base;
        }
        Arc::new(HeaderInjectingTransport::new(base, &headers))
    }
}

impl Default for HeaderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HeaderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderStore")
            .field("headers", &*self.current.load())
            .finish()
    }
}

/// The process-wide store.
pub fn global() -> &'static HeaderStore {
    &GLOBAL_STORE
}

/// Replace the headers in the process-wide store.
pub fn set_extra_headers(headers: HeaderSet) {
    global().set(headers);
}

/// Snapshot of the headers in the process-wide store.
pub fn extra_headers() -> Arc<HeaderSet> {
    global().get()
}

/// [`HeaderStore::transport_with_headers`] on the process-wide store.
pub fn transport_with_headers(base: SharedTransport) -> SharedTransport {
    global().transport_with_headers(base)
}
