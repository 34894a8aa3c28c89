//! Header source resolution and application.
//!
//! # Responsibilities
//! - Combine the configured sources into one header set
//! - Store the result and build the transport to install
//! - Re-install the default transport whenever the watcher delivers a new config
//!
//! # Design Decisions
//! - Structured `extra` table overrides the flat `spec` string on conflict
//! - The environment variable is consulted only when the file yields nothing
//! - A malformed environment value is reported, not silently ignored

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::loader::ConfigError;
use crate::config::schema::{ExtraHeadersConfig, HeadersConfig};
use crate::headers::{parse_headers_string, HeaderSet, HeaderStore};
use crate::transport::{install_default_transport, HttpClient, ReqwestTransport, SharedTransport};

/// Resolve the header set from configuration and an environment value.
///
/// `env_value` is the raw content of `config.env_var`, if set.
pub fn resolve_headers(
    config: &HeadersConfig,
    env_value: Option<&str>,
) -> Result<HeaderSet, ConfigError> {
    let mut headers = config
        .spec
        .as_deref()
        .map(parse_headers_string)
        .unwrap_or_default();
    headers.extend(config.extra.clone());

    if !headers.is_empty() {
        return Ok(headers);
    }

    match env_value.map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            serde_json::from_str(raw).map_err(|source| ConfigError::EnvJson {
                var: config.env_var.clone(),
                source,
            })
        }
        _ => Ok(headers),
    }
}

/// [`resolve_headers`] reading `config.env_var` from the process environment.
pub fn resolve_headers_from_env(config: &HeadersConfig) -> Result<HeaderSet, ConfigError> {
    let env_value = std::env::var(&config.env_var).ok();
    resolve_headers(config, env_value.as_deref())
}

/// Resolve headers into `store` and build the transport to install.
///
/// The returned transport is the plain base transport when no headers are
/// configured, and a header-injecting wrapper around it otherwise.
pub fn configure(
    config: &ExtraHeadersConfig,
    store: &HeaderStore,
) -> Result<SharedTransport, ConfigError> {
    let headers = resolve_headers_from_env(&config.headers)?;
    tracing::info!(count = headers.len(), "Extra headers configured");
    store.set(headers);

    let base: SharedTransport = Arc::new(ReqwestTransport::new(&config.transport)?);
    Ok(store.transport_with_headers(base))
}

/// Applies configured headers to a store and installs the resulting
/// transport as the process default, once at startup and again on every
/// reload.
///
/// `overrides` (e.g. command-line `-H` flags) are laid over whatever the
/// configuration resolves to, every time. The base transport is fixed for
/// the installer's lifetime; transport settings take effect on restart.
pub struct HeaderInstaller {
    store: Arc<HeaderStore>,
    base: SharedTransport,
    overrides: HeaderSet,
}

impl HeaderInstaller {
    pub fn new(store: Arc<HeaderStore>, base: SharedTransport) -> Self {
        Self {
            store,
            base,
            overrides: HeaderSet::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: HeaderSet) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn store(&self) -> &Arc<HeaderStore> {
        &self.store
    }

    /// Resolve `config`, lay the overrides on top, replace the stored set and
    /// return a transport wrapping the base with the new snapshot.
    pub fn build(&self, config: &ExtraHeadersConfig) -> Result<SharedTransport, ConfigError> {
        let mut headers = resolve_headers_from_env(&config.headers)?;
        headers.extend(self.overrides.clone());
        self.store.set(headers);
        Ok(self.store.transport_with_headers(self.base.clone()))
    }

    /// [`build`](Self::build), then install the transport as the default client.
    pub fn install(&self, config: &ExtraHeadersConfig) -> Result<Arc<HttpClient>, ConfigError> {
        Ok(install_default_transport(self.build(config)?))
    }

    /// Re-install for every config delivered on `updates`, until the sending
    /// side is dropped. A config whose headers cannot be resolved leaves the
    /// current headers and default client in place.
    pub async fn run(self, mut updates: mpsc::UnboundedReceiver<ExtraHeadersConfig>) {
        while let Some(config) = updates.recv().await {
            match self.install(&config) {
                Ok(_) => {
                    tracing::info!(count = self.store.get().len(), "Extra headers reloaded");
                }
                Err(e) => {
                    tracing::error!("Failed to resolve reloaded headers: {}. Keeping current headers.", e);
                }
            }
        }
    }
}
