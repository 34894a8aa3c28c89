//! HTTP client facade and the process default client slot.
//!
//! `HttpClient` is the explicit injection point: construct it with whatever
//! transport should carry the requests. The default slot exists for code that
//! expects an ambient client; installing into it is always an explicit call.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwapOption;
use bytes::Bytes;
use http::{Method, Request, Response};

use super::{SharedTransport, TransportError};

static DEFAULT_CLIENT: LazyLock<ArcSwapOption<HttpClient>> = LazyLock::new(|| ArcSwapOption::empty());

/// A cheap-to-clone client over a shared transport.
#[derive(Clone)]
pub struct HttpClient {
    transport: SharedTransport,
}

impl HttpClient {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// Send a prepared request. The request is borrowed and left unchanged.
    pub async fn send(&self, request: &Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        self.transport.dispatch(request).await
    }

    pub async fn get(&self, uri: &str) -> Result<Response<Bytes>, TransportError> {
        self.request(Method::GET, uri, Bytes::new()).await
    }

    /// Build and send a request with the given method and body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: impl Into<Bytes>,
    ) -> Result<Response<Bytes>, TransportError> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body.into())?;
        self.send(&request).await
    }
}

/// Install `transport` as the process default and return the new client.
///
/// Replaces any previously installed client; clients already handed out keep
/// their old transport.
pub fn install_default_transport(transport: SharedTransport) -> Arc<HttpClient> {
    let client = Arc::new(HttpClient::new(transport));
    DEFAULT_CLIENT.store(Some(client.clone()));
    tracing::debug!("Default HTTP client transport installed");
    client
}

/// The installed default client, if any.
pub fn default_client() -> Option<Arc<HttpClient>> {
    DEFAULT_CLIENT.load_full()
}
