//! Default base transport built on `reqwest`.
//!
//! # Responsibilities
//! - Send one `http::Request<Bytes>` and buffer the response
//! - Apply TLS verification, timeout and user-agent settings
//! - Abort when the request's cancellation token fires

use std::time::Duration;

use bytes::Bytes;
use http::{Request, Response};

use super::{DispatchFuture, RequestContextExt, Transport, TransportError};
use crate::config::TransportConfig;

/// Base transport delegating to a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client from transport settings.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        if config.insecure {
            tracing::warn!("TLS certificate verification disabled");
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    /// Use an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(&self, request: &Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let outbound = reqwest::Request::try_from(request.clone())?;
        let response = self.client.execute(outbound).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut out = Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

impl Transport for ReqwestTransport {
    fn dispatch<'a>(&'a self, request: &'a Request<Bytes>) -> DispatchFuture<'a> {
        Box::pin(async move {
            let Some(ctx) = request.context() else {
                return self.send(request).await;
            };

            if ctx.is_cancelled() {
                return Err(TransportError::Cancelled);
            }

            tokio::select! {
                biased;
                _ = ctx.token().cancelled() => Err(TransportError::Cancelled),
                result = self.send(request) => result,
            }
        })
    }
}
