//! End-to-end header injection over a real HTTP connection.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::Request;

use extra_headers::config::configure;
use extra_headers::config::TransportConfig;
use extra_headers::transport::{
    default_client, install_default_transport, ReqwestTransport, RequestContext, RequestContextExt,
};
use extra_headers::{
    ExtraHeadersConfig, HeaderInjectingTransport, HeaderSet, HeaderStore, HttpClient,
    SharedTransport, Transport, TransportError,
};

mod common;

fn base_transport() -> SharedTransport {
    Arc::new(ReqwestTransport::new(&TransportConfig::default()).unwrap())
}

async fn next_request(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<common::CapturedRequest>,
) -> common::CapturedRequest {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("backend saw no request")
        .expect("backend stopped")
}

#[tokio::test]
async fn test_basic_header_injection() {
    let (addr, mut seen) = common::start_capture_backend("ok").await;

    let headers: HeaderSet = [
        ("X-Custom-Header", "test-value"),
        ("X-Proxy-Auth", "bearer-token-123"),
        ("X-Request-Source", "integration-test"),
    ]
    .into_iter()
    .collect();
    let client = HttpClient::new(Arc::new(HeaderInjectingTransport::new(base_transport(), &headers)));

    let response = client.get(&format!("http://{}/v3", addr)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), &Bytes::from_static(b"ok"));
    assert_eq!(response.headers()["x-backend"], "mock");

    let captured = next_request(&mut seen).await;
    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/v3");
    for (name, value) in headers.iter() {
        assert_eq!(captured.header(name), Some(value), "header {}", name);
    }
}

#[tokio::test]
async fn test_preserves_original_headers() {
    let (addr, mut seen) = common::start_capture_backend("ok").await;

    let headers = HeaderSet::parse("X-Custom: custom-value, X-Override: injected");
    let transport = HeaderInjectingTransport::new(base_transport(), &headers);

    let request = Request::post(format!("http://{}/items", addr))
        .header("X-Original", "original-value")
        .header("Authorization", "Bearer original-token")
        .header("X-Override", "caller")
        .body(Bytes::from_static(b"{\"name\":\"a\"}"))
        .unwrap();
    let before = request.headers().clone();

    transport.dispatch(&request).await.unwrap();

    let captured = next_request(&mut seen).await;
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.header("x-original"), Some("original-value"));
    assert_eq!(captured.header("authorization"), Some("Bearer original-token"));
    assert_eq!(captured.header("x-custom"), Some("custom-value"));
    assert_eq!(captured.header("x-override"), Some("injected"));
    assert_eq!(captured.header("content-length"), Some("12"));

    assert_eq!(request.headers(), &before);
}

#[tokio::test]
async fn test_multiple_proxy_headers() {
    let (addr, mut seen) = common::start_capture_backend("{\"status\": \"ok\"}").await;

    let headers = HeaderSet::parse(
        "X-Forwarded-For: 10.0.0.1, X-Proxy-Token: secret-proxy-token, X-Request-ID: req-12345, \
         X-Tenant-ID: tenant-abc, X-Custom-Auth: Bearer my-proxy-auth, X-Firewall-Bypass-Key: fw-key-xyz",
    );
    assert_eq!(headers.len(), 6);

    let store = HeaderStore::new();
    store.set(headers.clone());
    let client = HttpClient::new(store.transport_with_headers(base_transport()));
    client.get(&format!("http://{}/", addr)).await.unwrap();

    let captured = next_request(&mut seen).await;
    for (name, value) in headers.iter() {
        assert_eq!(captured.header(name), Some(value), "header {}", name);
    }
}

#[tokio::test]
async fn test_default_client_injects_headers() {
    let (addr, mut seen) = common::start_capture_backend("ok").await;

    let store = HeaderStore::new();
    store.set(HeaderSet::parse("X-Global-Header: global-value"));
    install_default_transport(store.transport_with_headers(base_transport()));

    let client = default_client().expect("default client installed");
    client.get(&format!("http://{}/", addr)).await.unwrap();

    let captured = next_request(&mut seen).await;
    assert_eq!(captured.header("x-global-header"), Some("global-value"));
}

#[tokio::test]
async fn test_empty_store_sends_request_unchanged() {
    let (addr, mut seen) = common::start_capture_backend("ok").await;

    let store = HeaderStore::new();
    let base = base_transport();
    let transport = store.transport_with_headers(base.clone());
    assert!(Arc::ptr_eq(&transport, &base));

    let request = Request::get(format!("http://{}/", addr))
        .header("X-Only", "caller")
        .body(Bytes::new())
        .unwrap();
    transport.dispatch(&request).await.unwrap();

    let captured = next_request(&mut seen).await;
    assert_eq!(captured.header("x-only"), Some("caller"));
    assert!(captured.headers.keys().all(|k| !k.starts_with("x-") || k == "x-only"));
}

#[tokio::test]
async fn test_cancelled_request_reports_base_error() {
    let (addr, _seen) = common::start_capture_backend("ok").await;

    let headers = HeaderSet::parse("X-A: 1");
    let transport = HeaderInjectingTransport::new(base_transport(), &headers);

    let ctx = RequestContext::default();
    ctx.cancel();
    let request = Request::get(format!("http://{}/", addr))
        .body(Bytes::new())
        .unwrap()
        .with_context(ctx);

    let result = transport.dispatch(&request).await;
    assert!(matches!(result, Err(TransportError::Cancelled)));
}

#[tokio::test]
async fn test_connection_failure_passes_through() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let headers = HeaderSet::parse("X-A: 1");
    let transport = HeaderInjectingTransport::new(base_transport(), &headers);
    let request = Request::get(format!("http://{}/", addr))
        .body(Bytes::new())
        .unwrap();

    match transport.dispatch(&request).await {
        Err(TransportError::Request(err)) => assert!(err.is_connect()),
        other => panic!("expected connect error, got {:?}", other.map(|r| r.status())),
    }
}

#[tokio::test]
async fn test_configure_from_config() {
    let (addr, mut seen) = common::start_capture_backend("ok").await;

    let mut config: ExtraHeadersConfig = toml::from_str(
        r#"
        [headers]
        extra = { "X-Proxy-Token" = "from-table" }
        spec = "X-Request-Source: config, X-Proxy-Token: from-spec"
        "#,
    )
    .unwrap();
    config.headers.env_var = "EXTRA_HEADERS_INTEGRATION_UNSET".to_string();

    let store = HeaderStore::new();
    let client = HttpClient::new(configure(&config, &store).unwrap());
    client.get(&format!("http://{}/", addr)).await.unwrap();

    let captured = next_request(&mut seen).await;
    assert_eq!(captured.header("x-proxy-token"), Some("from-table"));
    assert_eq!(captured.header("x-request-source"), Some("config"));
    assert_eq!(store.get().len(), 2);
}
