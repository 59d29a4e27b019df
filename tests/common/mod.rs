//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Bytes};
use axum::extract::Request;
use axum::http::{HeaderMap, Method, Uri};
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use webid_proxy::config::{ProxyConfig, TargetProperties};
use webid_proxy::filter::{RequestFilter, WebIdFilter};
use webid_proxy::{HttpServer, Shutdown, TargetConfig};

/// A request as seen by a backend.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Captured {
    pub fn header_values(&self, name: &str) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .map(|v| v.to_str().unwrap().to_owned())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<Captured>>>);

impl Recorded {
    pub fn all(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn single(&self) -> Captured {
        let all = self.all();
        assert_eq!(all.len(), 1, "expected exactly one backend request");
        all.into_iter().next().unwrap()
    }
}

/// Start a backend that records every request and answers 200 "ok".
pub async fn start_recording_backend() -> (SocketAddr, Recorded) {
    start_recording_backend_with("ok", Duration::ZERO).await
}

/// Start a backend that records every request, waits `delay` and answers
/// 200 with `reply`.
pub async fn start_recording_backend_with(
    reply: &'static str,
    delay: Duration,
) -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let sink = recorded.clone();

    let app = Router::new().fallback(move |request: Request| {
        let sink = sink.clone();
        async move {
            let (parts, body) = request.into_parts();
            let body = to_bytes(body, usize::MAX).await.unwrap();
            sink.0.lock().unwrap().push(Captured {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });
            tokio::time::sleep(delay).await;
            reply
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorded)
}

/// Start a backend that writes `response` verbatim to every connection after
/// reading the request head. Returns the number of connections served.
pub async fn start_scripted_backend(response: &'static str) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let counter = counter.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
                tokio::time::sleep(Duration::from_millis(10)).await;
            });
        }
    });

    (addr, hits)
}

/// A proxy running on an ephemeral port.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub target: Arc<TargetConfig>,
    pub updates: mpsc::UnboundedSender<ProxyConfig>,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a proxy forwarding to `target` with the default filter chain.
pub async fn start_proxy(target: Option<String>) -> TestProxy {
    start_proxy_with_filters(target, vec![Arc::new(WebIdFilter::new())]).await
}

/// Start a proxy forwarding to `target` behind `filters`.
pub async fn start_proxy_with_filters(
    target: Option<String>,
    filters: Vec<Arc<dyn RequestFilter>>,
) -> TestProxy {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.target = target.map(TargetProperties::new);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::with_filters(config, filters);
    let target = server.target();
    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    TestProxy {
        addr,
        target,
        updates,
        shutdown,
    }
}

/// Test client: never follows redirects, never uses a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Send `target` as the request line of a raw HTTP/1.1 GET and return the
/// whole response. Unlike `client()`, the target reaches the wire unchanged.
pub async fn raw_get(addr: SocketAddr, target: &str) -> String {
    let mut socket = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    socket.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

pub fn http_base(addr: SocketAddr) -> String {
    format!("http://{addr}")
}
