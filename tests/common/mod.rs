//! Shared utilities for integration testing.

use axum::http::StatusCode;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use chat_gateway::config::GatewayConfig;
use chat_gateway::http::GatewayServer;
use chat_gateway::lifecycle::Shutdown;

/// What the mock backend answers with.
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

#[allow(dead_code)]
impl MockReply {
    pub fn json(body: Value) -> Self {
        Self::raw(200, body.to_string())
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub request_line: String,
    pub content_type: Option<String>,
    pub body: Value,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    pub received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}/webhooks/rest/webhook", self.addr)
    }

    #[allow(dead_code)]
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

/// Start a programmable mock backend on an ephemeral port.
pub async fn start_programmable_backend<F>(f: F) -> MockBackend
where
    F: Fn(&Value) -> MockReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let log = received.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let _ = serve_one(socket, f.as_ref(), &log).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, received }
}

async fn serve_one<F>(
    mut socket: TcpStream,
    f: &F,
    log: &Mutex<Vec<ReceivedRequest>>,
) -> std::io::Result<()>
where
    F: Fn(&Value) -> MockReply,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default().to_string();
    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "content-type" => content_type = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body: Value = serde_json::from_slice(&buf[header_end..]).unwrap_or(Value::Null);
    let reply = f(&body);
    log.lock().unwrap().push(ReceivedRequest {
        request_line,
        content_type,
        body,
    });

    tokio::time::sleep(reply.delay).await;

    let reason = StatusCode::from_u16(reply.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reason,
        reply.body.len(),
        reply.body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

/// Start a backend that reads each request and hangs up without replying.
#[allow(dead_code)]
pub async fn start_dropping_backend() -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut chunk = [0u8; 4096];
                let _ = socket.read(&mut chunk).await;
            });
        }
    });

    MockBackend {
        addr,
        received: Arc::new(Mutex::new(Vec::new())),
    }
}

/// A port nothing is listening on.
#[allow(dead_code)]
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Gateway config pointing at `backend_url`.
pub fn gateway_config(backend_url: String) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.backend.url = backend_url;
    config.backend.use_system_proxy = false;
    config.static_files.enabled = false;
    config
}

/// Start a gateway on an ephemeral port. Keep the `Shutdown` alive for the test.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// POST a raw body to the gateway's webhook.
pub async fn post_webhook(gateway: SocketAddr, body: &str) -> (u16, Value) {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .post(format!("http://{}/webhook", gateway))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("Gateway unreachable");

    let status = res.status().as_u16();
    let json = res.json().await.expect("Gateway returned non-JSON body");
    (status, json)
}
