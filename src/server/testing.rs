//! Live-server helpers for tests that speak raw HTTP/1.1 over TCP

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use super::{create_listener, run_server_loop, SignalHandler};
use crate::config::{AppState, Config};

pub struct TestServer {
    pub addr: SocketAddr,
    pub signals: Arc<SignalHandler>,
    pub handle: JoinHandle<usize>,
}

/// Built-in defaults with access logging off
pub fn test_config() -> Config {
    let mut config =
        Config::load_from("this-config-file-does-not-exist").expect("defaults should load");
    config.logging.access_log = false;
    config
}

/// Run the accept loop on an ephemeral loopback port
pub fn start(config: Config) -> TestServer {
    let bind: SocketAddr = "127.0.0.1:0".parse().expect("valid addr");
    let listener = create_listener(bind, 16).expect("bind succeeds");
    let addr = listener.local_addr().expect("bound address");
    let state = Arc::new(AppState::new(config).expect("valid state"));
    let signals = Arc::new(SignalHandler::new());
    let handle = tokio::spawn(run_server_loop(listener, state, Arc::clone(&signals)));
    TestServer {
        addr,
        signals,
        handle,
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TestResponse {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("JSON body")
    }
}

/// Write `raw` and read exactly one response from the stream
pub async fn send(stream: &mut TcpStream, raw: &str) -> TestResponse {
    stream.write_all(raw.as_bytes()).await.expect("write request");
    read_response(stream).await
}

/// One request on a fresh connection
pub async fn exchange(addr: SocketAddr, raw: &str) -> TestResponse {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    send(&mut stream, raw).await
}

/// `POST /chat` with a JSON body, closing the connection afterwards
pub fn chat_request(body: &str) -> String {
    format!(
        "POST /chat HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

async fn read_response(stream: &mut TcpStream) -> TestResponse {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(response) = parse(&buf) {
            return response;
        }
        let n = stream.read(&mut chunk).await.expect("read response");
        assert!(n > 0, "connection closed mid-response: {:?}", String::from_utf8_lossy(&buf));
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// A complete response in `buf`, using Content-Length for the body
fn parse(buf: &[u8]) -> Option<TestResponse> {
    let head_end = buf.windows(4).position(|w| w == b"\r\n\r\n")?;
    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");

    let status = lines
        .next()?
        .split_whitespace()
        .nth(1)?
        .parse::<u16>()
        .ok()?;
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();

    let length = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let body_start = head_end + 4;
    if buf.len() < body_start + length {
        return None;
    }

    Some(TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&buf[body_start..body_start + length]).to_string(),
    })
}
