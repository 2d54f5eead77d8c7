// SPDX-License-Identifier: Apache-2.0

use lavka_server::{ApiConfig, AppState, FakeCarrierClient};
use lavka_store::Store;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Store,
    pub carrier: Arc<FakeCarrierClient>,
    // Dropped with the server; keeps the database alive for the test.
    _tmp: TempDir,
}

pub async fn spawn_server(carrier: FakeCarrierClient) -> TestServer {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = Store::open(tmp.path().join("lavka.sqlite3")).expect("open store");
    let carrier = Arc::new(carrier);
    let api = ApiConfig {
        token_secret: "integration-test-secret".to_string(),
        ..ApiConfig::default()
    };
    let state = AppState::with_config(store.clone(), carrier.clone(), api);
    let app = lavka_server::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });

    TestServer {
        addr,
        store,
        carrier,
        _tmp: tmp,
    }
}

pub struct RawResponse {
    pub status: u16,
    pub headers: String,
    pub body: String,
}

impl RawResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("json body")
    }

    pub fn msg(&self) -> String {
        self.json()["msg"].as_str().expect("msg field").to_string()
    }
}

pub async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    bearer: Option<&str>,
    body: Option<&serde_json::Value>,
) -> RawResponse {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut head = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(token) = bearer {
        head.push_str(&format!("Authorization: Bearer {token}\r\n"));
    }
    let payload = body.map(serde_json::Value::to_string);
    if let Some(payload) = &payload {
        head.push_str("Content-Type: application/json\r\n");
        head.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    }
    head.push_str("\r\n");
    stream
        .write_all(head.as_bytes())
        .await
        .expect("write request head");
    if let Some(payload) = &payload {
        stream
            .write_all(payload.as_bytes())
            .await
            .expect("write request body");
    }

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .await
        .expect("read response");
    let (head, body) = raw.split_once("\r\n\r\n").expect("response head");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status code");

    // 'Connection: close' responses may still be chunked.
    let body = if head.to_ascii_lowercase().contains("transfer-encoding: chunked") {
        decode_chunked(body)
    } else {
        body.to_string()
    };
    RawResponse {
        status,
        headers: head.to_string(),
        body,
    }
}

fn decode_chunked(raw: &str) -> String {
    let mut out = String::new();
    let mut rest = raw;
    loop {
        let Some((size_line, tail)) = rest.split_once("\r\n") else {
            break;
        };
        let size = usize::from_str_radix(size_line.trim(), 16).unwrap_or(0);
        if size == 0 {
            break;
        }
        out.push_str(&tail[..size]);
        rest = tail[size..].trim_start_matches("\r\n");
    }
    out
}

/// Registers a user over the API and returns (user id, access token).
pub async fn register_and_login(
    addr: SocketAddr,
    username: &str,
    password: &str,
) -> (i64, String) {
    let created = request(
        addr,
        "POST",
        "/user/",
        None,
        Some(&serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": password,
        })),
    )
    .await;
    assert_eq!(created.status, 201, "user create failed: {}", created.body);
    let user_id = created.json()["id"].as_i64().expect("user id");

    let tokens = request(
        addr,
        "POST",
        "/token/",
        None,
        Some(&serde_json::json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(tokens.status, 200, "token obtain failed: {}", tokens.body);
    let access = tokens.json()["access"].as_str().expect("access").to_string();
    (user_id, access)
}
