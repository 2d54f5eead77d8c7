// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use lavka_server::{
    build_router, validate_startup_config_contract, ApiConfig, AppState, HttpCarrierClient,
    RetryPolicy,
};
use lavka_store::Store;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn env_duration_secs(name: &str, default_secs: u64) -> Duration {
    Duration::from_secs(env_u64(name, default_secs))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("LAVKA_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("LAVKA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let db_path = PathBuf::from(
        env::var("LAVKA_DB_PATH").unwrap_or_else(|_| "artifacts/lavka.sqlite3".to_string()),
    );

    let api = ApiConfig {
        max_body_bytes: env_usize("LAVKA_MAX_BODY_BYTES", ApiConfig::default().max_body_bytes),
        request_timeout: env_duration_ms("LAVKA_REQUEST_TIMEOUT_MS", 5_000),
        token_secret: env::var("LAVKA_TOKEN_SECRET").unwrap_or_default(),
        access_token_ttl: env_duration_secs("LAVKA_ACCESS_TOKEN_TTL_SECS", 300),
        refresh_token_ttl: env_duration_secs("LAVKA_REFRESH_TOKEN_TTL_SECS", 86_400),
        carrier_base_url: env::var("LAVKA_CARRIER_BASE_URL")
            .unwrap_or_else(|_| ApiConfig::default().carrier_base_url),
        carrier_api_key: env::var("LAVKA_CARRIER_API_KEY").unwrap_or_default(),
    };
    validate_startup_config_contract(&api)?;

    let store = Store::open(&db_path).map_err(|e| format!("store open failed: {e}"))?;
    info!(path = %db_path.display(), "database ready");

    let retry = RetryPolicy {
        max_attempts: env_u64("LAVKA_CARRIER_RETRY_ATTEMPTS", 4) as u32,
        base_backoff_ms: env_u64("LAVKA_CARRIER_RETRY_BACKOFF_MS", 120),
    };
    let carrier = Arc::new(
        HttpCarrierClient::new(api.carrier_base_url.clone(), api.carrier_api_key.clone())
            .with_retry(retry),
    );

    let state = AppState::with_config(store, carrier, api);
    let app = build_router(state);

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket
        .set_keepalive(env_bool("LAVKA_TCP_KEEPALIVE_ENABLED", true))
        .map_err(|e| format!("set_keepalive failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("lavka-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            // Drain in-flight requests before the process exits.
            let drain_ms = env_u64("LAVKA_SHUTDOWN_DRAIN_MS", 5_000);
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
