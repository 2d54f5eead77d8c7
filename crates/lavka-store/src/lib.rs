#![forbid(unsafe_code)]
//! SQLite persistence for the shop: users, catalog, baskets, and the
//! checkout workflow. Connections are opened per call on the blocking
//! pool behind a connection-count semaphore.

use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

mod baskets;
mod catalog;
mod checkout;
mod schema;
mod users;

pub use checkout::CheckoutError;
pub use users::UserWriteError;

pub const CRATE_NAME: &str = "lavka-store";

const MAX_CONNECTIONS: usize = 16;

#[derive(Debug)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self(err.to_string())
    }
}

#[derive(Clone)]
pub struct Store {
    path: PathBuf,
    conn_semaphore: Arc<Semaphore>,
}

impl Store {
    /// Opens (creating if needed) the database at `path` and applies the
    /// schema idempotently.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError(e.to_string()))?;
            }
        }
        let conn = open_connection(&path)?;
        schema::init(&conn)?;
        Ok(Self {
            path,
            conn_semaphore: Arc::new(Semaphore::new(MAX_CONNECTIONS)),
        })
    }

    pub(crate) async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let _permit = self
            .conn_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| StoreError(e.to_string()))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = open_connection(&path)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError(format!("store task join failed: {e}")))?
    }
}

fn open_connection(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000; PRAGMA synchronous=NORMAL;",
    )?;
    conn.set_prepared_statement_cache_capacity(64);
    Ok(conn)
}

pub(crate) fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}
