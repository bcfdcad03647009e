//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2.

use std::path::Path;

use application::error::ApplicationError;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Path that selects an in-memory database
const MEMORY_PATH: &str = ":memory:";

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored document is corrupt: {0}")]
    Corrupt(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Blocking task failed: {0}")]
    Task(String),
}

impl From<DatabaseError> for ApplicationError {
    fn from(err: DatabaseError) -> Self {
        Self::Store(err.to_string())
    }
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Pooled connection type alias
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a new connection pool
///
/// Every in-memory connection is its own database, so an in-memory pool
/// is capped at a single connection.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating database connection pool");

    let (manager, max_size) = if config.path == MEMORY_PATH {
        (SqliteConnectionManager::memory(), 1)
    } else {
        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Migration(format!("Failed to create database directory: {e}"))
                })?;
            }
        }
        (
            SqliteConnectionManager::file(&config.path),
            config.max_connections.max(1),
        )
    };

    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(PragmaCustomizer))
        .build(manager)?;

    if config.run_migrations {
        let conn = pool.get()?;
        crate::persistence::migrations::run_migrations(&conn)?;
    }

    debug!("Database connection pool created successfully");
    Ok(pool)
}

/// Applies connection settings to every pooled connection
#[derive(Debug)]
struct PragmaCustomizer;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        initialize_database(conn)
    }
}

/// Initialize a connection with basic settings
fn initialize_database(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
}

/// Run `f` with a pooled connection on the blocking thread pool
pub(crate) async fn with_connection<T, F>(pool: &ConnectionPool, f: F) -> Result<T, DatabaseError>
where
    T: Send + 'static,
    F: FnOnce(&PooledConn) -> Result<T, DatabaseError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let conn = pool.get()?;
        f(&conn)
    })
    .await
    .map_err(|e| DatabaseError::Task(e.to_string()))?
}
