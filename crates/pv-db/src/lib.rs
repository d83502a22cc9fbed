//! # pv-db
//!
//! libSQL database operations for Pravartak.
//!
//! Holds the credential store (mentors) and the record store (students),
//! plus the one-time bootstrap that seeds demo mentors. Works against a
//! local `SQLite` file, an in-memory database for tests, or a remote libSQL
//! server.
//!
//! Every write runs in its own `BEGIN IMMEDIATE` transaction on a connection
//! opened for that call, and is committed only if every statement succeeds.

pub mod error;
pub mod helpers;
mod migrations;
mod password;
pub mod repos;
pub mod seed;
pub mod service;
mod test_support;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use pv_config::DatabaseConfig;

const MEMORY_PATH: &str = ":memory:";

/// Central database handle.
///
/// File and remote databases hand out a fresh connection per call, so
/// concurrent requests get independent transactions. An in-memory database
/// only exists on the connection that created it, so every caller shares
/// that one connection; this mode is meant for tests and single-user tools.
pub struct PvDb {
    db: libsql::Database,
    primary: libsql::Connection,
    shared_connection: bool,
    remote: bool,
    busy_timeout_ms: u64,
}

impl PvDb {
    /// Open the database described by `config`, running migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            Self::open_local_with_timeout(config.local_path(), config.busy_timeout_ms).await
        }
    }

    /// Open a local database at `path` (or `":memory:"`).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with_timeout(path, DatabaseConfig::default().busy_timeout_ms).await
    }

    async fn open_local_with_timeout(
        path: &str,
        busy_timeout_ms: u64,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let primary = db.connect()?;
        configure_connection(&primary, busy_timeout_ms).await?;

        let shared_connection = path == MEMORY_PATH;
        if !shared_connection {
            pragma(&primary, "PRAGMA journal_mode = WAL").await?;
        }

        let pv_db = Self {
            db,
            primary,
            shared_connection,
            remote: false,
            busy_timeout_ms,
        };
        pv_db.run_migrations().await?;
        tracing::debug!(path, "opened local database");
        Ok(pv_db)
    }

    /// Open a remote libSQL database. Connection pragmas are left to the server.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let primary = db.connect()?;
        let pv_db = Self {
            db,
            primary,
            shared_connection: false,
            remote: true,
            busy_timeout_ms: 0,
        };
        pv_db.run_migrations().await?;
        tracing::debug!(url, "opened remote database");
        Ok(pv_db)
    }

    /// A connection for one unit of work.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a new connection cannot be opened or configured.
    pub async fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        if self.shared_connection {
            return Ok(self.primary.clone());
        }
        let conn = self.db.connect()?;
        if !self.remote {
            configure_connection(&conn, self.busy_timeout_ms).await?;
        }
        Ok(conn)
    }

    /// Start a write transaction that takes the write lock up front.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if no connection is available or the lock
    /// cannot be taken within the busy timeout.
    pub async fn begin_write(&self) -> Result<libsql::Transaction, DatabaseError> {
        let conn = self.connect().await?;
        Ok(conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// The connection used for migrations (and for everything in memory mode).
    #[must_use]
    pub const fn primary(&self) -> &libsql::Connection {
        &self.primary
    }
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the error.
///
/// # Errors
///
/// Returns the original error, or `DatabaseError` if the commit fails.
pub async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(%rollback_error, %error, "rollback failed");
            }
            Err(error)
        }
    }
}

async fn configure_connection(
    conn: &libsql::Connection,
    busy_timeout_ms: u64,
) -> Result<(), DatabaseError> {
    // Foreign keys are per-connection in SQLite.
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
    pragma(conn, &format!("PRAGMA busy_timeout = {busy_timeout_ms}")).await
}

/// Run a pragma that reports its new value as a row.
async fn pragma(conn: &libsql::Connection, sql: &str) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query(sql, ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("{sql}: {e}")))?;
    rows.next().await?;
    Ok(())
}
