use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::error::ServiceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Connection factory for the SQLite store.
///
/// Every request opens its own connection and drops it when done, so there is
/// no shared connection state between requests.
#[derive(Debug, Clone)]
pub struct Database {
    url: String,
}

impl Database {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn establish_connection(&self) -> Result<SqliteConnection, ServiceError> {
        let mut conn = SqliteConnection::establish(&self.url)?;
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
        diesel::sql_query(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}")).execute(&mut conn)?;
        Ok(conn)
    }

    pub fn run_pending_migrations(&self) -> Result<(), ServiceError> {
        let mut conn = self.establish_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| ServiceError::Migration(e.to_string()))?;
        for version in applied {
            info!(%version, "applied migration");
        }
        Ok(())
    }

    /// Runs `f` against a fresh connection on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = db.establish_connection()?;
            f(&mut conn)
        })
        .await?
    }
}
