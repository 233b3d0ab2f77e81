pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

pub use error::{DbError, Result};

/// Where the database lives, parsed from `DATABASE_URL`.
///
/// Accepts a bare path, `sqlite://path`, `sqlite:path` or `:memory:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    Memory,
    File(PathBuf),
}

impl DatabaseUrl {
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if path.is_empty() {
            return Err(DbError::UnsupportedUrl(url.to_string()));
        }
        if path == ":memory:" {
            return Ok(Self::Memory);
        }
        // Anything else with a scheme (postgres://, mysql://) is not ours
        if path.contains("://") {
            return Err(DbError::UnsupportedUrl(url.to_string()));
        }

        Ok(Self::File(PathBuf::from(path)))
    }
}

/// Persistence handle. Constructed explicitly and passed to whoever needs it.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(url: &DatabaseUrl) -> Result<Self> {
        match url {
            DatabaseUrl::Memory => Self::open_in_memory(),
            DatabaseUrl::File(path) => Self::open_path(path),
        }
    }

    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads; the pragma echoes the new mode back
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;

        let db = Self::init(conn)?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Fresh private database, used by tests and `DATABASE_URL=:memory:`.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    /// Run `f` inside a transaction. Commits on `Ok`, rolls back on `Err`.
    pub fn with_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_url() {
        assert_eq!(DatabaseUrl::parse(":memory:").unwrap(), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse("sqlite://:memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse("sqlite:///tmp/warbler-test.db").unwrap(),
            DatabaseUrl::File(PathBuf::from("/tmp/warbler-test.db"))
        );
        assert_eq!(
            DatabaseUrl::parse("warbler.db").unwrap(),
            DatabaseUrl::File(PathBuf::from("warbler.db"))
        );
    }

    #[test]
    fn test_parse_rejects_foreign_schemes() {
        assert!(matches!(
            DatabaseUrl::parse("postgresql:///warbler-test"),
            Err(DbError::UnsupportedUrl(_))
        ));
        assert!(matches!(
            DatabaseUrl::parse("  "),
            Err(DbError::UnsupportedUrl(_))
        ));
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let db = Database::open_in_memory().unwrap();

        let res: Result<()> = db.with_tx(|tx| {
            tx.execute(
                "INSERT INTO users (id, username, email, password, created_at)
                 VALUES ('a', 'ghost', 'ghost@test.com', 'x', '2024-01-01T00:00:00Z')",
                [],
            )?;
            Err(DbError::Integrity("forced".into()))
        });
        assert!(res.is_err());

        let count: i64 = db
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }
}
