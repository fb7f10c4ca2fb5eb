pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

pub use error::{DbError, Result};
pub use models::{LanguageCount, MessageRow, Stats};

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Path value that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the message database at `path`.
    /// An empty path or `:memory:` opens an in-memory database.
    pub fn open(path: &Path) -> Result<Self> {
        let in_memory = path.as_os_str().is_empty() || path.as_os_str() == IN_MEMORY;
        let conn = if in_memory {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };

        // WAL mode for concurrent readers; in-memory databases report "memory"
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        migrations::run(&conn)?;

        if in_memory {
            info!("In-memory message database opened (journal_mode={})", mode);
        } else {
            info!("Message database opened at {} (journal_mode={})", path.display(), mode);
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(Path::new(IN_MEMORY))
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Like `with_conn`, for callers that need a transaction.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.lock()?;
        f(&mut conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))
    }
}
