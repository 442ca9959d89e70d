use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use tokio::sync::OnceCell;

use crate::store::StoreError;

/// Bump when the persisted schema changes. Opening a database that already
/// carries this version (or newer) leaves the schema untouched.
pub(crate) const SCHEMA_VERSION: i64 = 1;

/// Handle to the backing SQLite database.
///
/// The connection is opened lazily on first use and cached, so concurrent
/// callers share a single open/migration sequence.
pub struct Database {
    path: PathBuf,
    conn: OnceCell<Mutex<Connection>>,
}

impl Database {
    /// Create a handle for the database at `path`. Nothing is opened yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Database {
            path: path.as_ref().to_path_buf(),
            conn: OnceCell::new(),
        }
    }

    /// Database location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("draftstore")
            .join("documents.db")
    }

    /// Get the shared connection, opening and migrating on first call.
    pub(crate) async fn conn(&self) -> Result<&Mutex<Connection>, StoreError> {
        self.conn
            .get_or_try_init(|| async {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| StoreError::Connection(e.to_string()))?;
                }

                let conn = Connection::open(&self.path)
                    .map_err(|e| StoreError::Connection(e.to_string()))?;
                migrate(&conn).map_err(|e| StoreError::Connection(e.to_string()))?;

                log::debug!("opened document database at {}", self.path.display());
                Ok(Mutex::new(conn))
            })
            .await
    }
}

/// Bring the schema up to `SCHEMA_VERSION`. Existing records are never
/// touched; an equal or newer on-disk version is left as is.
fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if version < SCHEMA_VERSION {
        crate::docs::storage::create_docs_schema(conn)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}
