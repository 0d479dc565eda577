/*!
 * History database connection.
 *
 * One SQLite connection is shared behind a mutex. Async callers go through
 * `execute_async`, which moves the work onto tokio's blocking pool.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::schema;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "history.db";

/// Directory created under the user's data directory
const DEFAULT_DB_DIRNAME: &str = "transcultura";

/// How long a writer waits for another process holding the database lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const IN_MEMORY_PATH: &str = ":memory:";

/// Shared handle to the history database
#[derive(Clone)]
pub struct DatabaseConnection {
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open the history database in the platform data directory
    pub fn new_default() -> Result<Self> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Open (or create) the history database at `db_path`
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening history database at: {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        Self::from_connection(db_path, conn)
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory history database");

        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::from_connection(PathBuf::from(IN_MEMORY_PATH), conn)
    }

    fn from_connection(db_path: PathBuf, conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<data dir>/transcultura/history.db`
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY_PATH
    }

    /// Run `f` with the locked connection on the current thread
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(&self.connection.lock())
    }

    /// Run `f` with the locked connection on the blocking pool
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();

        tokio::task::spawn_blocking(move || f(&connection.lock()))
            .await
            .context("Database task panicked")?
    }

    /// Campaign count, newest entry and file size
    pub fn stats(&self) -> Result<DatabaseStats> {
        let (campaign_count, latest_created_at) = self.execute(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM campaigns", [], |row| row.get(0))?;
            let latest: Option<String> = conn
                .query_row("SELECT MAX(created_at) FROM campaigns", [], |row| row.get(0))
                .optional()?
                .flatten();
            Ok((count, latest))
        })?;

        let file_size_bytes = if self.is_in_memory() {
            0
        } else {
            std::fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(DatabaseStats {
            campaign_count,
            latest_created_at,
            file_size_bytes,
        })
    }
}

/// Summary of the history database
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Number of stored campaign results
    pub campaign_count: i64,
    /// Timestamp of the most recent campaign, if any
    pub latest_created_at: Option<String>,
    /// Database file size in bytes (0 for in-memory databases)
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Campaigns: {}, Size: {} KB",
            self.campaign_count,
            self.file_size_bytes / 1024
        )?;
        if let Some(latest) = &self.latest_created_at {
            write!(f, ", Latest: {}", latest)?;
        }
        Ok(())
    }
}
