/*!
 * Schema of the history database.
 *
 * One `campaigns` row per pipeline result, plus a single-row `schema_version`
 * table.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Create the tables on a fresh database and check the version of an existing one
///
/// A database written by a newer release is rejected rather than read with the
/// wrong column layout.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        0 => {
            info!("Initializing history schema v{}", SCHEMA_VERSION);
            create_all_tables(conn)?;
            set_schema_version(conn, SCHEMA_VERSION)?;
        }
        version if version > SCHEMA_VERSION => {
            return Err(anyhow!(
                "History database uses schema v{} but this build only knows v{}",
                version,
                SCHEMA_VERSION
            ));
        }
        version => debug!("History schema is up to date (v{})", version),
    }

    Ok(())
}

/// Stored schema version, 0 for a fresh database
pub(crate) fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| row.get(0))
        .optional()
        .context("Failed to read schema version")?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // Stage failures are kept next to the inline text that flowed downstream
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            content TEXT NOT NULL,
            content_hash TEXT NOT NULL,
            target_language TEXT NOT NULL,
            target_region TEXT NOT NULL,
            industry TEXT NOT NULL,
            model TEXT NOT NULL,
            translation TEXT NOT NULL,
            translation_failure TEXT,
            cultural_adaptation TEXT NOT NULL,
            cultural_adaptation_failure TEXT,
            compliance_check TEXT NOT NULL,
            compliance_check_failure TEXT,
            exception_analysis TEXT NOT NULL,
            exception_analysis_failure TEXT,
            status TEXT NOT NULL,
            priority TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_campaigns_created ON campaigns(created_at);
        CREATE INDEX IF NOT EXISTS idx_campaigns_content_hash ON campaigns(content_hash);
        CREATE INDEX IF NOT EXISTS idx_campaigns_status ON campaigns(status);
        "#,
    )?;

    debug!("Created campaigns table");
    Ok(())
}
