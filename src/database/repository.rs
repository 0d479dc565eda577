/*!
 * Repository layer for the campaign history database.
 *
 * This module provides a high-level API over the `campaigns` table,
 * abstracting away the SQL details.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use sha2::{Digest, Sha256};

use super::connection::DatabaseConnection;
use super::models::{normalize_timestamp, CampaignRecord};
use crate::campaign::history::CampaignHistory;
use crate::campaign::model::CampaignResult;

const SELECT_COLUMNS: &str = r#"
    SELECT id, created_at, content, content_hash, target_language, target_region, industry,
           model, translation, translation_failure, cultural_adaptation,
           cultural_adaptation_failure, compliance_check, compliance_check_failure,
           exception_analysis, exception_analysis_failure, status, priority
    FROM campaigns
"#;

/// Repository for campaign history operations
#[derive(Clone)]
pub struct Repository {
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Hash text for deduplicating campaign content
    pub fn hash_text(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Persist a campaign result
    pub async fn save_result(&self, result: &CampaignResult, model: &str) -> Result<()> {
        let record = CampaignRecord::from_result(
            result,
            model,
            Self::hash_text(result.request().content()),
        );
        self.insert_record(record).await
    }

    /// Insert a raw record; `created_at` is stored as UTC
    pub async fn insert_record(&self, mut record: CampaignRecord) -> Result<()> {
        debug!("Saving campaign {} to history", record.id);
        record.created_at = normalize_timestamp(&record.created_at)?;

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO campaigns (
                        id, created_at, content, content_hash, target_language, target_region,
                        industry, model, translation, translation_failure, cultural_adaptation,
                        cultural_adaptation_failure, compliance_check, compliance_check_failure,
                        exception_analysis, exception_analysis_failure, status, priority
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
                    "#,
                    params![
                        record.id,
                        record.created_at,
                        record.content,
                        record.content_hash,
                        record.target_language,
                        record.target_region,
                        record.industry,
                        record.model,
                        record.translation,
                        record.translation_failure,
                        record.cultural_adaptation,
                        record.cultural_adaptation_failure,
                        record.compliance_check,
                        record.compliance_check_failure,
                        record.exception_analysis,
                        record.exception_analysis_failure,
                        record.status,
                        record.priority,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a record by id
    pub async fn get_record(&self, id: &str) -> Result<Option<CampaignRecord>> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
                let record = conn.query_row(&sql, [id], parse_record_row).optional()?;
                Ok(record)
            })
            .await
    }

    /// Get a campaign result by id
    pub async fn get_result(&self, id: &str) -> Result<Option<CampaignResult>> {
        self.get_record(id)
            .await?
            .map(CampaignRecord::into_result)
            .transpose()
    }

    /// List records, most recent first
    pub async fn list_records(&self, limit: Option<usize>) -> Result<Vec<CampaignRecord>> {
        self.db
            .execute_async(move |conn| {
                let limit = limit.map(|l| l as i64).unwrap_or(-1);
                let sql = format!("{} ORDER BY created_at DESC, rowid DESC LIMIT ?1", SELECT_COLUMNS);
                query_records(conn, &sql, params![limit])
            })
            .await
    }

    /// Records whose content hashes to `content_hash`, most recent first
    pub async fn find_by_content_hash(&self, content_hash: &str) -> Result<Vec<CampaignRecord>> {
        let content_hash = content_hash.to_string();

        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    "{} WHERE content_hash = ?1 ORDER BY created_at DESC, rowid DESC",
                    SELECT_COLUMNS
                );
                query_records(conn, &sql, params![content_hash])
            })
            .await
    }

    /// Load the most recent results as a history, oldest first
    pub async fn load_history(&self, limit: Option<usize>) -> Result<CampaignHistory> {
        let mut records = self.list_records(limit).await?;
        records.reverse();

        let results = records
            .into_iter()
            .map(CampaignRecord::into_result)
            .collect::<Result<Vec<_>>>()?;

        Ok(CampaignHistory::from_results(results))
    }

    /// Number of stored campaigns
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM campaigns", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }

    /// Delete all stored campaigns, returning how many were removed
    pub async fn clear(&self) -> Result<usize> {
        self.db
            .execute_async(|conn| Ok(conn.execute("DELETE FROM campaigns", [])?))
            .await
    }
}

fn query_records(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<CampaignRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let records = stmt
        .query_map(params, parse_record_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

fn parse_record_row(row: &Row) -> rusqlite::Result<CampaignRecord> {
    Ok(CampaignRecord {
        id: row.get(0)?,
        created_at: row.get(1)?,
        content: row.get(2)?,
        content_hash: row.get(3)?,
        target_language: row.get(4)?,
        target_region: row.get(5)?,
        industry: row.get(6)?,
        model: row.get(7)?,
        translation: row.get(8)?,
        translation_failure: row.get(9)?,
        cultural_adaptation: row.get(10)?,
        cultural_adaptation_failure: row.get(11)?,
        compliance_check: row.get(12)?,
        compliance_check_failure: row.get(13)?,
        exception_analysis: row.get(14)?,
        exception_analysis_failure: row.get(15)?,
        status: row.get(16)?,
        priority: row.get(17)?,
    })
}
