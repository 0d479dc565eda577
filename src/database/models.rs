/*!
 * Database entity models.
 *
 * `CampaignRecord` maps one row of the `campaigns` table. Labels and status are
 * stored as text; converting back into a `CampaignResult` re-derives status and
 * priority from the stored stage texts.
 */

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::model::{CampaignRequest, CampaignResult, StageName, StageOutput};

/// One persisted campaign result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: String,
    /// UTC RFC 3339 timestamp with microseconds, sortable as text
    pub created_at: String,
    pub content: String,
    /// SHA-256 of `content`, hex encoded
    pub content_hash: String,
    pub target_language: String,
    pub target_region: String,
    pub industry: String,
    /// Model that produced the stage texts
    pub model: String,
    pub translation: String,
    pub translation_failure: Option<String>,
    pub cultural_adaptation: String,
    pub cultural_adaptation_failure: Option<String>,
    pub compliance_check: String,
    pub compliance_check_failure: Option<String>,
    pub exception_analysis: String,
    pub exception_analysis_failure: Option<String>,
    pub status: String,
    pub priority: Option<String>,
}

impl CampaignRecord {
    /// Build a record from a pipeline result
    pub fn from_result(result: &CampaignResult, model: &str, content_hash: String) -> Self {
        let request = result.request();
        Self {
            id: result.id().to_string(),
            created_at: utc_timestamp(&result.created_at()),
            content: request.content().to_string(),
            content_hash,
            target_language: request.target_language().to_string(),
            target_region: request.target_region().to_string(),
            industry: request.industry().to_string(),
            model: model.to_string(),
            translation: result.translation().text.clone(),
            translation_failure: result.translation().failure.clone(),
            cultural_adaptation: result.cultural_adaptation().text.clone(),
            cultural_adaptation_failure: result.cultural_adaptation().failure.clone(),
            compliance_check: result.compliance_check().text.clone(),
            compliance_check_failure: result.compliance_check().failure.clone(),
            exception_analysis: result.exception_analysis().text.clone(),
            exception_analysis_failure: result.exception_analysis().failure.clone(),
            status: result.status().to_string(),
            priority: result.priority().map(|p| p.to_string()),
        }
    }

    /// Rebuild the `CampaignResult` this record was saved from
    pub fn into_result(self) -> Result<CampaignResult> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .with_context(|| format!("Invalid timestamp for campaign {}", self.id))?
            .with_timezone(&Local);

        let request = CampaignRequest::new(
            self.content,
            self.target_language.parse()?,
            self.target_region.parse()?,
        )
        .with_industry(self.industry.parse()?);

        Ok(CampaignResult::assemble(
            self.id,
            created_at,
            request,
            stage_output(StageName::Translation, self.translation, self.translation_failure),
            stage_output(
                StageName::CulturalAdaptation,
                self.cultural_adaptation,
                self.cultural_adaptation_failure,
            ),
            stage_output(
                StageName::ComplianceCheck,
                self.compliance_check,
                self.compliance_check_failure,
            ),
            stage_output(
                StageName::ExceptionAnalysis,
                self.exception_analysis,
                self.exception_analysis_failure,
            ),
        ))
    }
}

/// Format a timestamp as UTC so text order matches time order across offset changes
pub fn utc_timestamp<Tz: chrono::TimeZone>(at: &DateTime<Tz>) -> String {
    at.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Rewrite any RFC 3339 timestamp in the stored UTC form
pub fn normalize_timestamp(value: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid campaign timestamp: {}", value))?;
    Ok(utc_timestamp(&parsed))
}

fn stage_output(stage: StageName, text: String, failure: Option<String>) -> StageOutput {
    match failure {
        Some(failure) => StageOutput::failed(stage, text, failure),
        None => StageOutput::generated(stage, text),
    }
}
