/*!
 * Campaign request and result records.
 */

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::labels::{Industry, Language, Region};
use super::status::{classify_status, extract_priority, CampaignStatus, Priority};

/// Input to one pipeline run
///
/// Fields are only readable once the request is built; the pipeline borrows it
/// and never changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRequest {
    content: String,
    target_language: Language,
    target_region: Region,
    #[serde(default)]
    industry: Industry,
}

impl CampaignRequest {
    /// Create a request for the general industry.
    ///
    /// Content is not validated here; `CampaignPipeline::process` rejects empty
    /// content before any stage runs.
    pub fn new(content: impl Into<String>, target_language: Language, target_region: Region) -> Self {
        Self {
            content: content.into(),
            target_language,
            target_region,
            industry: Industry::default(),
        }
    }

    /// Set the industry
    pub fn with_industry(mut self, industry: Industry) -> Self {
        self.industry = industry;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    pub fn target_region(&self) -> Region {
        self.target_region
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }
}

/// The four pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Translation,
    CulturalAdaptation,
    ComplianceCheck,
    ExceptionAnalysis,
}

impl StageName {
    pub const ORDER: [StageName; 4] = [
        StageName::Translation,
        StageName::CulturalAdaptation,
        StageName::ComplianceCheck,
        StageName::ExceptionAnalysis,
    ];

    /// Name of the agent persona running the stage
    pub fn agent_name(&self) -> &'static str {
        match self {
            Self::Translation => "Content Translation Agent",
            Self::CulturalAdaptation => "Cultural Adaptation Agent",
            Self::ComplianceCheck => "Compliance & Regulatory Agent",
            Self::ExceptionAnalysis => "Exception Management Agent",
        }
    }

    /// 1-based position in the pipeline
    pub fn position(&self) -> usize {
        match self {
            Self::Translation => 1,
            Self::CulturalAdaptation => 2,
            Self::ComplianceCheck => 3,
            Self::ExceptionAnalysis => 4,
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "translation"),
            Self::CulturalAdaptation => write!(f, "cultural_adaptation"),
            Self::ComplianceCheck => write!(f, "compliance_check"),
            Self::ExceptionAnalysis => write!(f, "exception_analysis"),
        }
    }
}

/// Text produced by one stage
///
/// When generation failed, `text` holds the inline error text that flowed
/// downstream and `failure` keeps the original error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutput {
    pub stage: StageName,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl StageOutput {
    /// Output of a successful generation
    pub fn generated(stage: StageName, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
            failure: None,
        }
    }

    /// Output of a failed generation carrying the substituted text
    pub fn failed(stage: StageName, inline_text: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            stage,
            text: inline_text.into(),
            failure: Some(failure.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignResult {
    id: String,
    created_at: DateTime<Local>,
    request: CampaignRequest,
    translation: StageOutput,
    cultural_adaptation: StageOutput,
    compliance_check: StageOutput,
    exception_analysis: StageOutput,
    status: CampaignStatus,
    priority: Option<Priority>,
}

impl CampaignResult {
    /// Assemble a result; status and priority are derived from the stage texts.
    pub(crate) fn assemble(
        id: String,
        created_at: DateTime<Local>,
        request: CampaignRequest,
        translation: StageOutput,
        cultural_adaptation: StageOutput,
        compliance_check: StageOutput,
        exception_analysis: StageOutput,
    ) -> Self {
        let status = classify_status(&compliance_check.text, &exception_analysis.text);
        let priority = extract_priority(&exception_analysis.text);

        Self {
            id,
            created_at,
            request,
            translation,
            cultural_adaptation,
            compliance_check,
            exception_analysis,
            status,
            priority,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// First eight characters of the id, as shown in history tables
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn request(&self) -> &CampaignRequest {
        &self.request
    }

    pub fn translation(&self) -> &StageOutput {
        &self.translation
    }

    pub fn cultural_adaptation(&self) -> &StageOutput {
        &self.cultural_adaptation
    }

    pub fn compliance_check(&self) -> &StageOutput {
        &self.compliance_check
    }

    pub fn exception_analysis(&self) -> &StageOutput {
        &self.exception_analysis
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Stage outputs in execution order
    pub fn stage_outputs(&self) -> [&StageOutput; 4] {
        [
            &self.translation,
            &self.cultural_adaptation,
            &self.compliance_check,
            &self.exception_analysis,
        ]
    }

    /// Number of stages whose generation failed
    pub fn failed_stage_count(&self) -> usize {
        self.stage_outputs().iter().filter(|o| o.is_failure()).count()
    }
}
